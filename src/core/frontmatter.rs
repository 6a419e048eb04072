use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;
use serde_yaml::Value;

use super::error::Result;

lazy_static! {
    static ref FRONTMATTER_RE: Regex =
        Regex::new(r"(?s)^---\r?\n(?:(.*?)\r?\n)?---[ \t]*(?:\r?\n|$)").unwrap();
}

#[derive(Debug, Clone, PartialEq)]
pub enum FrontmatterValue {
    Text(String),
    List(Vec<String>),
}

impl fmt::Display for FrontmatterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => write!(f, "{}", text),
            Self::List(items) => {
                let quoted: Vec<String> = items.iter().map(|i| quote_item(i)).collect();
                write!(f, "[{}]", quoted.join(", "))
            }
        }
    }
}

impl From<&str> for FrontmatterValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FrontmatterValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Vec<String>> for FrontmatterValue {
    fn from(value: Vec<String>) -> Self {
        Self::List(value)
    }
}

// Single quotes like a Python list repr; double quotes (with backslash
// escapes) whenever the item holds a quote, backslash or control character,
// so the header stays a YAML flow sequence that parses back to the same items.
fn quote_item(item: &str) -> String {
    let needs_escape = item
        .chars()
        .any(|c| c == '\'' || c == '\\' || c.is_control());
    if !needs_escape {
        return format!("'{}'", item);
    }

    let mut out = String::with_capacity(item.len() + 2);
    out.push('"');
    for c in item.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Ordered key/value header placed between `---` lines at the top of a note.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Frontmatter {
    entries: Vec<(String, FrontmatterValue)>,
}

impl Frontmatter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key`, keeping its original position when it is already present.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<FrontmatterValue>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<FrontmatterValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&FrontmatterValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FrontmatterValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn render(&self) -> String {
        let mut out = String::from("---\n");
        for (key, value) in &self.entries {
            out.push_str(&format!("{}: {}\n", key, value));
        }
        out.push_str("---\n\n");
        out
    }

    /// Prefixes `body` with the rendered header; an empty header adds nothing.
    pub fn apply(&self, body: &str) -> String {
        if self.is_empty() {
            body.to_string()
        } else {
            format!("{}{}", self.render(), body)
        }
    }

    /// Reads the header of an existing note. `Ok(None)` when the note has none.
    pub fn parse(content: &str) -> Result<Option<Self>> {
        let Some(caps) = FRONTMATTER_RE.captures(content) else {
            return Ok(None);
        };
        let raw = caps.get(1).map(|m| m.as_str()).unwrap_or("");
        if raw.trim().is_empty() {
            return Ok(Some(Self::new()));
        }

        let mut frontmatter = Self::new();
        if let Value::Mapping(mapping) = serde_yaml::from_str::<Value>(raw)? {
            for (key, value) in mapping {
                let value = match value {
                    Value::Sequence(items) => {
                        FrontmatterValue::List(items.iter().map(scalar_text).collect())
                    }
                    other => FrontmatterValue::Text(scalar_text(&other)),
                };
                frontmatter.insert(scalar_text(&key), value);
            }
        }
        Ok(Some(frontmatter))
    }

    /// Returns the note body with any header removed.
    pub fn strip(content: &str) -> &str {
        match FRONTMATTER_RE.find(content) {
            Some(m) => content[m.end()..].trim_start_matches(&['\r', '\n'][..]),
            None => content,
        }
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}
