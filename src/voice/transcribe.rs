//! Speech-to-text through whisper.cpp's command line tool.

use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

use super::engine;
use crate::core::error::{Result, VaultError};
use crate::core::settings::Settings;

lazy_static! {
    // [00:00:00.000 --> 00:00:04.200]   Some text
    static ref SEGMENT_RE: Regex = Regex::new(
        r"^\[(\d+):(\d{2}):(\d{2})[.,](\d{3}) --> (\d+):(\d{2}):(\d{2})[.,](\d{3})\]\s*(.*)$"
    )
    .unwrap();
    static ref LANGUAGE_RE: Regex =
        Regex::new(r"auto-detected language:\s*(\w+)\s*\(p\s*=\s*([0-9.]+)\)").unwrap();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelSize {
    Tiny,
    Base,
    #[default]
    Small,
    Medium,
    Large,
}

impl ModelSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tiny => "tiny",
            Self::Base => "base",
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        }
    }
}

impl fmt::Display for ModelSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelSize {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "tiny" => Ok(Self::Tiny),
            "base" => Ok(Self::Base),
            "small" => Ok(Self::Small),
            "medium" => Ok(Self::Medium),
            "large" => Ok(Self::Large),
            other => Err(format!(
                "unknown model size '{}' (must be: tiny|base|small|medium|large)",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Segment {
    pub start: f32,
    pub end: f32,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Transcription {
    pub segments: Vec<Segment>,
    pub language: Option<String>,
    pub language_probability: Option<f32>,
}

impl Transcription {
    /// Segment texts joined by single spaces.
    pub fn text(&self) -> String {
        self.segments
            .iter()
            .map(|s| s.text.trim())
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

pub trait Transcriber {
    fn transcribe(&self, audio: &Path, model: ModelSize) -> Result<Transcription>;
}

pub struct WhisperCli {
    binary: PathBuf,
    model_dir: PathBuf,
}

impl WhisperCli {
    pub fn new(binary: PathBuf, model_dir: PathBuf) -> Self {
        Self { binary, model_dir }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.whisper_binary(), settings.whisper_model_dir.clone())
    }

    pub fn model_path(&self, model: ModelSize) -> PathBuf {
        self.model_dir.join(format!("ggml-{}.bin", model))
    }
}

impl Transcriber for WhisperCli {
    fn transcribe(&self, audio: &Path, model: ModelSize) -> Result<Transcription> {
        if !audio.exists() {
            return Err(VaultError::NotFound(audio.to_path_buf()));
        }

        let mut command = Command::new(&self.binary);
        command
            .arg("-m")
            .arg(self.model_path(model))
            .arg("-f")
            .arg(audio)
            .arg("-l")
            .arg("auto");

        let output = engine::run("whisper", command, None)?;
        Ok(parse_output(
            &String::from_utf8_lossy(&output.stdout),
            &String::from_utf8_lossy(&output.stderr),
        ))
    }
}

/// Builds a transcription from whisper's stdout (segments) and stderr
/// (language detection).
pub fn parse_output(stdout: &str, stderr: &str) -> Transcription {
    let segments = stdout
        .lines()
        .filter_map(|line| SEGMENT_RE.captures(line.trim()))
        .map(|c| Segment {
            start: seconds(&c[1], &c[2], &c[3], &c[4]),
            end: seconds(&c[5], &c[6], &c[7], &c[8]),
            text: c[9].trim().to_string(),
        })
        .collect();

    let (language, language_probability) = match LANGUAGE_RE.captures(stderr) {
        Some(c) => (Some(c[1].to_string()), c[2].parse().ok()),
        None => (None, None),
    };

    Transcription {
        segments,
        language,
        language_probability,
    }
}

fn seconds(h: &str, m: &str, s: &str, ms: &str) -> f32 {
    let part = |v: &str| v.parse::<f32>().unwrap_or(0.0);
    part(h) * 3600.0 + part(m) * 60.0 + part(s) + part(ms) / 1000.0
}
