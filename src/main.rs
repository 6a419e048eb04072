mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use vault_assistant::core::settings::{
    DEFAULT_PIPER_MODEL_DIR, DEFAULT_PIPER_VOICE, DEFAULT_VAULT_PATH, DEFAULT_VOICE_VENV,
    DEFAULT_WHISPER_MODEL_DIR,
};
use vault_assistant::voice::ModelSize;
use vault_assistant::Settings;

#[derive(Parser)]
#[command(name = "vault")]
#[command(about = "Obsidian vault assistant: daily notes, notes and voice capture", long_about = None)]
#[command(version)]
struct Cli {
    #[arg(long, env = "VAULT_PATH", default_value = DEFAULT_VAULT_PATH, global = true)]
    vault: PathBuf,
    #[arg(long, env = "VOICE_VENV", default_value = DEFAULT_VOICE_VENV, global = true)]
    voice_venv: PathBuf,
    #[arg(long, env = "WHISPER_MODEL_DIR", default_value = DEFAULT_WHISPER_MODEL_DIR, global = true)]
    whisper_models: PathBuf,
    #[arg(long, env = "PIPER_MODEL_DIR", default_value = DEFAULT_PIPER_MODEL_DIR, global = true)]
    piper_models: PathBuf,
    #[arg(long, env = "PIPER_VOICE", default_value = DEFAULT_PIPER_VOICE, global = true)]
    piper_voice: String,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    fn settings(&self) -> Settings {
        Settings {
            vault_root: self.vault.clone(),
            voice_venv: self.voice_venv.clone(),
            whisper_model_dir: self.whisper_models.clone(),
            piper_model_dir: self.piper_models.clone(),
            piper_voice: self.piper_voice.clone(),
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum ModelArg {
    Tiny,
    Base,
    Small,
    Medium,
    Large,
}

impl From<ModelArg> for ModelSize {
    fn from(value: ModelArg) -> Self {
        match value {
            ModelArg::Tiny => ModelSize::Tiny,
            ModelArg::Base => ModelSize::Base,
            ModelArg::Small => ModelSize::Small,
            ModelArg::Medium => ModelSize::Medium,
            ModelArg::Large => ModelSize::Large,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    // ===== Vault Commands =====
    /// Show vault configuration
    Config {
        #[arg(long, help = "JSON output")]
        json: bool,
    },
    /// Print the daily note path
    DailyPath {
        #[arg(long, help = "Date in YYYY-MM-DD format (default: today)")]
        date: Option<String>,
    },
    /// Create or overwrite a daily note
    CreateDaily {
        #[arg(short, long, help = "Note content")]
        content: String,
        #[arg(long, help = "Date in YYYY-MM-DD format (default: today)")]
        date: Option<String>,
        #[arg(long, help = "Template file to prepend")]
        template: Option<PathBuf>,
    },
    /// Append a timestamped entry to a daily note
    Append {
        #[arg(short, long, help = "Content to append")]
        content: String,
        #[arg(long, help = "Date in YYYY-MM-DD format (default: today)")]
        date: Option<String>,
        #[arg(long, help = "Timestamp HH:MM (default: current time)")]
        time: Option<String>,
    },
    /// Create a new note
    Create {
        title: String,
        #[arg(short, long, default_value = "", help = "Note content")]
        content: String,
        #[arg(short, long, help = "Target folder (default: configured new file folder)")]
        folder: Option<String>,
        #[arg(long = "meta", value_name = "KEY=VALUE", help = "Frontmatter entry (repeatable)")]
        meta: Vec<String>,
        #[arg(long, value_delimiter = ',', help = "Comma-separated tags")]
        tags: Vec<String>,
        #[arg(long, help = "Fail if the note already exists")]
        no_clobber: bool,
    },
    /// Read a note
    Read {
        #[arg(help = "Note path (relative to vault)")]
        path: PathBuf,
        #[arg(long, help = "Show frontmatter as JSON instead of the note")]
        frontmatter: bool,
    },
    /// List daily notes
    ListDaily {
        #[arg(long, help = "Filter by year")]
        year: Option<i32>,
        #[arg(long, help = "Filter by month (1-12)")]
        month: Option<u32>,
    },

    // ===== Voice Commands =====
    /// Transcribe audio to text
    Transcribe {
        audio: PathBuf,
        #[arg(short, long, value_enum, default_value = "small", help = "Whisper model size")]
        model: ModelArg,
        #[arg(short, long, help = "Save to daily note with timestamp")]
        save: bool,
    },
    /// Transcribe audio and save it to today's daily note
    DailyNote {
        audio: PathBuf,
        #[arg(short, long, value_enum, default_value = "small", help = "Whisper model size")]
        model: ModelArg,
    },
    /// Generate speech from text
    Speak {
        #[arg(required_unless_present = "file", help = "Text to speak")]
        text: Option<String>,
        #[arg(short, long, help = "Read text from file")]
        file: Option<PathBuf>,
        #[arg(short, long, default_value = "/tmp/voice_output.wav", help = "Output file path")]
        output: PathBuf,
        #[arg(long, help = "Also convert to OGG/Opus for voice messages")]
        opus: bool,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let settings = cli.settings();

    match cli.command {
        // Vault commands
        Commands::Config { json } => commands::config::run(&settings, json),
        Commands::DailyPath { date } => commands::daily::path(&settings, date.as_deref()),
        Commands::CreateDaily {
            content,
            date,
            template,
        } => commands::daily::create(&settings, &content, date.as_deref(), template.as_deref()),
        Commands::Append {
            content,
            date,
            time,
        } => commands::daily::append(&settings, &content, date.as_deref(), time.as_deref()),
        Commands::Create {
            title,
            content,
            folder,
            meta,
            tags,
            no_clobber,
        } => commands::note::create(
            &settings,
            &title,
            &content,
            folder.as_deref(),
            &meta,
            &tags,
            no_clobber,
        ),
        Commands::Read { path, frontmatter } => commands::note::read(&settings, &path, frontmatter),
        Commands::ListDaily { year, month } => commands::list::run(&settings, year, month),

        // Voice commands
        Commands::Transcribe { audio, model, save } => {
            commands::voice::transcribe(&settings, &audio, model.into(), save)
        }
        Commands::DailyNote { audio, model } => {
            commands::voice::transcribe(&settings, &audio, model.into(), true)
        }
        Commands::Speak {
            text,
            file,
            output,
            opus,
        } => commands::voice::speak(&settings, text.as_deref(), file.as_deref(), &output, opus),
    }
}
