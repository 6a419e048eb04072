use std::path::PathBuf;

pub const DEFAULT_VAULT_PATH: &str = "/vault";
pub const DEFAULT_VOICE_VENV: &str = "/opt/voice-venv";
pub const DEFAULT_WHISPER_MODEL_DIR: &str = "/opt/models/whisper";
pub const DEFAULT_PIPER_MODEL_DIR: &str = "/opt/models/piper";
pub const DEFAULT_PIPER_VOICE: &str = "en_US-lessac-medium.onnx";

/// Process-level settings, built once at startup and passed down explicitly.
#[derive(Debug, Clone)]
pub struct Settings {
    pub vault_root: PathBuf,
    pub voice_venv: PathBuf,
    pub whisper_model_dir: PathBuf,
    pub piper_model_dir: PathBuf,
    pub piper_voice: String,
}

impl Settings {
    pub fn for_vault(root: impl Into<PathBuf>) -> Self {
        Self {
            vault_root: root.into(),
            ..Self::default()
        }
    }

    pub fn piper_binary(&self) -> PathBuf {
        self.voice_venv.join("bin/piper")
    }

    pub fn whisper_binary(&self) -> PathBuf {
        self.voice_venv.join("bin/whisper-cli")
    }

    pub fn piper_model(&self) -> PathBuf {
        self.piper_model_dir.join(&self.piper_voice)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            vault_root: PathBuf::from(DEFAULT_VAULT_PATH),
            voice_venv: PathBuf::from(DEFAULT_VOICE_VENV),
            whisper_model_dir: PathBuf::from(DEFAULT_WHISPER_MODEL_DIR),
            piper_model_dir: PathBuf::from(DEFAULT_PIPER_MODEL_DIR),
            piper_voice: DEFAULT_PIPER_VOICE.to_string(),
        }
    }
}
