use std::path::{Path, PathBuf};
use std::process::Command;

use super::engine;
use crate::core::error::Result;
use crate::core::settings::Settings;

pub trait SpeechSynthesizer {
    /// Speaks `text` with the voice at `model`, writing audio to `output`.
    fn synthesize(&self, text: &str, model: &Path, output: &Path) -> Result<()>;
}

/// Piper text-to-speech, fed through stdin.
pub struct PiperCli {
    binary: PathBuf,
}

impl PiperCli {
    pub fn new(binary: PathBuf) -> Self {
        Self { binary }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.piper_binary())
    }
}

impl SpeechSynthesizer for PiperCli {
    fn synthesize(&self, text: &str, model: &Path, output: &Path) -> Result<()> {
        let mut command = Command::new(&self.binary);
        command
            .arg("--model")
            .arg(model)
            .arg("--output_file")
            .arg(output);

        engine::run("piper", command, Some(text))?;
        Ok(())
    }
}
