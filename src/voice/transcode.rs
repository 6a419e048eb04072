use std::path::{Path, PathBuf};
use std::process::Command;

use super::engine;
use crate::core::error::{Result, VaultError};

pub const OPUS_SAMPLE_RATE: u32 = 48_000;
pub const OPUS_BITRATE: &str = "24k";

/// Converts generated speech into mono 48 kHz OGG/Opus for voice messages.
pub trait AudioTranscoder {
    fn transcode(&self, input: &Path, output: &Path) -> Result<()>;
}

pub struct FfmpegTranscoder {
    binary: PathBuf,
}

impl FfmpegTranscoder {
    pub fn new(binary: PathBuf) -> Self {
        Self { binary }
    }
}

impl Default for FfmpegTranscoder {
    fn default() -> Self {
        Self::new(PathBuf::from("ffmpeg"))
    }
}

impl AudioTranscoder for FfmpegTranscoder {
    fn transcode(&self, input: &Path, output: &Path) -> Result<()> {
        if !input.exists() {
            return Err(VaultError::NotFound(input.to_path_buf()));
        }

        let mut command = Command::new(&self.binary);
        command
            .args(["-y", "-loglevel", "error", "-i"])
            .arg(input)
            .args(["-ac", "1", "-ar"])
            .arg(OPUS_SAMPLE_RATE.to_string())
            .args(["-c:a", "libopus", "-b:a", OPUS_BITRATE])
            .arg(output);

        engine::run("ffmpeg", command, None)?;
        Ok(())
    }
}

/// `speech.wav` -> `speech.ogg`
pub fn default_opus_path(input: &Path) -> PathBuf {
    input.with_extension("ogg")
}
