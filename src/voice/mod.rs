//! Voice capture and playback around the vault.
//!
//! The engines themselves are external programs behind small traits, so the
//! flows here can run against fakes.

pub mod engine;
pub mod synth;
pub mod transcode;
pub mod transcribe;

use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;

use crate::core::error::Result;
use crate::core::store::TIME_FORMAT;
use crate::core::vault::Vault;

pub use synth::{PiperCli, SpeechSynthesizer};
pub use transcode::{default_opus_path, AudioTranscoder, FfmpegTranscoder};
pub use transcribe::{ModelSize, Segment, Transcriber, Transcription, WhisperCli};

#[derive(Debug, Clone)]
pub struct SavedTranscript {
    pub path: PathBuf,
    pub time: String,
    pub transcription: Transcription,
}

impl SavedTranscript {
    pub fn text(&self) -> String {
        self.transcription.text()
    }
}

/// Transcribes `audio` and appends the text to the daily note of `now`,
/// labelled with its `HH:MM`.
pub fn transcribe_and_save(
    vault: &Vault,
    transcriber: &dyn Transcriber,
    audio: &Path,
    model: ModelSize,
    now: NaiveDateTime,
) -> Result<SavedTranscript> {
    let time = now.format(TIME_FORMAT).to_string();
    let transcription = transcriber.transcribe(audio, model)?;

    let path = vault.append_to_daily_note(&transcription.text(), Some(now.date()), Some(&time))?;
    log::info!("Saved transcript of {} to {}", audio.display(), path.display());

    Ok(SavedTranscript {
        path,
        time,
        transcription,
    })
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpeechOutput {
    pub wav: PathBuf,
    pub opus: Option<PathBuf>,
}

/// Synthesizes `text` to `output`; with a transcoder, also produces an OGG/Opus
/// copy next to it.
pub fn speak(
    synthesizer: &dyn SpeechSynthesizer,
    transcoder: Option<&dyn AudioTranscoder>,
    text: &str,
    model: &Path,
    output: &Path,
) -> Result<SpeechOutput> {
    synthesizer.synthesize(text, model, output)?;

    let opus = match transcoder {
        Some(transcoder) => {
            let opus_path = default_opus_path(output);
            transcoder.transcode(output, &opus_path)?;
            Some(opus_path)
        }
        None => None,
    };

    Ok(SpeechOutput {
        wav: output.to_path_buf(),
        opus,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::VaultError;
    use chrono::NaiveDate;
    use std::cell::RefCell;
    use std::fs;
    use tempfile::tempdir;

    struct FakeTranscriber {
        segments: Vec<&'static str>,
        calls: RefCell<Vec<ModelSize>>,
    }

    impl Transcriber for FakeTranscriber {
        fn transcribe(&self, _audio: &Path, model: ModelSize) -> Result<Transcription> {
            self.calls.borrow_mut().push(model);
            Ok(Transcription {
                segments: self
                    .segments
                    .iter()
                    .map(|t| Segment {
                        start: 0.0,
                        end: 1.0,
                        text: format!(" {}", t),
                    })
                    .collect(),
                language: Some("en".to_string()),
                language_probability: Some(0.9),
            })
        }
    }

    struct FakeSynthesizer {
        fail: bool,
    }

    impl SpeechSynthesizer for FakeSynthesizer {
        fn synthesize(&self, text: &str, _model: &Path, output: &Path) -> Result<()> {
            if self.fail {
                return Err(VaultError::engine("piper", "voice model not found"));
            }
            fs::write(output, text.as_bytes()).map_err(|e| VaultError::io(output, e))
        }
    }

    struct CopyTranscoder;

    impl AudioTranscoder for CopyTranscoder {
        fn transcode(&self, input: &Path, output: &Path) -> Result<()> {
            fs::copy(input, output).map_err(|e| VaultError::io(output, e))?;
            Ok(())
        }
    }

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(h, m, 12)
            .unwrap()
    }

    #[test]
    fn test_transcribe_and_save() {
        let dir = tempdir().unwrap();
        let vault = Vault::at(dir.path());
        let transcriber = FakeTranscriber {
            segments: vec!["Buy milk.", "Call mum."],
            calls: RefCell::new(Vec::new()),
        };

        let saved = transcribe_and_save(
            &vault,
            &transcriber,
            Path::new("memo.ogg"),
            ModelSize::Base,
            at(8, 5),
        )
        .unwrap();

        assert_eq!(saved.time, "08:05");
        assert_eq!(saved.text(), "Buy milk. Call mum.");
        assert_eq!(
            saved.path,
            dir.path().join("01-daily-journey/2024/06-June/2024-06-01.md")
        );
        assert_eq!(
            fs::read_to_string(&saved.path).unwrap(),
            "\n\n---\n\n**[08:05]**\n\nBuy milk. Call mum."
        );
        assert_eq!(*transcriber.calls.borrow(), vec![ModelSize::Base]);
    }

    #[test]
    fn test_speak_with_opus() {
        let dir = tempdir().unwrap();
        let wav = dir.path().join("out.wav");

        let result = speak(
            &FakeSynthesizer { fail: false },
            Some(&CopyTranscoder),
            "hello",
            Path::new("voice.onnx"),
            &wav,
        )
        .unwrap();

        assert_eq!(result.wav, wav);
        assert_eq!(result.opus, Some(dir.path().join("out.ogg")));
        assert_eq!(fs::read_to_string(dir.path().join("out.ogg")).unwrap(), "hello");
    }

    #[test]
    fn test_speak_failure_surfaces_diagnostic() {
        let dir = tempdir().unwrap();
        let err = speak(
            &FakeSynthesizer { fail: true },
            None,
            "hello",
            Path::new("voice.onnx"),
            &dir.path().join("out.wav"),
        )
        .unwrap_err();

        assert_eq!(err.to_string(), "piper failed: voice model not found");
    }
}
