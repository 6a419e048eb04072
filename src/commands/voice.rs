use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Local;
use colored::*;

use vault_assistant::voice::{
    self, AudioTranscoder, FfmpegTranscoder, ModelSize, PiperCli, Transcriber, WhisperCli,
};
use vault_assistant::{Settings, Vault};

pub fn transcribe(settings: &Settings, audio: &Path, model: ModelSize, save: bool) -> Result<()> {
    let whisper = WhisperCli::from_settings(settings);

    if save {
        eprintln!("Transcribing with {} model and saving to daily note...", model);
        let vault = Vault::new(settings);
        let saved = voice::transcribe_and_save(
            &vault,
            &whisper,
            audio,
            model,
            Local::now().naive_local(),
        )?;

        println!("{} {}", "Saved to:".green(), saved.path.display());
        println!("Timestamp: [{}]", saved.time);
        println!();
        println!("{}", "Transcription:".bold());
        println!("{}", saved.text());
        return Ok(());
    }

    eprintln!("Transcribing with {} model...", model);
    let transcription = whisper.transcribe(audio, model)?;
    if let (Some(language), Some(p)) = (
        transcription.language.as_deref(),
        transcription.language_probability,
    ) {
        eprintln!("Language: {} (probability: {:.2})", language, p);
    }
    for segment in &transcription.segments {
        eprintln!(
            "{}",
            format!("[{:.2}s -> {:.2}s] {}", segment.start, segment.end, segment.text).dimmed()
        );
    }
    println!("{}", transcription.text());
    Ok(())
}

pub fn speak(
    settings: &Settings,
    text: Option<&str>,
    file: Option<&Path>,
    output: &Path,
    opus: bool,
) -> Result<()> {
    let text = match file {
        Some(file) => fs::read_to_string(file)
            .with_context(|| format!("Cannot read text from {}", file.display()))?,
        None => text.unwrap_or_default().to_string(),
    };

    let piper = PiperCli::from_settings(settings);
    let ffmpeg = FfmpegTranscoder::default();
    let transcoder: Option<&dyn AudioTranscoder> = if opus { Some(&ffmpeg) } else { None };

    eprintln!("Generating speech...");
    let result = voice::speak(&piper, transcoder, &text, &settings.piper_model(), output)?;

    println!("{} {}", "WAV:".green(), result.wav.display());
    if let Some(opus) = result.opus {
        println!("{} {}", "Opus:".green(), opus.display());
    }
    Ok(())
}
