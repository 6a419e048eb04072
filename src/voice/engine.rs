use std::io::{self, Write};
use std::process::{Command, Output, Stdio};
use std::thread;

use crate::core::error::{Result, VaultError};

/// Runs an external engine to completion, optionally feeding `input` on
/// stdin. Spawn failures and non-zero exits become `EngineFailure` carrying
/// whatever the process printed.
pub fn run(engine: &str, mut command: Command, input: Option<&str>) -> Result<Output> {
    log::info!("Running {}: {:?}", engine, command);

    command
        .stdin(if input.is_some() {
            Stdio::piped()
        } else {
            Stdio::null()
        })
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    let mut child = command
        .spawn()
        .map_err(|e| VaultError::engine(engine, format!("failed to start: {}", e)))?;

    // Feed stdin from its own thread so a chatty child can't fill its
    // stdout/stderr pipes while we are still writing.
    let writer = match input {
        Some(input) => {
            let mut stdin = child
                .stdin
                .take()
                .ok_or_else(|| VaultError::engine(engine, "stdin unavailable"))?;
            let input = input.to_string();
            Some(thread::spawn(move || stdin.write_all(input.as_bytes())))
        }
        None => None,
    };

    let output = child
        .wait_with_output()
        .map_err(|e| VaultError::engine(engine, e.to_string()))?;

    if let Some(writer) = writer {
        match writer.join() {
            Ok(Ok(())) => {}
            // The child may exit without reading everything; its status decides.
            Ok(Err(e)) if e.kind() == io::ErrorKind::BrokenPipe => {}
            Ok(Err(e)) => {
                return Err(VaultError::engine(
                    engine,
                    format!("failed to write input: {}", e),
                ))
            }
            Err(_) => return Err(VaultError::engine(engine, "input writer panicked")),
        }
    }

    if !output.status.success() {
        return Err(VaultError::engine(engine, diagnostic(&output)));
    }
    Ok(output)
}

fn diagnostic(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
    if !stderr.is_empty() {
        return stderr;
    }
    let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if !stdout.is_empty() {
        return stdout;
    }
    format!("exited with {}", output.status)
}
