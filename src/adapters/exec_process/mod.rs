//! External encoder execution adapter
//!
//! Runs the configured encoder binary as a child process, either capturing
//! its output or forwarding every line to the log as it arrives.

use std::collections::VecDeque;
use std::io::{self, BufRead, BufReader, Read};
use std::process::{Command, Stdio};
use std::thread;

use tracing::{debug, info, warn};

use crate::error::{VidbatchError, VidbatchResult};
use crate::ports::{EncodeOutcome, EncodeRequest, Encoder, OutputMode};

/// Lines of stderr kept for the failure message in stream mode
const STDERR_TAIL_LINES: usize = 20;

/// Encoder adapter that spawns a real process
#[derive(Debug, Clone)]
pub struct ProcessEncoder {
    program: String,
    mode: OutputMode,
}

impl ProcessEncoder {
    /// Create new process encoder for a program name or path
    pub fn new(program: impl Into<String>, mode: OutputMode) -> Self {
        Self {
            program: program.into(),
            mode,
        }
    }

    fn command(&self, request: &EncodeRequest) -> Command {
        let mut command = Command::new(&self.program);
        command.args(request.arguments()).stdin(Stdio::null());
        command
    }

    fn spawn_error(&self, error: io::Error) -> VidbatchError {
        if error.kind() == io::ErrorKind::NotFound {
            VidbatchError::EncoderNotFound {
                program: self.program.clone(),
            }
        } else {
            VidbatchError::Io(error)
        }
    }

    fn run_captured(&self, request: &EncodeRequest) -> VidbatchResult<EncodeOutcome> {
        let output = self
            .command(request)
            .output()
            .map_err(|e| self.spawn_error(e))?;

        let stderr = String::from_utf8_lossy(&output.stderr).trim_end().to_string();
        Ok(EncodeOutcome::from_status(output.status, stderr))
    }

    fn run_streamed(&self, request: &EncodeRequest) -> VidbatchResult<EncodeOutcome> {
        let mut child = self
            .command(request)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| self.spawn_error(e))?;

        // stderr is drained on its own thread so neither pipe can fill up
        let stderr = child.stderr.take();
        let label = request.label.clone();
        let stderr_reader = thread::spawn(move || {
            let mut tail = VecDeque::with_capacity(STDERR_TAIL_LINES);
            if let Some(stderr) = stderr {
                let drained = for_each_line(stderr, |line| {
                    info!("[{}] {}", label, line);
                    if tail.len() == STDERR_TAIL_LINES {
                        tail.pop_front();
                    }
                    tail.push_back(line.to_string());
                });
                if let Err(e) = drained {
                    warn!("[{}] stopped reading encoder stderr: {}", label, e);
                }
            }
            Vec::from(tail).join("\n")
        });

        if let Some(stdout) = child.stdout.take() {
            if let Err(e) = for_each_line(stdout, |line| info!("[{}] {}", request.label, line)) {
                warn!("[{}] stopped reading encoder stdout: {}", request.label, e);
            }
        }

        let status = child.wait()?;
        let stderr_tail = stderr_reader.join().unwrap_or_default();
        Ok(EncodeOutcome::from_status(status, stderr_tail))
    }
}

impl Encoder for ProcessEncoder {
    fn program(&self) -> &str {
        &self.program
    }

    fn preflight(&self) -> VidbatchResult<()> {
        // only whether it starts matters; `-version` output and status are ignored
        let status = Command::new(&self.program)
            .arg("-version")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|e| self.spawn_error(e))?;
        debug!(program = %self.program, status = %status, "Encoder is available");
        Ok(())
    }

    fn encode(&self, request: &EncodeRequest) -> VidbatchResult<EncodeOutcome> {
        debug!(
            program = %self.program,
            args = ?request.arguments(),
            "Spawning encoder"
        );
        match self.mode {
            OutputMode::Capture => self.run_captured(request),
            OutputMode::Stream => self.run_streamed(request),
        }
    }
}

/// Call `f` for every non-empty line, treating `\r` as a line break too so
/// carriage-return progress updates show up as separate lines.
fn for_each_line<R: Read>(reader: R, mut f: impl FnMut(&str)) -> io::Result<()> {
    let mut reader = BufReader::new(reader);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            return Ok(());
        }
        for segment in buf.split(|b| *b == b'\n' || *b == b'\r') {
            if !segment.is_empty() {
                f(&String::from_utf8_lossy(segment));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn request() -> EncodeRequest {
        EncodeRequest {
            input: PathBuf::from("in.mp4"),
            output: PathBuf::from("out.webm"),
            params: vec!["-c:v".to_string(), "libvpx-vp9".to_string()],
            label: "in.mp4".to_string(),
        }
    }

    #[test]
    fn test_for_each_line_splits_carriage_returns() {
        let mut lines = Vec::new();
        for_each_line(&b"frame=1\rframe=2\r\nsize=10kB\n\nlast"[..], |l| {
            lines.push(l.to_string())
        })
        .unwrap();
        assert_eq!(lines, vec!["frame=1", "frame=2", "size=10kB", "last"]);
    }

    #[test]
    fn test_missing_program_is_not_found() {
        let encoder = ProcessEncoder::new("vidbatch-no-such-encoder-binary", OutputMode::Capture);
        let err = encoder.encode(&request()).unwrap_err();
        assert!(matches!(err, VidbatchError::EncoderNotFound { .. }));
        assert!(err.is_fatal());
    }

    #[test]
    fn test_preflight_reports_missing_program() {
        let encoder = ProcessEncoder::new("vidbatch-no-such-encoder-binary", OutputMode::Stream);
        assert!(matches!(
            encoder.preflight(),
            Err(VidbatchError::EncoderNotFound { .. })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_preflight_ignores_exit_status() {
        assert!(ProcessEncoder::new("false", OutputMode::Capture).preflight().is_ok());
    }

    #[cfg(unix)]
    #[test]
    fn test_exit_status_is_interpreted() {
        for mode in [OutputMode::Capture, OutputMode::Stream] {
            let ok = ProcessEncoder::new("true", mode).encode(&request()).unwrap();
            assert_eq!(ok, EncodeOutcome::Success);

            let failed = ProcessEncoder::new("false", mode).encode(&request()).unwrap();
            assert!(matches!(failed, EncodeOutcome::Failed { .. }));
        }
    }
}
