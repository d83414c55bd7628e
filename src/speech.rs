//! Speech input and output seams
//!
//! The session only sees these traits. The default implementations read
//! typed utterances from stdin and print spoken lines, optionally piping
//! them to an external TTS program. A microphone transcriber slots in by
//! implementing `SpeechInput`.

use std::io::{self, BufRead, Write};
use std::process::Command;
use std::time::Duration;

/// Outcome of one capture attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureOutcome {
    /// Speech was captured and transcribed.
    Heard(String),
    /// No speech before the timeout elapsed.
    Timeout,
    /// Audio was captured but could not be understood.
    #[allow(dead_code)]
    Unintelligible,
    /// The capture backend itself failed.
    Unavailable,
}

/// Source of user utterances, one per turn.
pub trait SpeechInput {
    fn capture(&mut self, timeout: Duration, phrase_limit: Duration) -> CaptureOutcome;
}

/// Spoken responses. Best-effort: failures stay inside the implementation.
pub trait Speaker {
    fn say(&self, text: &str);
}

/// Reads utterances from stdin, one line per turn.
pub struct ConsoleInput;

impl SpeechInput for ConsoleInput {
    fn capture(&mut self, _timeout: Duration, _phrase_limit: Duration) -> CaptureOutcome {
        print!("You: ");
        if io::stdout().flush().is_err() {
            return CaptureOutcome::Unavailable;
        }

        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(0) => CaptureOutcome::Unavailable,
            Ok(_) => {
                let line = line.trim();
                if line.is_empty() {
                    CaptureOutcome::Timeout
                } else {
                    CaptureOutcome::Heard(line.to_string())
                }
            }
            Err(e) => {
                eprintln!("Input error: {}", e);
                CaptureOutcome::Unavailable
            }
        }
    }
}

/// Prints a transcript line and optionally runs an external TTS command
/// (e.g. `say` or `espeak`) with the text as its final argument.
pub struct ConsoleSpeaker {
    speech_command: Option<String>,
}

impl ConsoleSpeaker {
    pub fn new(speech_command: Option<String>) -> Self {
        Self { speech_command }
    }
}

impl Speaker for ConsoleSpeaker {
    fn say(&self, text: &str) {
        println!("\nAssistant: {}\n", text);

        if let Some(command) = &self.speech_command {
            let mut parts = command.split_whitespace();
            if let Some(program) = parts.next() {
                // Waits for the program so speech finishes before the next turn
                match Command::new(program).args(parts).arg(text).status() {
                    Ok(status) if !status.success() => {
                        eprintln!("Speech command exited with {}", status);
                    }
                    Err(e) => eprintln!("Speech command failed: {}", e),
                    Ok(_) => {}
                }
            }
        }
    }
}
