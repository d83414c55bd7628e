//! Session loop - listen, classify, act, repeat
//!
//! Single-threaded and cooperative: each transition completes before the
//! next begins, so turns never overlap. The interrupt flag is checked
//! between every transition; capture failures re-enter listening instead
//! of propagating.

use crate::actions::{Dispatcher, TurnOutcome};
use crate::intent::{Classifier, Intent};
use crate::speech::{CaptureOutcome, SpeechInput};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

const GREETING: &str = "Hello, I am your AI desktop assistant. How can I help you today?";
const INTERRUPT_FAREWELL: &str = "Stopping. Bye.";

/// Consecutive backend failures tolerated before giving up on capture.
const UNAVAILABLE_LIMIT: u32 = 3;

/// Where the loop is within one turn.
#[derive(Debug)]
enum SessionState {
    Listening,
    Classifying(Option<String>),
    Acting(Intent),
    Terminated,
}

pub struct Session {
    input: Box<dyn SpeechInput>,
    classifier: Classifier,
    dispatcher: Dispatcher,
    running: Arc<AtomicBool>,
    listen_timeout: Duration,
    phrase_limit: Duration,
}

impl Session {
    pub fn new(
        input: Box<dyn SpeechInput>,
        classifier: Classifier,
        dispatcher: Dispatcher,
        running: Arc<AtomicBool>,
        listen_timeout: Duration,
        phrase_limit: Duration,
    ) -> Self {
        Self {
            input,
            classifier,
            dispatcher,
            running,
            listen_timeout,
            phrase_limit,
        }
    }

    /// Run turns until an exit intent, an interrupt, or a dead capture backend.
    pub fn run(&mut self) {
        self.dispatcher.speak(GREETING);

        let mut state = SessionState::Listening;
        let mut unavailable_streak = 0u32;

        loop {
            if !self.running.load(Ordering::SeqCst) {
                self.dispatcher.speak(INTERRUPT_FAREWELL);
                return;
            }

            state = match state {
                SessionState::Listening => {
                    match self.input.capture(self.listen_timeout, self.phrase_limit) {
                        CaptureOutcome::Heard(text) => {
                            unavailable_streak = 0;
                            SessionState::Classifying(Some(text))
                        }
                        CaptureOutcome::Timeout => {
                            unavailable_streak = 0;
                            eprintln!("No voice detected.");
                            SessionState::Classifying(None)
                        }
                        CaptureOutcome::Unintelligible => {
                            unavailable_streak = 0;
                            eprintln!("Could not understand audio.");
                            SessionState::Classifying(None)
                        }
                        CaptureOutcome::Unavailable => {
                            unavailable_streak += 1;
                            eprintln!(
                                "Speech input unavailable ({}/{})",
                                unavailable_streak, UNAVAILABLE_LIMIT
                            );
                            if unavailable_streak >= UNAVAILABLE_LIMIT {
                                self.dispatcher.speak(INTERRUPT_FAREWELL);
                                SessionState::Terminated
                            } else {
                                SessionState::Classifying(None)
                            }
                        }
                    }
                }
                SessionState::Classifying(text) => {
                    match self.classifier.classify(text.as_deref()) {
                        Some(intent) => {
                            eprintln!("Detected intent: {:?}", intent);
                            SessionState::Acting(intent)
                        }
                        None => SessionState::Listening,
                    }
                }
                SessionState::Acting(intent) => match self.dispatcher.dispatch(intent) {
                    TurnOutcome::Continue => SessionState::Listening,
                    TurnOutcome::Quit => SessionState::Terminated,
                },
                SessionState::Terminated => return,
            };
        }
    }
}
