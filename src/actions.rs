//! Action handlers - one per intent
//!
//! Every collaborator failure is absorbed here as one stderr line plus
//! exactly one spoken apology. Only an exit intent ends the loop.

use crate::chat::ChatBackend;
use crate::intent::Intent;
use crate::launcher::{Launcher, Navigator};
use crate::speech::Speaker;
use chrono::Local;
use std::path::Path;

/// System persona sent with every chat request.
const PERSONA: &str = "You are a smart, friendly, polite AI desktop assistant.";

/// Whether the session should keep going after a dispatched turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    Continue,
    Quit,
}

pub struct Dispatcher {
    speaker: Box<dyn Speaker>,
    navigator: Box<dyn Navigator>,
    launcher: Box<dyn Launcher>,
    chat: Option<Box<dyn ChatBackend>>,
    search_url: String,
}

impl Dispatcher {
    pub fn new(
        speaker: Box<dyn Speaker>,
        navigator: Box<dyn Navigator>,
        launcher: Box<dyn Launcher>,
        chat: Option<Box<dyn ChatBackend>>,
        search_url: String,
    ) -> Self {
        Self {
            speaker,
            navigator,
            launcher,
            chat,
            search_url,
        }
    }

    pub fn speak(&self, text: &str) {
        self.speaker.say(text);
    }

    /// Run the handler for one classified intent.
    pub fn dispatch(&self, intent: Intent) -> TurnOutcome {
        match intent {
            Intent::Exit => {
                self.speak("Okay, goodbye. Have a great day.");
                TurnOutcome::Quit
            }
            Intent::Time => {
                let now = Local::now().format("%I:%M %p");
                self.speak(&format!("The time is {}.", now));
                TurnOutcome::Continue
            }
            Intent::OpenSite { url } => {
                self.open_site(&url);
                TurnOutcome::Continue
            }
            Intent::OpenApp { command } => {
                self.open_app(&command);
                TurnOutcome::Continue
            }
            Intent::Search { query } => {
                self.run_search(&query);
                TurnOutcome::Continue
            }
            Intent::PlayVideo { path } => {
                self.play_video(&path);
                TurnOutcome::Continue
            }
            Intent::Chat { prompt } => {
                self.chat_reply(&prompt);
                TurnOutcome::Continue
            }
            Intent::Unknown => {
                self.speak("Sorry, I did not understand that.");
                TurnOutcome::Continue
            }
        }
    }

    fn open_site(&self, url: &str) {
        match self.navigator.open_url(url) {
            Ok(()) => self.speak("Opened the website for you."),
            Err(e) => {
                eprintln!("Website error: {:#}", e);
                self.speak("Sorry, I could not open the website.");
            }
        }
    }

    fn open_app(&self, command: &str) {
        match self.launcher.launch(command) {
            Ok(()) => self.speak("Opening the application."),
            Err(e) => {
                eprintln!("App error: {:#}", e);
                self.speak("Sorry, I could not open that application.");
            }
        }
    }

    fn run_search(&self, query: &str) {
        if query.is_empty() {
            self.speak("What should I search for?");
            return;
        }
        let url = format!("{}{}", self.search_url, urlencoding::encode(query));
        self.open_site(&url);
        self.speak(&format!("Searching for {}.", query));
    }

    fn play_video(&self, path: &str) {
        if !Path::new(path).exists() {
            self.speak("Video file not found.");
            return;
        }
        match self.launcher.open_path(Path::new(path)) {
            Ok(()) => self.speak("Playing your video."),
            Err(e) => {
                eprintln!("Video error: {:#}", e);
                self.speak("Sorry, I could not play the video.");
            }
        }
    }

    fn chat_reply(&self, prompt: &str) {
        match &self.chat {
            None => self.speak("Chat is unavailable because the API key is not configured."),
            Some(backend) => match backend.complete(PERSONA, prompt) {
                Ok(reply) => self.speak(&reply),
                Err(e) => {
                    eprintln!("Chat error: {:#}", e);
                    self.speak("Sorry, I could not connect to the AI service right now.");
                }
            },
        }
    }
}
