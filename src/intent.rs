//! Intent classification - maps one utterance to an action intent
//!
//! Rules run in a fixed priority order and the first match wins:
//! 1. Exit keywords anywhere in the utterance
//! 2. Time requests
//! 3. Video playback
//! 4. Web search, with the leading search/find prefix stripped
//! 5. A known site name anywhere, then open-site phrasings resolved fuzzily
//! 6. A known app name anywhere, then launch phrasings resolved fuzzily
//! 7. Everything else falls through to chat
//!
//! Literal name checks run before the phrasing patterns: a known name
//! anywhere in speech is a stronger signal than a generically shaped
//! "open ..." command.

use crate::fuzzy;
use crate::registry::{Registry, RegistryEntry};
use anyhow::Context;
use regex::Regex;

/// Words that end the session wherever they appear.
const EXIT_WORDS: [&str; 5] = ["exit", "quit", "stop", "bye", "goodbye"];

/// Classified purpose of one utterance, with its extracted payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Exit,
    Time,
    PlayVideo { path: String },
    Search { query: String },
    OpenSite { url: String },
    OpenApp { command: String },
    Chat { prompt: String },
    /// Reserved for input no rule claims; unreachable while chat is the fallback.
    #[allow(dead_code)]
    Unknown,
}

pub struct Classifier {
    sites: Registry,
    apps: Registry,
    video_path: String,
    search_strip: Regex,
    site_pattern: Regex,
    app_pattern: Regex,
}

impl Classifier {
    pub fn new(sites: Registry, apps: Registry, video_path: String) -> anyhow::Result<Self> {
        Ok(Self {
            sites,
            apps,
            video_path,
            search_strip: Regex::new(r"^(search|find)\s*(for)?\s*")
                .context("search prefix pattern")?,
            site_pattern: Regex::new(r"\b(open|go to|launch|website|site)\b\s*(.*)")
                .context("site phrasing pattern")?,
            app_pattern: Regex::new(r"\b(open|launch|start|run)\b\s*(.*)")
                .context("app phrasing pattern")?,
        })
    }

    /// Classify one turn of input.
    ///
    /// `None` in means no speech was captured; `None` out means there is
    /// nothing to act on and the caller should just listen again.
    pub fn classify(&self, text: Option<&str>) -> Option<Intent> {
        let text = text?.trim().to_lowercase();
        if text.is_empty() {
            return None;
        }

        if EXIT_WORDS.iter().any(|w| text.contains(w)) {
            return Some(Intent::Exit);
        }

        if text.contains("time") {
            return Some(Intent::Time);
        }

        if text.contains("play video") || text.contains("open video") {
            return Some(Intent::PlayVideo {
                path: self.video_path.clone(),
            });
        }

        if text.starts_with("search ") || text.contains("search for") {
            let query = self.search_strip.replace(&text, "").trim().to_string();
            return Some(Intent::Search { query });
        }

        if let Some(entry) = self.sites.find_in_text(&text) {
            return Some(Intent::OpenSite {
                url: entry.target.clone(),
            });
        }

        if let Some(entry) = resolve_phrased_target(&self.site_pattern, &text, &self.sites) {
            return Some(Intent::OpenSite {
                url: entry.target.clone(),
            });
        }

        if let Some(entry) = self.apps.find_in_text(&text) {
            return Some(Intent::OpenApp {
                command: entry.target.clone(),
            });
        }

        if let Some(entry) = resolve_phrased_target(&self.app_pattern, &text, &self.apps) {
            return Some(Intent::OpenApp {
                command: entry.target.clone(),
            });
        }

        Some(Intent::Chat { prompt: text })
    }
}

/// Pull the trailing text out of an "open/launch/..." phrasing and resolve it
/// against a registry.
fn resolve_phrased_target<'a>(
    pattern: &Regex,
    text: &str,
    registry: &'a Registry,
) -> Option<&'a RegistryEntry> {
    let captures = pattern.captures(text)?;
    let candidate = captures.get(2)?.as_str();
    fuzzy::resolve(candidate, registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RegistryItem;

    fn classifier() -> Classifier {
        let items = |table: &[(&str, &str)]| {
            table
                .iter()
                .map(|(name, target)| RegistryItem {
                    name: (*name).into(),
                    target: (*target).into(),
                })
                .collect::<Vec<_>>()
        };
        let sites = Registry::new(&items(&[
            ("youtube", "https://www.youtube.com"),
            ("google", "https://www.google.com"),
            ("gmail", "https://mail.google.com"),
        ]));
        let apps = Registry::new(&items(&[
            ("notepad", "notepad.exe"),
            ("calculator", "calc.exe"),
        ]));
        Classifier::new(sites, apps, "demo.mp4".into()).unwrap()
    }

    #[test]
    fn test_exit_words_anywhere() {
        let c = classifier();
        assert_eq!(c.classify(Some("please exit now")), Some(Intent::Exit));
        assert_eq!(c.classify(Some("goodbye assistant")), Some(Intent::Exit));
        assert_eq!(c.classify(Some("stop the music")), Some(Intent::Exit));
    }

    #[test]
    fn test_exit_beats_time() {
        assert_eq!(classifier().classify(Some("time to quit")), Some(Intent::Exit));
    }

    #[test]
    fn test_time() {
        assert_eq!(classifier().classify(Some("what time is it")), Some(Intent::Time));
    }

    #[test]
    fn test_play_video_carries_configured_path() {
        let c = classifier();
        let expected = Intent::PlayVideo {
            path: "demo.mp4".into(),
        };
        assert_eq!(c.classify(Some("play video")), Some(expected.clone()));
        assert_eq!(c.classify(Some("could you open video")), Some(expected));
    }

    #[test]
    fn test_search_strips_prefix() {
        let c = classifier();
        assert_eq!(
            c.classify(Some("search for rust programming books")),
            Some(Intent::Search {
                query: "rust programming books".into()
            })
        );
        assert_eq!(
            c.classify(Some("search weather today")),
            Some(Intent::Search {
                query: "weather today".into()
            })
        );
    }

    #[test]
    fn test_search_with_empty_query_is_still_search() {
        assert_eq!(
            classifier().classify(Some("search for")),
            Some(Intent::Search { query: "".into() })
        );
    }

    #[test]
    fn test_search_beats_site_names() {
        assert_eq!(
            classifier().classify(Some("search for youtube videos")),
            Some(Intent::Search {
                query: "youtube videos".into()
            })
        );
    }

    #[test]
    fn test_site_name_anywhere() {
        let c = classifier();
        let youtube = Intent::OpenSite {
            url: "https://www.youtube.com".into(),
        };
        assert_eq!(c.classify(Some("open youtube")), Some(youtube.clone()));
        assert_eq!(c.classify(Some("i was watching youtube yesterday")), Some(youtube));
    }

    #[test]
    fn test_site_resolved_fuzzily_from_phrasing() {
        let c = classifier();
        let youtube = Intent::OpenSite {
            url: "https://www.youtube.com".into(),
        };
        assert_eq!(c.classify(Some("open yuotube")), Some(youtube.clone()));
        assert_eq!(c.classify(Some("go to yuotube")), Some(youtube));
    }

    #[test]
    fn test_app_name_anywhere() {
        assert_eq!(
            classifier().classify(Some("calculator please")),
            Some(Intent::OpenApp {
                command: "calc.exe".into()
            })
        );
    }

    #[test]
    fn test_app_resolved_fuzzily_from_phrasing() {
        assert_eq!(
            classifier().classify(Some("launch notepda")),
            Some(Intent::OpenApp {
                command: "notepad.exe".into()
            })
        );
    }

    #[test]
    fn test_chat_fallback_keeps_normalized_text() {
        assert_eq!(
            classifier().classify(Some("  How ARE you  ")),
            Some(Intent::Chat {
                prompt: "how are you".into()
            })
        );
    }

    #[test]
    fn test_nothing_to_do() {
        let c = classifier();
        assert_eq!(c.classify(None), None);
        assert_eq!(c.classify(Some("")), None);
        assert_eq!(c.classify(Some("   ")), None);
    }

    #[test]
    fn test_classification_is_idempotent() {
        let c = classifier();
        for utterance in ["open youtube", "search for cats", "how are you"] {
            assert_eq!(c.classify(Some(utterance)), c.classify(Some(utterance)));
        }
    }

    #[test]
    fn test_uppercase_input_is_normalized() {
        assert_eq!(
            classifier().classify(Some("OPEN YOUTUBE")),
            Some(Intent::OpenSite {
                url: "https://www.youtube.com".into()
            })
        );
    }
}
