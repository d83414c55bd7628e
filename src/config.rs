use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize)]
pub struct Config {
    /// Seconds to wait for speech to start before giving up on a turn
    #[serde(default = "default_listen_timeout")]
    pub listen_timeout_secs: u64,

    /// Maximum seconds of speech captured per turn
    #[serde(default = "default_phrase_limit")]
    pub phrase_limit_secs: u64,

    /// Preferred browser binary; used only if the path exists
    #[serde(default)]
    pub browser_path: Option<String>,

    /// Local file played on "play video"
    #[serde(default)]
    pub video_path: String,

    /// Search URL prefix; the encoded query is appended
    #[serde(default = "default_search_url")]
    pub search_url: String,

    /// External TTS program invoked with the spoken text as its last argument
    #[serde(default)]
    pub speech_command: Option<String>,

    /// Known websites, scanned in order
    #[serde(default = "default_sites")]
    pub sites: Vec<RegistryItem>,

    /// Known applications, scanned in order
    #[serde(default = "default_apps")]
    pub apps: Vec<RegistryItem>,

    #[serde(default)]
    pub chat: ChatConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_timeout_secs: default_listen_timeout(),
            phrase_limit_secs: default_phrase_limit(),
            browser_path: None,
            video_path: String::new(),
            search_url: default_search_url(),
            speech_command: None,
            sites: default_sites(),
            apps: default_apps(),
            chat: ChatConfig::default(),
        }
    }
}

/// One name -> target mapping for the site and app tables.
#[derive(Debug, Deserialize, Clone)]
pub struct RegistryItem {
    pub name: String,
    pub target: String,
}

fn default_listen_timeout() -> u64 {
    8
}

fn default_phrase_limit() -> u64 {
    10
}

fn default_search_url() -> String {
    "https://www.google.com/search?q=".into()
}

fn default_sites() -> Vec<RegistryItem> {
    [
        ("youtube", "https://www.youtube.com"),
        ("google", "https://www.google.com"),
        ("gmail", "https://mail.google.com"),
        ("netflix", "https://www.netflix.com"),
        ("whatsapp", "https://web.whatsapp.com"),
        ("spotify", "https://open.spotify.com"),
        ("linkedin", "https://www.linkedin.com"),
        ("instagram", "https://www.instagram.com"),
        ("chatgpt", "https://chat.openai.com"),
    ]
    .into_iter()
    .map(|(name, target)| RegistryItem {
        name: name.into(),
        target: target.into(),
    })
    .collect()
}

fn default_apps() -> Vec<RegistryItem> {
    let table: &[(&str, &str)] = if cfg!(target_os = "windows") {
        &[
            ("notepad", "notepad.exe"),
            ("calculator", "calc.exe"),
            ("paint", "mspaint.exe"),
        ]
    } else if cfg!(target_os = "macos") {
        &[
            ("notepad", "open -a TextEdit"),
            ("calculator", "open -a Calculator"),
            ("paint", "open -a Preview"),
        ]
    } else {
        &[
            ("notepad", "gedit"),
            ("calculator", "gnome-calculator"),
            ("paint", "gimp"),
        ]
    };
    table
        .iter()
        .map(|(name, target)| RegistryItem {
            name: (*name).into(),
            target: (*target).into(),
        })
        .collect()
}

// ============================================================================
// Chat Config
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ChatConfig {
    /// OpenAI-compatible endpoint base URL
    #[serde(default = "default_chat_base_url")]
    pub base_url: String,

    /// Model name
    #[serde(default = "default_chat_model")]
    pub model: String,

    /// API key (supports ${ENV_VAR} syntax); empty disables chat
    #[serde(default = "default_chat_api_key")]
    pub api_key: String,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            base_url: default_chat_base_url(),
            model: default_chat_model(),
            api_key: default_chat_api_key(),
        }
    }
}

fn default_chat_base_url() -> String {
    "https://api.openai.com/v1".into()
}

fn default_chat_model() -> String {
    "gpt-4o-mini".into()
}

fn default_chat_api_key() -> String {
    "${OPENAI_API_KEY}".into()
}

/// Expand ${VAR} to environment variable values
fn expand_env_vars(s: &str) -> String {
    expand_vars(s, |name| std::env::var(name).unwrap_or_default())
}

fn expand_vars(s: &str, lookup: impl Fn(&str) -> String) -> String {
    let mut result = s.to_string();
    let mut cursor = 0;

    while let Some(offset) = result[cursor..].find("${") {
        let start = cursor + offset;
        if let Some(end) = result[start..].find('}') {
            let value = lookup(&result[start + 2..start + end]);
            result.replace_range(start..start + end + 1, &value);
            // Resume after the inserted value; placeholders in it stay literal
            cursor = start + value.len();
        } else {
            break;
        }
    }

    result
}

impl Config {
    pub fn load(path: &Path) -> Self {
        let mut config = if path.exists() {
            match fs::read_to_string(path) {
                Ok(raw) => match toml::from_str(&raw) {
                    Ok(config) => config,
                    Err(e) => {
                        eprintln!("Warning: could not parse {}: {}", path.display(), e);
                        Config::default()
                    }
                },
                Err(e) => {
                    eprintln!("Warning: could not read {}: {}", path.display(), e);
                    Config::default()
                }
            }
        } else {
            Config::default()
        };

        config.chat.api_key = expand_env_vars(&config.chat.api_key);

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_cover_the_builtin_tables() {
        let config = Config::default();
        assert_eq!(config.listen_timeout_secs, 8);
        assert_eq!(config.phrase_limit_secs, 10);
        assert!(config.sites.iter().any(|s| s.name == "youtube"));
        assert_eq!(config.apps.len(), 3);
        assert_eq!(config.chat.model, "gpt-4o-mini");
    }

    #[test]
    fn test_partial_file_keeps_defaults_elsewhere() {
        let config: Config = toml::from_str(
            r#"
            video_path = "clips/demo.mp4"

            [[sites]]
            name = "docs"
            target = "https://doc.rust-lang.org"

            [chat]
            model = "gpt-4o"
            "#,
        )
        .unwrap();

        assert_eq!(config.video_path, "clips/demo.mp4");
        assert_eq!(config.sites.len(), 1);
        assert_eq!(config.sites[0].name, "docs");
        assert_eq!(config.chat.model, "gpt-4o");
        assert_eq!(config.chat.base_url, "https://api.openai.com/v1");
        assert_eq!(config.search_url, "https://www.google.com/search?q=");
    }

    #[test]
    fn test_unset_env_var_expands_to_empty() {
        assert_eq!(expand_env_vars("${GOFER_TEST_UNSET_VAR_1}"), "");
        assert_eq!(expand_env_vars("plain text"), "plain text");
    }

    #[test]
    fn test_placeholder_in_expanded_value_stays_literal() {
        // a value that names its own variable must not expand forever
        assert_eq!(expand_vars("${KEY}", |_| "${KEY}".into()), "${KEY}");
        assert_eq!(expand_vars("${A} and ${B}", |name| name.to_lowercase()), "a and b");
        assert_eq!(expand_vars("${UNCLOSED", |_| String::new()), "${UNCLOSED");
    }
}
