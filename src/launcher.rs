//! Opening URLs, launching applications, and playing local files
//!
//! Configured launch commands are whitespace-split and spawned directly;
//! URLs and file paths are handed to the platform's default handler through
//! the `open` crate. Nothing is waited on.

use anyhow::{Context, bail};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Opens URLs in a browser.
pub trait Navigator {
    fn open_url(&self, url: &str) -> anyhow::Result<()>;
}

/// Launches applications and opens local files with their default handler.
pub trait Launcher {
    fn launch(&self, command: &str) -> anyhow::Result<()>;
    fn open_path(&self, path: &Path) -> anyhow::Result<()>;
}

/// Uses the configured browser when it exists on disk, otherwise the
/// platform's default handler.
pub struct SystemNavigator {
    browser_path: Option<PathBuf>,
}

impl SystemNavigator {
    pub fn new(browser_path: Option<PathBuf>) -> Self {
        Self { browser_path }
    }
}

impl Navigator for SystemNavigator {
    fn open_url(&self, url: &str) -> anyhow::Result<()> {
        if let Some(browser) = &self.browser_path {
            if browser.exists() {
                Command::new(browser)
                    .arg(url)
                    .spawn()
                    .with_context(|| format!("could not start {}", browser.display()))?;
                return Ok(());
            }
        }
        open::that_detached(url).with_context(|| format!("could not open {}", url))
    }
}

/// Launches apps via their configured command line.
pub struct SystemLauncher;

impl Launcher for SystemLauncher {
    fn launch(&self, command: &str) -> anyhow::Result<()> {
        let (program, args) = split_command(command)?;
        Command::new(&program)
            .args(&args)
            .spawn()
            .with_context(|| format!("could not start {}", program))?;
        Ok(())
    }

    fn open_path(&self, path: &Path) -> anyhow::Result<()> {
        open::that_detached(path).with_context(|| format!("could not open {}", path.display()))
    }
}

/// Split a configured launch command into program and arguments.
fn split_command(command: &str) -> anyhow::Result<(String, Vec<String>)> {
    let mut parts = command.split_whitespace().map(String::from);
    match parts.next() {
        Some(program) => Ok((program, parts.collect())),
        None => bail!("empty launch command"),
    }
}
