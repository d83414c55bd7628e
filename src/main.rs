mod actions;
mod chat;
mod config;
mod fuzzy;
mod intent;
mod launcher;
mod registry;
mod session;
mod speech;

use actions::Dispatcher;
use chat::{ChatBackend, OpenAiChat};
use config::Config;
use intent::Classifier;
use launcher::{SystemLauncher, SystemNavigator};
use registry::Registry;
use session::Session;
use speech::{ConsoleInput, ConsoleSpeaker};

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

#[derive(Parser)]
#[command(name = "gofer")]
struct Cli {
    /// Path to the configuration file
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Handle a single typed utterance and exit (no listening loop)
    Once {
        /// The utterance, e.g. `gofer once open youtube`
        text: Vec<String>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::load(&cli.config);

    let sites = Registry::new(&config.sites);
    let apps = Registry::new(&config.apps);
    let classifier = Classifier::new(sites, apps, config.video_path.clone())?;

    let chat = OpenAiChat::from_config(&config.chat)?
        .map(|backend| Box::new(backend) as Box<dyn ChatBackend>);

    let dispatcher = Dispatcher::new(
        Box::new(ConsoleSpeaker::new(config.speech_command.clone())),
        Box::new(SystemNavigator::new(
            config.browser_path.clone().map(PathBuf::from),
        )),
        Box::new(SystemLauncher),
        chat,
        config.search_url.clone(),
    );

    if let Some(Command::Once { text }) = cli.command {
        let utterance = text.join(" ");
        match classifier.classify(Some(&utterance)) {
            Some(intent) => {
                eprintln!("Detected intent: {:?}", intent);
                dispatcher.dispatch(intent);
            }
            None => eprintln!("Nothing to do."),
        }
        return Ok(());
    }

    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc::set_handler(move || r.store(false, Ordering::SeqCst))?;

    Session::new(
        Box::new(ConsoleInput),
        classifier,
        dispatcher,
        running,
        Duration::from_secs(config.listen_timeout_secs),
        Duration::from_secs(config.phrase_limit_secs),
    )
    .run();

    Ok(())
}
