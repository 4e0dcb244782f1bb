use anyhow::Context;
use hbnb::api::HbnbApi;
use hbnb::config::ConsoleConfig;
use hbnb::console::Console;
use hbnb::logging;
use hbnb::store::fs::FileBackend;
use hbnb::store::Storage;
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use tracing::debug;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    logging::init();

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let config = ConsoleConfig::load(&cwd).context("could not read console config")?;

    let data_path = config.data_path(&cwd);
    debug!(path = %data_path.display(), "opening registry");
    let storage = Storage::open(FileBackend::new(&data_path))
        .with_context(|| format!("could not load {}", data_path.display()))?;

    let stdin = io::stdin();
    let interactive = stdin.is_terminal();
    let mut console = Console::new(HbnbApi::new(storage), io::stdout()).with_prompt(config.prompt);
    console.run(stdin.lock(), interactive)?;
    Ok(())
}
