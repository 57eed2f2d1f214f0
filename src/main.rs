use clap::Parser;
use log::{error, info, warn};
use notekeeper::core::config::{self, NotekeeperConfig, ResolvedConfig};
use notekeeper::core::{JsonFileStorage, NoteStore};
use notekeeper::shell;
use simplelog::{ConfigBuilder, WriteLogger};
use std::fs::{self, File};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "notekeeper", version, about = "Interactive note manager backed by a JSON file")]
struct Args {
    /// Notes file to load and rewrite (default: notes.json)
    #[arg(short, long)]
    file: Option<PathBuf>,
}

/// Initialize file logger. Logging is skipped if the file can't be created.
fn init_logging(config: &ResolvedConfig) {
    let Some(path) = &config.log_file else {
        return;
    };
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }

    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create(path) {
        let _ = WriteLogger::init(config.log_level, log_config, log_file);
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // The logger needs the resolved config, so a config error is held until it exists.
    let (file_config, config_error) = match config::load_config() {
        Ok(c) => (c, None),
        Err(e) => (NotekeeperConfig::default(), Some(e)),
    };
    let resolved = config::resolve(&file_config, args.file.as_deref());
    init_logging(&resolved);

    if let Some(e) = config_error {
        warn!("Ignoring config file: {}", e);
    }
    info!(
        "Notekeeper starting with notes file {}",
        resolved.notes_file.display()
    );

    let mut store = match NoteStore::open(JsonFileStorage::new(resolved.notes_file.clone())) {
        Ok(store) => store,
        Err(e) => {
            error!("Failed to load notes: {}", e);
            eprintln!("Error loading notes: {e}");
            return ExitCode::FAILURE;
        }
    };

    let stdin = io::stdin();
    if let Err(e) = shell::run(&mut store, stdin.lock(), io::stdout().lock()) {
        error!("Console I/O failed: {}", e);
        eprintln!("Console error: {e}");
        return ExitCode::FAILURE;
    }

    info!("Notekeeper exiting");
    ExitCode::SUCCESS
}
