//! PlantRecog - identify plants from photos in the terminal
//!
//! This is the binary entry point. All logic lives in the library.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use plantrecog::RunOptions;
use plantrecog_app::config;
use plantrecog_app::ExitReason;

/// PlantRecog - identify plants from photos in the terminal
#[derive(Parser, Debug)]
#[command(name = "plantrecog")]
#[command(about = "Identify plants from photos using a remote classifier", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,

    /// Config file (default: .plantrecog/config.toml, then the user config dir)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Prediction service base URL
    #[arg(long, value_name = "URL")]
    service_url: Option<String>,

    /// Directory offered by the gallery picker
    #[arg(long, value_name = "DIR")]
    gallery: Option<PathBuf>,

    /// Classify this image right after startup
    #[arg(long, value_name = "FILE")]
    image: Option<PathBuf>,

    /// Run in headless mode (NDJSON output, no TUI)
    #[arg(long)]
    headless: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a commented default config file
    Init {
        /// Where to write it (default: the user config dir)
        #[arg(value_name = "FILE")]
        path: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    if let Some(Command::Init { path }) = args.command {
        return init(path);
    }

    let options = RunOptions {
        config: args.config,
        service_url: args.service_url,
        gallery: args.gallery,
        image: args.image,
        headless: args.headless,
    };

    match plantrecog::run(options).await {
        Ok(ExitReason::Normal) => ExitCode::SUCCESS,
        Ok(ExitReason::ServiceUnavailable) => {
            eprintln!("The prediction service is unavailable.");
            ExitCode::from(2)
        }
        Err(e) => {
            eprintln!("❌ {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init(path: Option<PathBuf>) -> ExitCode {
    let Some(path) = path.or_else(config::default_config_path) else {
        eprintln!("❌ No config directory found; pass a path: plantrecog init <FILE>");
        return ExitCode::FAILURE;
    };

    match config::init_config(&path) {
        Ok(true) => {
            eprintln!("✅ Wrote {}", path.display());
            ExitCode::SUCCESS
        }
        Ok(false) => {
            eprintln!("Config already exists: {}", path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("❌ Failed to write {}: {}", path.display(), e);
            ExitCode::FAILURE
        }
    }
}
