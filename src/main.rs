use clap::Parser;
use quill::Backend;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "quill", about = "Keyboard-driven journal for your terminal")]
struct Args {
    /// Storage backend to use
    #[arg(short, long, value_enum)]
    backend: Option<Backend>,

    /// Data directory for posts, focus state, and config
    #[arg(short, long)]
    data_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();

    // Initialize file logger - writes to quill.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("quill.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    log::info!("quill starting up");

    let config = quill::core::config::load_config()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
    let resolved = quill::core::config::resolve(
        &config,
        args.backend.as_ref().map(Backend::as_str),
        args.data_dir.as_deref(),
    );

    log::info!(
        "Backend: {}, data dir: {}",
        resolved.backend,
        resolved.data_dir.display()
    );

    quill::tui::run(resolved)
}
