use std::io::Write;

use clap::Parser;
use log::LevelFilter;

use essence_docs::cli::{self, Cli};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    std::process::exit(cli::run(&cli));
}

fn init_logging(verbosity: u8) {
    let mut builder = env_logger::Builder::new();
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    builder.filter_level(level);
    // RUST_LOG still wins for targeted filters.
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    builder.format(|fmt, record| writeln!(fmt, "[{}] {}", record.level(), record.args()));
    let _ = builder.try_init();
}
