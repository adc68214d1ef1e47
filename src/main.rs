use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use compass_registry::cli::{self, Cli};
use compass_registry::config::RegistryConfig;

fn main() {
    let args = Cli::parse();
    let config = RegistryConfig::load_or_default(&args.config);

    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.node.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    if let Err(e) = cli::run(args.command, &config) {
        error!(kind = ?e.kind(), "{}", e);
        std::process::exit(1);
    }
}
