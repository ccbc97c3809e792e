use anyhow::Result;
use tablectl_core::Settings;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod local;

fn main() -> Result<()> {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();
    let settings = Settings::from_env();

    // Probing failures are registration defects and propagate uncaught.
    let registry = commands::build_registry(&settings)?;

    std::process::exit(registry.run(&settings, &args));
}

fn init_tracing() {
    // RUST_LOG wins; otherwise keep the examples quiet by default.
    let filter = if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::EnvFilter::from_default_env()
    } else {
        tracing_subscriber::EnvFilter::new("tablectl=warn,tablectl_core=warn")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true).compact())
        .init();
}
