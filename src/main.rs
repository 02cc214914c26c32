//! Claim agent binary
//!
//! Requires a mode argument (`live`, `claim` or `transfer`) and
//! configuration from the environment; a `.env` file is honored.

use arb_claimer::{run, Config, Mode, USAGE};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mode = match std::env::args().nth(1) {
        Some(arg) => match arg.parse::<Mode>() {
            Ok(mode) => mode,
            Err(err) => {
                eprintln!("{err}\n\n{USAGE}");
                std::process::exit(2);
            }
        },
        None => {
            eprintln!("{USAGE}");
            std::process::exit(2);
        }
    };

    let config = Config::from_env()?;
    run(mode, config).await
}
