use std::env;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use search_demo::{DemoConfig, DemoError, Dependencies};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    // LOG_FORMAT=json for machine-readable logs
    if env::var("LOG_FORMAT").is_ok_and(|format| format.eq_ignore_ascii_case("json")) {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> Result<(), DemoError> {
    dotenv::dotenv().ok();
    init_tracing();

    let config = DemoConfig::from_env()
        .inspect_err(|e| error!(error = %e, "Invalid configuration"))?;
    let dependencies = Dependencies::new(&config)?;

    let summary = dependencies
        .runner
        .run(&config.records, &config.query)
        .await;

    info!(success = summary.is_success(), "Search demo finished");
    Ok(())
}
