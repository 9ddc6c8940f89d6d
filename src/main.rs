use std::{env, fs::File};

use atm_ledger::{
    AccountLedger, config::Config, dlq::StdErrDLQ, engine::Engine, ingestion::CsvReader,
    report::StdOutReport, telemetry,
};

#[tokio::main] // using Tokio runtime for async
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    telemetry::init();

    // Rejects a malformed --pin before any command runs
    let config = Config::from_args(env::args())?;

    let file = File::open(&config.script)?;

    // Initialize engine with injected components
    let mut engine = Engine::new(
        CsvReader::new(file),
        StdOutReport::stdout(),
        StdErrDLQ::default(),
        AccountLedger::with_config(config.ledger),
    );

    engine.process().await?;
    engine.flush();

    Ok(())
}
