pub mod config;
pub mod dlq;
pub mod domain;
pub mod engine;
pub mod ingestion;
pub mod ledger;
pub mod report;
pub mod telemetry;

pub use domain::{Account, AccountId, Command, CredentialError, Error, LedgerError, Money};
pub use ledger::{AccountLedger, LedgerConfig};
