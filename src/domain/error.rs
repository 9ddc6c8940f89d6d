use rust_decimal::Decimal;

use crate::domain::AccountId;

/// Failures of a single ledger operation. The ledger is unchanged after any of them.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    #[error("invalid amount: {0}")]
    InvalidAmount(Decimal),

    #[error("insufficient funds in account {account}: requested {requested}, available {available}")]
    InsufficientFunds {
        account: AccountId,
        requested: Decimal,
        available: Decimal,
    },

    #[error("unknown account {0}")]
    UnknownAccount(AccountId),

    #[error("invalid transfer from {from} to {to}")]
    InvalidAccount { from: AccountId, to: AccountId },

    #[error("balance of account {0} would overflow")]
    Overflow(AccountId),

    #[error("no account identifiers left")]
    IdsExhausted,

    #[error("invalid number of accounts: {requested}, expected between 1 and {max}")]
    InvalidBatchSize { requested: usize, max: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CredentialError {
    #[error("PIN must be exactly {expected} characters")]
    PinLength { expected: usize },

    #[error("PIN must contain digits only")]
    PinFormat,

    #[error("password is too short")]
    PasswordTooShort,

    #[error("password is too long")]
    PasswordTooLong,

    #[error("password must contain at least one uppercase letter")]
    MissingUppercase,

    #[error("password must contain at least one lowercase letter")]
    MissingLowercase,

    #[error("password must contain at least one digit")]
    MissingDigit,

    #[error("password must contain at least one special character")]
    MissingSpecial,
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Ingestion failed with: {0}")]
    Ingestion(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error(transparent)]
    Credentials(#[from] CredentialError),
}
