pub mod account;
pub mod command;
pub mod credentials;
pub mod error;
pub mod money;
pub mod traits;

pub use account::{Account, AccountId};
pub use command::Command;
pub use error::{CredentialError, Error, LedgerError};
pub use money::Money;
pub use traits::{CommandStream, DeadLetterQueue, Report};
