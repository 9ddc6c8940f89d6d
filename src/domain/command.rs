use rust_decimal::Decimal;

use crate::domain::AccountId;

/// One request against the ledger, as an ATM session would issue it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Open { initial_balance: Decimal },
    Deposit { account: AccountId, amount: Decimal },
    Withdraw { account: AccountId, amount: Decimal },
    Transfer { from: AccountId, to: AccountId, amount: Decimal },
    Balance { account: AccountId },
}

impl core::fmt::Display for Command {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Command::Open { initial_balance } => write!(f, "open,amount={}", initial_balance),
            Command::Deposit { account, amount } => {
                write!(f, "deposit,account={},amount={}", account, amount)
            }
            Command::Withdraw { account, amount } => {
                write!(f, "withdraw,account={},amount={}", account, amount)
            }
            Command::Transfer { from, to, amount } => {
                write!(f, "transfer,from={},to={},amount={}", from, to, amount)
            }
            Command::Balance { account } => write!(f, "balance,account={}", account),
        }
    }
}
