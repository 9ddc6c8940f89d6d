use rust_decimal::Decimal;

use crate::domain::LedgerError;

/// Identifier handed out by the ledger. Never reused within a process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AccountId(pub u32);

impl core::fmt::Display for AccountId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    id: AccountId,
    balance: Decimal, // never negative
}

impl Account {
    pub(crate) fn new(id: AccountId, balance: Decimal) -> Self {
        Self { id, balance }
    }

    pub fn id(&self) -> AccountId {
        self.id
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    /// Balance after adding `amount`. Does not modify the account.
    pub(crate) fn credited(&self, amount: Decimal) -> Result<Decimal, LedgerError> {
        self.balance
            .checked_add(amount)
            .ok_or(LedgerError::Overflow(self.id))
    }

    /// Balance after removing `amount`. Does not modify the account.
    pub(crate) fn debited(&self, amount: Decimal) -> Result<Decimal, LedgerError> {
        if amount > self.balance {
            return Err(LedgerError::InsufficientFunds {
                account: self.id,
                requested: amount,
                available: self.balance,
            });
        }
        self.balance
            .checked_sub(amount)
            .ok_or(LedgerError::Overflow(self.id))
    }

    pub(crate) fn set_balance(&mut self, balance: Decimal) {
        debug_assert!(balance >= Decimal::ZERO);
        self.balance = balance;
    }
}

impl core::fmt::Display for Account {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut shown = self.balance.round_dp(2);
        shown.rescale(2);
        write!(f, "Account Number: {}, Balance: ${}", self.id, shown)
    }
}
