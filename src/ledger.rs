use std::collections::HashMap;

use rust_decimal::Decimal;
use tracing::debug;

use crate::domain::{Account, AccountId, LedgerError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedgerConfig {
    pub first_id: u32,
    /// Upper bound for [`AccountLedger::create_accounts`].
    pub max_batch: usize,
}

impl LedgerConfig {
    pub const FIRST_ID: u32 = 1001;
    pub const MAX_BATCH: usize = 3;
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            first_id: Self::FIRST_ID,
            max_batch: Self::MAX_BATCH,
        }
    }
}

/// In-memory owner of every account. Balances only change through the
/// operations below, and a failed operation leaves the ledger untouched.
#[derive(Debug)]
pub struct AccountLedger {
    accounts: HashMap<AccountId, Account>,
    // u64 so that handing out u32::MAX itself cannot overflow
    next_id: u64,
    max_batch: usize,
}

impl Default for AccountLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl AccountLedger {
    pub fn new() -> Self {
        Self::with_config(LedgerConfig::default())
    }

    pub fn with_config(config: LedgerConfig) -> Self {
        Self {
            accounts: HashMap::new(),
            next_id: u64::from(config.first_id),
            max_batch: config.max_batch,
        }
    }

    /// Opens an account with a zero balance.
    pub fn open_account(&mut self) -> Result<AccountId, LedgerError> {
        self.insert(Decimal::ZERO)
    }

    pub fn create_account(&mut self, initial_balance: Decimal) -> Result<AccountId, LedgerError> {
        if initial_balance < Decimal::ZERO {
            return Err(LedgerError::InvalidAmount(initial_balance));
        }
        self.insert(initial_balance)
    }

    /// All or nothing: either `count` accounts are opened or none are.
    pub fn create_accounts(&mut self, count: usize) -> Result<Vec<AccountId>, LedgerError> {
        if count == 0 || count > self.max_batch {
            return Err(LedgerError::InvalidBatchSize {
                requested: count,
                max: self.max_batch,
            });
        }
        if (count as u64) > self.remaining_ids() {
            return Err(LedgerError::IdsExhausted);
        }
        (0..count).map(|_| self.open_account()).collect()
    }

    pub fn deposit(&mut self, id: AccountId, amount: Decimal) -> Result<Decimal, LedgerError> {
        let account = self.account_mut(id)?;
        check_positive(amount)?;

        let balance = account.credited(amount)?;
        account.set_balance(balance);
        debug!(account = %id, %amount, %balance, "deposit");
        Ok(balance)
    }

    pub fn withdraw(&mut self, id: AccountId, amount: Decimal) -> Result<Decimal, LedgerError> {
        let account = self.account_mut(id)?;
        check_positive(amount)?;

        let balance = account.debited(amount)?;
        account.set_balance(balance);
        debug!(account = %id, %amount, %balance, "withdraw");
        Ok(balance)
    }

    /// Moves `amount` between two distinct accounts. Both new balances are
    /// computed before either account is written.
    pub fn transfer(
        &mut self,
        from: AccountId,
        to: AccountId,
        amount: Decimal,
    ) -> Result<(Decimal, Decimal), LedgerError> {
        let (Some(source), Some(destination)) = (self.accounts.get(&from), self.accounts.get(&to))
        else {
            return Err(LedgerError::InvalidAccount { from, to });
        };
        if from == to {
            return Err(LedgerError::InvalidAccount { from, to });
        }
        check_positive(amount)?;

        let from_balance = source.debited(amount)?;
        let to_balance = destination.credited(amount)?;

        self.account_mut(from)?.set_balance(from_balance);
        self.account_mut(to)?.set_balance(to_balance);
        debug!(%from, %to, %amount, %from_balance, %to_balance, "transfer");
        Ok((from_balance, to_balance))
    }

    pub fn get_balance(&self, id: AccountId) -> Result<Decimal, LedgerError> {
        self.account(id).map(Account::balance)
    }

    pub fn account(&self, id: AccountId) -> Result<&Account, LedgerError> {
        self.accounts.get(&id).ok_or(LedgerError::UnknownAccount(id))
    }

    /// Accounts in no particular order.
    pub fn accounts(&self) -> impl Iterator<Item = &Account> {
        self.accounts.values()
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    fn account_mut(&mut self, id: AccountId) -> Result<&mut Account, LedgerError> {
        self.accounts
            .get_mut(&id)
            .ok_or(LedgerError::UnknownAccount(id))
    }

    fn remaining_ids(&self) -> u64 {
        (u64::from(u32::MAX) + 1).saturating_sub(self.next_id)
    }

    fn insert(&mut self, balance: Decimal) -> Result<AccountId, LedgerError> {
        let id = u32::try_from(self.next_id)
            .map(AccountId)
            .map_err(|_| LedgerError::IdsExhausted)?;
        self.next_id += 1;
        self.accounts.insert(id, Account::new(id, balance));
        debug!(account = %id, %balance, "account opened");
        Ok(id)
    }
}

fn check_positive(amount: Decimal) -> Result<(), LedgerError> {
    if amount <= Decimal::ZERO {
        return Err(LedgerError::InvalidAmount(amount));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    #[test]
    fn ids_start_at_1001_and_increase() {
        let mut ledger = AccountLedger::new();
        assert_eq!(ledger.open_account(), Ok(AccountId(1001)));
        assert_eq!(ledger.create_account(dec!(5)).unwrap(), AccountId(1002));
        assert_eq!(ledger.len(), 2);
    }

    #[test]
    fn negative_initial_balance_creates_nothing() {
        let mut ledger = AccountLedger::new();
        assert_eq!(
            ledger.create_account(dec!(-10)),
            Err(LedgerError::InvalidAmount(dec!(-10)))
        );
        assert!(ledger.is_empty());
        // the rejected call must not burn an id
        assert_eq!(ledger.open_account(), Ok(AccountId(1001)));
    }

    #[test]
    fn deposit_into_empty_account() {
        let mut ledger = AccountLedger::new();
        let id = ledger.open_account().unwrap();
        assert_eq!(ledger.deposit(id, dec!(100)), Ok(dec!(100)));
        assert_eq!(ledger.get_balance(id), Ok(dec!(100)));
    }

    #[test]
    fn deposit_rejects_non_positive_amounts() {
        let mut ledger = AccountLedger::new();
        let id = ledger.open_account().unwrap();
        assert_eq!(
            ledger.deposit(id, Decimal::ZERO),
            Err(LedgerError::InvalidAmount(Decimal::ZERO))
        );
        assert_eq!(
            ledger.deposit(id, dec!(-1)),
            Err(LedgerError::InvalidAmount(dec!(-1)))
        );
        assert_eq!(ledger.get_balance(id), Ok(Decimal::ZERO));
    }

    #[test]
    fn unknown_account_takes_precedence_over_amount() {
        let mut ledger = AccountLedger::new();
        assert_eq!(
            ledger.deposit(AccountId(42), dec!(-1)),
            Err(LedgerError::UnknownAccount(AccountId(42)))
        );
        assert_eq!(
            ledger.withdraw(AccountId(42), dec!(1)),
            Err(LedgerError::UnknownAccount(AccountId(42)))
        );
    }

    #[test]
    fn overdraw_leaves_balance_unchanged() {
        let mut ledger = AccountLedger::new();
        let id = ledger.create_account(dec!(30)).unwrap();
        assert_eq!(
            ledger.withdraw(id, dec!(30.01)),
            Err(LedgerError::InsufficientFunds {
                account: id,
                requested: dec!(30.01),
                available: dec!(30),
            })
        );
        assert_eq!(ledger.get_balance(id), Ok(dec!(30)));
        assert_eq!(ledger.withdraw(id, dec!(30)), Ok(Decimal::ZERO));
    }

    #[test]
    fn transfer_moves_whole_balance() {
        let mut ledger = AccountLedger::new();
        let a = ledger.create_account(dec!(50)).unwrap();
        let b = ledger.open_account().unwrap();
        assert_eq!(ledger.transfer(a, b, dec!(50)), Ok((dec!(0), dec!(50))));
        assert_eq!(ledger.get_balance(a), Ok(dec!(0)));
        assert_eq!(ledger.get_balance(b), Ok(dec!(50)));
    }

    #[test]
    fn failed_transfer_changes_neither_side() {
        let mut ledger = AccountLedger::new();
        let a = ledger.create_account(dec!(40)).unwrap();
        let b = ledger.open_account().unwrap();
        assert!(matches!(
            ledger.transfer(a, b, dec!(50)),
            Err(LedgerError::InsufficientFunds { .. })
        ));
        assert_eq!(ledger.get_balance(a), Ok(dec!(40)));
        assert_eq!(ledger.get_balance(b), Ok(dec!(0)));
    }

    #[test]
    fn transfer_requires_two_distinct_known_accounts() {
        let mut ledger = AccountLedger::new();
        let a = ledger.create_account(dec!(40)).unwrap();
        let missing = AccountId(9999);
        assert_eq!(
            ledger.transfer(a, a, dec!(1)),
            Err(LedgerError::InvalidAccount { from: a, to: a })
        );
        assert_eq!(
            ledger.transfer(a, missing, dec!(1)),
            Err(LedgerError::InvalidAccount { from: a, to: missing })
        );
        assert_eq!(
            ledger.transfer(missing, a, dec!(1)),
            Err(LedgerError::InvalidAccount { from: missing, to: a })
        );
        assert_eq!(ledger.get_balance(a), Ok(dec!(40)));
    }

    #[test]
    fn balance_of_unknown_account() {
        let ledger = AccountLedger::new();
        assert_eq!(
            ledger.get_balance(AccountId(1001)),
            Err(LedgerError::UnknownAccount(AccountId(1001)))
        );
    }

    #[test]
    fn batch_creation_is_bounded() {
        let mut ledger = AccountLedger::new();
        assert_eq!(
            ledger.create_accounts(4),
            Err(LedgerError::InvalidBatchSize {
                requested: 4,
                max: 3
            })
        );
        assert_eq!(
            ledger.create_accounts(0),
            Err(LedgerError::InvalidBatchSize {
                requested: 0,
                max: 3
            })
        );
        assert!(ledger.is_empty());
        assert_eq!(
            ledger.create_accounts(3),
            Ok(vec![AccountId(1001), AccountId(1002), AccountId(1003)])
        );
    }

    #[test]
    fn custom_config() {
        let mut ledger = AccountLedger::with_config(LedgerConfig {
            first_id: 1,
            max_batch: 5,
        });
        assert_eq!(ledger.create_accounts(5).unwrap().len(), 5);
        assert_eq!(ledger.open_account(), Ok(AccountId(6)));
    }

    #[test]
    fn withdraw_rejects_non_positive_amounts() {
        let mut ledger = AccountLedger::new();
        let id = ledger.create_account(dec!(10)).unwrap();
        assert_eq!(
            ledger.withdraw(id, Decimal::ZERO),
            Err(LedgerError::InvalidAmount(Decimal::ZERO))
        );
        assert_eq!(
            ledger.withdraw(id, dec!(-1)),
            Err(LedgerError::InvalidAmount(dec!(-1)))
        );
        assert_eq!(ledger.get_balance(id), Ok(dec!(10)));
    }

    #[test]
    fn transfer_rejects_non_positive_amounts() {
        let mut ledger = AccountLedger::new();
        let a = ledger.create_account(dec!(10)).unwrap();
        let b = ledger.create_account(dec!(5)).unwrap();
        assert_eq!(
            ledger.transfer(a, b, Decimal::ZERO),
            Err(LedgerError::InvalidAmount(Decimal::ZERO))
        );
        assert_eq!(
            ledger.transfer(a, b, dec!(-1)),
            Err(LedgerError::InvalidAmount(dec!(-1)))
        );
        assert_eq!(ledger.get_balance(a), Ok(dec!(10)));
        assert_eq!(ledger.get_balance(b), Ok(dec!(5)));
    }

    #[test]
    fn deposit_past_max_balance_is_rejected() {
        let mut ledger = AccountLedger::new();
        let id = ledger.create_account(Decimal::MAX).unwrap();
        assert_eq!(
            ledger.deposit(id, dec!(1)),
            Err(LedgerError::Overflow(id))
        );
        assert_eq!(ledger.get_balance(id), Ok(Decimal::MAX));
    }

    #[test]
    fn overflowing_transfer_changes_neither_side() {
        let mut ledger = AccountLedger::new();
        let a = ledger.create_account(dec!(1)).unwrap();
        let b = ledger.create_account(Decimal::MAX).unwrap();
        assert_eq!(ledger.transfer(a, b, dec!(1)), Err(LedgerError::Overflow(b)));
        assert_eq!(ledger.get_balance(a), Ok(dec!(1)));
        assert_eq!(ledger.get_balance(b), Ok(Decimal::MAX));
    }

    #[test]
    fn last_identifier_can_be_used_once() {
        let mut ledger = AccountLedger::with_config(LedgerConfig {
            first_id: u32::MAX,
            ..LedgerConfig::default()
        });
        assert_eq!(ledger.open_account(), Ok(AccountId(u32::MAX)));
        assert_eq!(ledger.open_account(), Err(LedgerError::IdsExhausted));
        assert_eq!(
            ledger.create_account(dec!(1)),
            Err(LedgerError::IdsExhausted)
        );
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn batch_that_would_exhaust_identifiers_creates_nothing() {
        let mut ledger = AccountLedger::with_config(LedgerConfig {
            first_id: u32::MAX - 1,
            ..LedgerConfig::default()
        });
        assert_eq!(ledger.create_accounts(3), Err(LedgerError::IdsExhausted));
        assert!(ledger.is_empty());
        assert_eq!(
            ledger.create_accounts(2),
            Ok(vec![AccountId(u32::MAX - 1), AccountId(u32::MAX)])
        );
    }

    #[derive(Debug, Clone)]
    enum Op {
        Deposit(usize, i64),
        Withdraw(usize, i64),
        Transfer(usize, usize, i64),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0..3usize, -500i64..5_000).prop_map(|(a, c)| Op::Deposit(a, c)),
            (0..3usize, -500i64..5_000).prop_map(|(a, c)| Op::Withdraw(a, c)),
            (0..3usize, 0..3usize, -500i64..5_000).prop_map(|(a, b, c)| Op::Transfer(a, b, c)),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: no sequence of operations drives a balance below zero,
        /// and only deposits and withdrawals change the total held.
        #[test]
        fn balances_stay_non_negative(ops in prop::collection::vec(op(), 1..64)) {
            let mut ledger = AccountLedger::new();
            let ids = ledger.create_accounts(3).unwrap();
            let mut expected_total = Decimal::ZERO;

            for op in ops {
                match op {
                    Op::Deposit(a, cents) => {
                        let amount = Decimal::new(cents, 2);
                        if ledger.deposit(ids[a], amount).is_ok() {
                            expected_total += amount;
                        }
                    }
                    Op::Withdraw(a, cents) => {
                        let amount = Decimal::new(cents, 2);
                        if ledger.withdraw(ids[a], amount).is_ok() {
                            expected_total -= amount;
                        }
                    }
                    Op::Transfer(a, b, cents) => {
                        let amount = Decimal::new(cents, 2);
                        let before: Vec<Decimal> =
                            ids.iter().map(|id| ledger.get_balance(*id).unwrap()).collect();
                        match ledger.transfer(ids[a], ids[b], amount) {
                            Ok((from_balance, to_balance)) => {
                                prop_assert_eq!(from_balance, before[a] - amount);
                                prop_assert_eq!(to_balance, before[b] + amount);
                            }
                            Err(_) => {
                                let after: Vec<Decimal> = ids
                                    .iter()
                                    .map(|id| ledger.get_balance(*id).unwrap())
                                    .collect();
                                prop_assert_eq!(after, before);
                            }
                        }
                    }
                }

                for account in ledger.accounts() {
                    prop_assert!(account.balance() >= Decimal::ZERO);
                }
            }

            let total: Decimal = ledger.accounts().map(Account::balance).sum();
            prop_assert_eq!(total, expected_total);
        }
    }
}
