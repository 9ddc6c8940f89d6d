use std::io::{self, Write};

use crate::domain::{Money, Report};
use crate::ledger::AccountLedger;

/// Writes the ledger as `account,balance` CSV, sorted by account id.
#[derive(Debug)]
pub struct CsvReport<W: Write> {
    out: W,
}

pub type StdOutReport = CsvReport<io::Stdout>;

impl StdOutReport {
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write> CsvReport<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write(&mut self, ledger: &AccountLedger) -> io::Result<()> {
        let mut accounts: Vec<_> = ledger.accounts().collect();
        accounts.sort_by_key(|account| account.id());

        writeln!(self.out, "account,balance")?;
        for account in accounts {
            match Money::new(account.balance()) {
                Some(balance) => writeln!(self.out, "{},{}", account.id(), balance)?,
                // too wide for four places, print it as held
                None => writeln!(self.out, "{},{}", account.id(), account.balance())?,
            }
        }
        self.out.flush()
    }
}

impl<W: Write> Report for CsvReport<W> {
    fn flush(&mut self, ledger: &AccountLedger) {
        if let Err(error) = self.write(ledger) {
            tracing::error!(%error, "failed to write report");
        }
    }
}
