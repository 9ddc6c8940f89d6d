use crate::domain::{
    Command, Error,
    traits::{CommandStream, DeadLetterQueue, Report},
};
use crate::ledger::AccountLedger;

use futures::StreamExt;
use tracing::info;

#[derive(Debug)]
pub struct Engine<I, O, D>
where
    I: CommandStream,
    O: Report,
    D: DeadLetterQueue,
{
    ingestion: I,
    report: O,
    dlq: D,
    ledger: AccountLedger,
}

impl<I, O, D> Engine<I, O, D>
where
    I: CommandStream,
    O: Report,
    D: DeadLetterQueue,
{
    pub fn new(ingestion: I, report: O, dlq: D, ledger: AccountLedger) -> Self {
        Self {
            ingestion,
            report,
            dlq,
            ledger,
        }
    }

    /// Applies every command in the stream. Failures go to the DLQ and
    /// processing carries on with the next command.
    pub async fn process(&mut self) -> Result<(), Error> {
        let mut res = self.ingestion.stream();
        let (mut applied, mut failed) = (0usize, 0usize);

        while let Some(cmd) = res.next().await {
            match cmd.and_then(|cmd| self.apply_command(cmd)) {
                Ok(()) => applied += 1,
                Err(e) => {
                    failed += 1;
                    self.dlq.report(&e);
                }
            }
        }

        info!(applied, failed, accounts = self.ledger.len(), "script processed");
        Ok(())
    }

    fn apply_command(&mut self, cmd: Command) -> Result<(), Error> {
        match cmd {
            Command::Open { initial_balance } => {
                let id = self.ledger.create_account(initial_balance)?;
                info!(account = %id, balance = %initial_balance, "account opened");
            }
            Command::Deposit { account, amount } => {
                self.ledger.deposit(account, amount)?;
            }
            Command::Withdraw { account, amount } => {
                self.ledger.withdraw(account, amount)?;
            }
            Command::Transfer { from, to, amount } => {
                self.ledger.transfer(from, to, amount)?;
            }
            Command::Balance { account } => {
                let balance = self.ledger.get_balance(account)?;
                info!(account = %account, %balance, "balance");
            }
        }
        Ok(())
    }

    pub fn ledger(&self) -> &AccountLedger {
        &self.ledger
    }

    pub fn flush(&mut self) {
        self.report.flush(&self.ledger);
    }
}
