use futures::Stream;

use crate::domain::{Command, Error};
use crate::ledger::AccountLedger;

pub trait CommandStream {
    type CmdStream: Stream<Item = Result<Command, Error>> + Send + Unpin + 'static;
    fn stream(&mut self) -> Self::CmdStream;
}

pub trait DeadLetterQueue {
    fn report(&self, error: &Error);
}

pub trait Report {
    fn flush(&mut self, ledger: &AccountLedger);
}
