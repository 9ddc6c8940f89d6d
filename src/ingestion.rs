use std::io::Read;
use std::pin::Pin;

use futures::stream::{self, Stream};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::domain::traits::CommandStream;
use crate::domain::{AccountId, Command, Error, Money};

pub struct CsvReader<R: Read> {
    reader: Option<csv::Reader<R>>,
}

impl<R: Read> CsvReader<R> {
    pub fn new(reader: R) -> Self {
        let rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        Self { reader: Some(rdr) }
    }
}

/// Internal shape used only for CSV deserialization.
#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    account: Option<u32>,
    #[serde(default)]
    to: Option<u32>,
    #[serde(default)]
    amount: Option<Money>,
}

fn required<T>(value: Option<T>, field: &str, kind: &str) -> Result<T, Error> {
    value.ok_or_else(|| Error::Ingestion(format!("{} requires field '{}'", kind, field)))
}

impl TryFrom<CsvRow> for Command {
    type Error = Error;

    fn try_from(row: CsvRow) -> Result<Self, Self::Error> {
        let kind = row.kind.to_ascii_lowercase();
        let account = |field: &str| required(row.account.map(AccountId), field, &kind);
        let amount = |field: &str| required(row.amount.map(Decimal::from), field, &kind);

        let command = match kind.as_str() {
            "open" => Command::Open {
                initial_balance: row.amount.unwrap_or_else(Money::zero).into(),
            },
            "deposit" => Command::Deposit {
                account: account("account")?,
                amount: amount("amount")?,
            },
            "withdraw" | "withdrawal" => Command::Withdraw {
                account: account("account")?,
                amount: amount("amount")?,
            },
            "transfer" => Command::Transfer {
                from: account("account")?,
                to: required(row.to.map(AccountId), "to", &kind)?,
                amount: amount("amount")?,
            },
            "balance" => Command::Balance {
                account: account("account")?,
            },
            other => {
                return Err(Error::Ingestion(format!(
                    "Invalid command type: {}",
                    other
                )));
            }
        };

        Ok(command)
    }
}

impl<R: Read + Send + 'static> CommandStream for CsvReader<R> {
    type CmdStream = Pin<Box<dyn Stream<Item = Result<Command, Error>> + Send>>;

    fn stream(&mut self) -> Self::CmdStream {
        let reader = match self.reader.take() {
            Some(r) => r,
            None => {
                // Already consumed; return an empty stream.
                return Box::pin(stream::iter(Vec::<Result<Command, Error>>::new()));
            }
        };

        // into_deserialize consumes the reader and returns an owning iterator
        let iter = reader
            .into_deserialize::<CsvRow>()
            .map(|row_res| match row_res {
                Ok(row) => Command::try_from(row),
                Err(e) => Err(Error::Ingestion(format!(
                    "CSV deserialization error: {}",
                    e
                ))),
            });

        Box::pin(stream::iter(iter))
    }
}
