use std::path::PathBuf;

use crate::domain::Error;
use crate::domain::credentials::validate_pin;
use crate::ledger::LedgerConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub script: PathBuf,
    pub pin: Option<String>,
    pub ledger: LedgerConfig,
}

impl Config {
    /// Parses `<script.csv> [--pin <PIN>]`. The first item is the program name.
    /// A PIN, when given, must pass [`validate_pin`].
    pub fn from_args<I>(args: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter().skip(1);
        let mut script = None;
        let mut pin = None;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--pin" => {
                    let value = args
                        .next()
                        .ok_or_else(|| Error::Config("--pin requires a value".to_string()))?;
                    validate_pin(&value)?;
                    pin = Some(value);
                }
                flag if flag.starts_with("--") => {
                    return Err(Error::Config(format!("unknown option {}", flag)));
                }
                _ if script.is_none() => script = Some(PathBuf::from(arg)),
                _ => return Err(Error::Config(format!("unexpected argument {}", arg))),
            }
        }

        let script =
            script.ok_or_else(|| Error::Config("no command script was provided".to_string()))?;

        Ok(Self {
            script,
            pin,
            ledger: LedgerConfig::default(),
        })
    }
}
