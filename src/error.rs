use crate::config::ConfigError;
use crate::gate::GateError;
use crate::ledger::LedgerError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Gate(#[from] GateError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
