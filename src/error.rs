use thiserror::Error;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("phone already registered")]
    PhoneAlreadyRegistered,
    #[error("amount must be greater than zero")]
    AmountMustBePositive,
    #[error("account not found")]
    AccountNotFound,
    #[error("amount overflow")]
    AmountOverflow,
    #[error("not enough balance")]
    NotEnoughBalance,
    #[error("payment not found")]
    PaymentNotFound,
    #[error("payment already rejected")]
    PaymentAlreadyRejected,
    #[error("favorite not found")]
    FavoriteNotFound,
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Aggregation worker failed: {0}")]
    Worker(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, LedgerError>;
