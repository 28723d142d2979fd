use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Authorization required")]
    Unauthenticated,

    #[error("Only one field may carry an inequality filter: '{first}' and '{second}' both do")]
    InvalidFilterCombination { first: String, second: String },

    #[error("Unknown query field '{0}'")]
    UnknownQueryField(String),

    #[error("Unknown filter operator '{0}'")]
    UnknownOperator(String),

    #[error("Invalid filter value: {0}")]
    InvalidFilterValue(String),

    #[error("Type mismatch: {0}")]
    TypeMismatch(String),

    #[error("Store error: {0}")]
    Store(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;
