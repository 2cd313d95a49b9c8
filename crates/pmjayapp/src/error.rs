use chrono::NaiveDate;
use thiserror::Error;

/// A record that cannot be laid out. Raised before any page is produced.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("date {date} is before date of admission {admission}")]
    DateBeforeAdmission {
        date: NaiveDate,
        admission: NaiveDate,
    },

    #[error("date {date} is before date of birth {birth}")]
    DateBeforeBirth { date: NaiveDate, birth: NaiveDate },

    #[error("date of admission {admission} is before date of birth {birth}")]
    AdmissionBeforeBirth {
        admission: NaiveDate,
        birth: NaiveDate,
    },

    #[error("number of days must be at least 1")]
    EmptyStay,

    #[error("a stay of {days} days starting {start} runs past the last representable date")]
    DateOutOfRange { start: NaiveDate, days: u32 },
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("row {row}: malformed {column} {value:?}: {source}")]
    MalformedDate {
        row: usize,
        column: &'static str,
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("row {row}: unknown gender {value:?}")]
    MalformedGender { row: usize, value: String },

    #[error("row {row}: expected {expected} columns, found {found}")]
    ColumnCount {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Store error: {0}")]
    Backend(String),
}

#[derive(Error, Debug)]
pub enum PmjayError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Render error: {0}")]
    Render(String),

    #[error("Print error: {0}")]
    Print(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Api Error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, PmjayError>;
pub type StoreResult<T> = std::result::Result<T, StoreError>;
