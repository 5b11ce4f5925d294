//! Sales domain error types
//!
//! Errors raised while building or loading a sales series and while
//! computing statistics over it.

use thiserror::Error;

/// Errors that can occur in the sales domain
#[derive(Error, Debug)]
pub enum SalesError {
    /// No monthly records were supplied
    #[error("Dataset is empty: at least one monthly record is required")]
    EmptyDataset,

    /// A month cell could not be recognized
    #[error("Invalid month '{value}' on line {line}")]
    InvalidMonth { line: u64, value: String },

    /// A units cell was not a non-negative integer
    #[error("Invalid units sold '{value}' on line {line}")]
    InvalidUnits { line: u64, value: String },

    /// Months must strictly increase in calendar order
    #[error("Month {month} is out of calendar order or repeated")]
    OutOfOrder { month: String },

    /// CSV reader failure
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for sales operations
pub type SalesResult<T> = Result<T, SalesError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SalesError::EmptyDataset;
        assert_eq!(
            err.to_string(),
            "Dataset is empty: at least one monthly record is required"
        );

        let err = SalesError::InvalidMonth {
            line: 3,
            value: "13월".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid month '13월' on line 3");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let sales_err: SalesError = io_err.into();
        assert!(matches!(sales_err, SalesError::Io(_)));
    }
}
