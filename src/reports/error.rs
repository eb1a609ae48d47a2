use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReportError {
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
}
