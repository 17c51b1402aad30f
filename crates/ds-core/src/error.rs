use thiserror::Error;

pub type CoreResult<T> = Result<T, CoreError>;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Month out of range: {month} (expected 1-12)")]
    MonthOutOfRange { month: u32 },
}
