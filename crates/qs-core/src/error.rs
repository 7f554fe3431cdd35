use thiserror::Error;

pub type QsResult<T> = Result<T, QsError>;

#[derive(Error, Debug)]
pub enum QsError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },
}
