use hyper::StatusCode;
use thiserror::Error;

use crate::arithmetic::ArithmeticError;

/// Failures surfaced by the arithmetic route
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Missing or non-numeric operand
    #[error("{0}")]
    InvalidInput(&'static str),

    #[error(transparent)]
    Arithmetic(#[from] ArithmeticError),

    /// Anything the client could not have caused
    #[error("{0}")]
    Unexpected(String),
}

impl ServiceError {
    pub const TWO_OPERANDS_REQUIRED: &'static str = "Please provide valid numbers for n1 and n2.";
    pub const ONE_OPERAND_REQUIRED: &'static str = "Please provide a valid number for n1.";

    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidInput(_) | Self::Arithmetic(_) => StatusCode::BAD_REQUEST,
            Self::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
