use thiserror::Error;

/// Domain errors raised by the arithmetic dispatcher.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArithmeticError {
    #[error("Division by zero is not allowed.")]
    DivisionByZero,

    #[error("Modulo by zero is not allowed.")]
    ModuloByZero,

    #[error("Square root of negative number is not allowed.")]
    NegativeOperand,

    /// The identifier does not name a supported operation.
    #[error("Invalid operation")]
    UnsupportedOperation(String),
}
