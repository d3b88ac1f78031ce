//! Arithmetic dispatch module
//!
//! Maps an operation identifier to its implementing function and executes it.
//! Everything here is pure; HTTP concerns live in the handler module.

mod error;
mod operation;

pub use error::ArithmeticError;
pub use operation::Operation;

/// Execute `operation` on the given operands.
///
/// `n2` is ignored by single-operand operations (`sqrt`).
pub fn perform(operation: Operation, n1: f64, n2: f64) -> Result<f64, ArithmeticError> {
    match operation {
        Operation::Add => Ok(n1 + n2),
        Operation::Subtract => Ok(n1 - n2),
        Operation::Multiply => Ok(n1 * n2),
        Operation::Divide => {
            if n2 == 0.0 {
                return Err(ArithmeticError::DivisionByZero);
            }
            Ok(n1 / n2)
        }
        Operation::Exponentiation => Ok(n1.powf(n2)),
        Operation::Sqrt => {
            if n1 < 0.0 {
                return Err(ArithmeticError::NegativeOperand);
            }
            Ok(n1.sqrt())
        }
        Operation::Modulo => {
            if n2 == 0.0 {
                return Err(ArithmeticError::ModuloByZero);
            }
            Ok(n1 % n2)
        }
    }
}
