use std::fmt;
use std::str::FromStr;

use super::ArithmeticError;

/// Supported arithmetic operations, keyed by their route identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
    Exponentiation,
    Sqrt,
    Modulo,
}

impl Operation {
    pub const ALL: [Self; 7] = [
        Self::Add,
        Self::Subtract,
        Self::Multiply,
        Self::Divide,
        Self::Exponentiation,
        Self::Sqrt,
        Self::Modulo,
    ];

    /// Route identifier for this operation
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Subtract => "subtract",
            Self::Multiply => "multiply",
            Self::Divide => "divide",
            Self::Exponentiation => "exponentiation",
            Self::Sqrt => "sqrt",
            Self::Modulo => "modulo",
        }
    }

    /// Number of operands the operation consumes
    pub const fn arity(self) -> usize {
        match self {
            Self::Sqrt => 1,
            _ => 2,
        }
    }
}

impl FromStr for Operation {
    type Err = ArithmeticError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| ArithmeticError::UnsupportedOperation(s.to_string()))
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_operations() {
        for op in Operation::ALL {
            assert_eq!(op.as_str().parse::<Operation>(), Ok(op));
        }
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        assert_eq!(
            "Add".parse::<Operation>(),
            Err(ArithmeticError::UnsupportedOperation("Add".to_string()))
        );
    }

    #[test]
    fn test_parse_unknown() {
        let err = "foo".parse::<Operation>().unwrap_err();
        assert_eq!(err.to_string(), "Invalid operation");
    }

    #[test]
    fn test_arity() {
        assert_eq!(Operation::Sqrt.arity(), 1);
        assert_eq!(Operation::Add.arity(), 2);
        assert_eq!(Operation::Modulo.arity(), 2);
    }
}
