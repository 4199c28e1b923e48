use thiserror::Error;

use crate::math::DegenerateInputError;

/// Exit code for bad arguments and file I/O failures.
pub const EXIT_USAGE: u8 = 2;
/// Exit code when the dataset cannot be regressed.
pub const EXIT_DEGENERATE: u8 = 3;
/// Exit code for terminal/runtime failures.
pub const EXIT_RUNTIME: u8 = 4;

/// Application-level error carrying the process exit code.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<DegenerateInputError> for AppError {
    fn from(err: DegenerateInputError) -> Self {
        Self::new(EXIT_DEGENERATE, format!("Cannot fit regression line: {err}."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degenerate_input_maps_to_its_exit_code() {
        let err = AppError::from(DegenerateInputError::ConstantX);
        assert_eq!(err.exit_code(), EXIT_DEGENERATE);
        assert!(err.to_string().starts_with("Cannot fit regression line:"));
    }
}
