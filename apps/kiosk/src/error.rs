//! # Kiosk Error Type
//!
//! Every command returns `Result<_, KioskError>`. Errors are printed to the
//! user with a short machine-readable code and never end the session.
//!
//! ```text
//!   > add 99
//!   ! [NOT_FOUND] Product not found: 99
//!   > go /order
//!   ! [LOAD_FAILED] Failed to load view order-page: fetch failed: ...
//! ```

use cafe_core::CoreError;
use cafe_shell::ShellError;
use thiserror::Error;

/// Error codes shown next to error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Unknown product or cart line.
    NotFound,

    /// Input or data validation failed.
    ValidationError,

    /// Cart limits exceeded.
    CartError,

    /// A view module could not be loaded.
    LoadFailed,

    /// Command could not be parsed.
    Usage,

    /// Anything else.
    Internal,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::CartError => "CART_ERROR",
            ErrorCode::LoadFailed => "LOAD_FAILED",
            ErrorCode::Usage => "USAGE",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

/// Kiosk error type.
#[derive(Debug, Error)]
pub enum KioskError {
    #[error("{0}")]
    Usage(String),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Shell(#[from] ShellError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl KioskError {
    pub fn usage(message: impl Into<String>) -> Self {
        KioskError::Usage(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            KioskError::Usage(_) => ErrorCode::Usage,
            KioskError::Core(err) | KioskError::Shell(ShellError::Core(err)) => core_code(err),
            KioskError::Shell(ShellError::ModuleLoad { .. }) => ErrorCode::LoadFailed,
            KioskError::Shell(ShellError::MenuUnavailable(_)) => ErrorCode::NotFound,
            KioskError::Shell(_) | KioskError::Io(_) => ErrorCode::Internal,
        }
    }
}

fn core_code(err: &CoreError) -> ErrorCode {
    match err {
        CoreError::ProductNotFound(_) | CoreError::NotInCart(_) => ErrorCode::NotFound,
        CoreError::CartTooLarge { .. } | CoreError::QuantityTooLarge { .. } => ErrorCode::CartError,
        CoreError::MalformedMenu(_) | CoreError::Validation(_) => ErrorCode::ValidationError,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cafe_core::ViewKind;
    use cafe_shell::LoadError;

    #[test]
    fn test_codes() {
        let err = KioskError::from(CoreError::ProductNotFound("9".into()));
        assert_eq!(err.code(), ErrorCode::NotFound);
        assert_eq!(err.to_string(), CoreError::ProductNotFound("9".into()).to_string());

        let err = KioskError::from(ShellError::ModuleLoad {
            view: ViewKind::Details,
            source: LoadError::Missing(ViewKind::Details),
        });
        assert_eq!(err.code().as_str(), "LOAD_FAILED");

        let err = KioskError::from(ShellError::Core(CoreError::CartTooLarge { max: 1 }));
        assert_eq!(err.code(), ErrorCode::CartError);
    }
}
