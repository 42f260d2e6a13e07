//! Error types shared by every helper in the crate.
//!
//! Helpers on [`crate::Toolkit`] never hand these back; they report them and
//! return a best-effort value. The [`crate::convert`] functions return them
//! inside [`Recovered`] for callers that need to tell the two cases apart.

use std::num::ParseIntError;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidInteger,
    IntegerOutOfRange,
    TypeMismatch,
    Json,
    Read,
    Form,
    Render,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::InvalidInteger => "invalid_integer",
            ErrorKind::IntegerOutOfRange => "integer_out_of_range",
            ErrorKind::TypeMismatch => "type_mismatch",
            ErrorKind::Json => "json",
            ErrorKind::Read => "read",
            ErrorKind::Form => "form",
            ErrorKind::Render => "render",
        }
    }
}

#[derive(Debug, Error)]
pub enum UtilityError {
    #[error("invalid integer {input:?}: {source}")]
    InvalidInteger {
        input: String,
        #[source]
        source: ParseIntError,
    },

    #[error("integer {input:?} out of range for {width}-bit value")]
    IntegerOutOfRange { input: String, width: u8 },

    #[error("{operation}: expected {expected} value, found {found}")]
    TypeMismatch {
        operation: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    #[error("json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("read body: {0}")]
    Read(#[from] std::io::Error),

    #[error("form: {0}")]
    Form(String),

    #[error("render: {0}")]
    Render(String),
}

impl UtilityError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            UtilityError::InvalidInteger { .. } => ErrorKind::InvalidInteger,
            UtilityError::IntegerOutOfRange { .. } => ErrorKind::IntegerOutOfRange,
            UtilityError::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            UtilityError::Json(_) => ErrorKind::Json,
            UtilityError::Read(_) => ErrorKind::Read,
            UtilityError::Form(_) => ErrorKind::Form,
            UtilityError::Render(_) => ErrorKind::Render,
        }
    }

    pub fn type_mismatch(
        operation: &'static str,
        expected: &'static str,
        found: &'static str,
    ) -> Self {
        Self::TypeMismatch {
            operation,
            expected,
            found,
        }
    }
}

/// A best-effort value paired with the failure that produced it, if any.
///
/// `value` is always usable: on failure it holds the zero value or whatever
/// partial result the conversion could salvage.
#[derive(Debug)]
pub struct Recovered<T> {
    pub value: T,
    pub error: Option<UtilityError>,
}

impl<T> Recovered<T> {
    pub fn ok(value: T) -> Self {
        Self { value, error: None }
    }

    pub fn failed(value: T, error: UtilityError) -> Self {
        Self {
            value,
            error: Some(error),
        }
    }

    pub fn is_clean(&self) -> bool {
        self.error.is_none()
    }

    pub fn kind(&self) -> Option<ErrorKind> {
        self.error.as_ref().map(UtilityError::kind)
    }

    /// Drop the error and keep the best-effort value.
    pub fn into_value(self) -> T {
        self.value
    }

    pub fn into_parts(self) -> (T, Option<UtilityError>) {
        (self.value, self.error)
    }

    /// Strict view: any recorded failure becomes an `Err`.
    pub fn into_result(self) -> Result<T, UtilityError> {
        match self.error {
            None => Ok(self.value),
            Some(err) => Err(err),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Recovered<U> {
        Recovered {
            value: f(self.value),
            error: self.error,
        }
    }
}

impl<T: Default> Recovered<T> {
    pub fn zero(error: UtilityError) -> Self {
        Self::failed(T::default(), error)
    }
}
