use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FfiError {
    InvalidArgument(String),
    InvalidType(String),
    TypeMismatch(String),
}

impl Error for FfiError {}

impl Display for FfiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            FfiError::InvalidArgument(m) => write!(f, "Invalid Argument: {m}"),
            FfiError::InvalidType(m) => write!(f, "Invalid Type: {m}"),
            FfiError::TypeMismatch(m) => write!(f, "Type Mismatch: {m}"),
        }
    }
}

impl FfiError {
    pub fn unknown_tag<T: Display>(value: T) -> Self {
        FfiError::InvalidArgument(format!("{value} is not a native type tag"))
    }

    pub fn invalid_type<T: Display>(identifier: T) -> Self {
        FfiError::InvalidType(format!("invalid type, {identifier}"))
    }

    pub fn expected_handle<T: Display>(identifier: T) -> Self {
        FfiError::TypeMismatch(format!("wrong type, expected a type handle, got {identifier}"))
    }
}
