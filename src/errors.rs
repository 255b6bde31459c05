//! Errors and error-related utilities.

use std::{error, fmt, result};

/// The result type used throughout this library.
pub type Result<T> = result::Result<T, Box<dyn error::Error>>;

/// The data source is missing, malformed, or incomplete.
#[derive(Debug)]
pub struct LoadError(pub String);

/// A query refers to a field that the dataset does not have.
#[derive(Debug)]
pub struct SchemaError(pub String);

/// Invalid command line argument.
#[derive(Debug)]
pub struct InvalidArgument(pub String);

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "cannot load data: {}", self.0)
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "missing field: {}", self.0)
    }
}

impl fmt::Display for InvalidArgument {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "invalid argument: {}", self.0)
    }
}

impl error::Error for LoadError {}

impl error::Error for SchemaError {}

impl error::Error for InvalidArgument {}

/// A helper for constructing [LoadError].
pub fn load_error(s: String) -> Box<dyn error::Error> {
    LoadError(s).into()
}

/// A helper for constructing [LoadError].
pub fn load_error_ref(s: &str) -> Box<dyn error::Error> {
    LoadError(s.to_owned()).into()
}

/// A helper for constructing [SchemaError].
pub fn schema_error(s: String) -> Box<dyn error::Error> {
    SchemaError(s).into()
}

/// A helper for constructing [InvalidArgument].
pub fn invalid_argument(s: String) -> Box<dyn error::Error> {
    InvalidArgument(s).into()
}
