use std::{error, fmt};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    message: String,
}

impl Error {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", &self.message)
    }
}

impl error::Error for Error {}

impl From<crate::hex::Error> for Error {
    fn from(error: crate::hex::Error) -> Self {
        Self::new(format!("Invalid hex payload: {}", error))
    }
}

impl From<crate::serial::Error> for Error {
    fn from(error: crate::serial::Error) -> Self {
        Self::new(error.to_string())
    }
}
