use crate::base85::{self, encoded_len};
use std::{error, fmt};

/// Every item serial starts with this marker, followed by one item type character.
pub const MARKER: &str = "@U";
pub const PREFIX_LEN: usize = 3;

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Error {
    InvalidPrefix { prefix: String },
    BufferTooSmall { required: usize, available: usize },
}

impl From<base85::encode::Error> for Error {
    fn from(error: base85::encode::Error) -> Self {
        match error {
            base85::encode::Error::BufferTooSmall { required, available } => Error::BufferTooSmall { required, available },
        }
    }
}

impl error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidPrefix { prefix } => write!(f, r#"Invalid serial prefix "{}""#, prefix),
            Error::BufferTooSmall { required, available } => {
                write!(f, "Output buffer too small ({} bytes required, {} available)", required, available)
            }
        }
    }
}

fn check_prefix(prefix: &str) -> Result<(), Error> {
    let valid = prefix.len() == PREFIX_LEN
        && prefix.starts_with(MARKER)
        && prefix.bytes().skip(MARKER.len()).all(|byte| byte.is_ascii_graphic());
    if valid {
        Ok(())
    } else {
        Err(Error::InvalidPrefix {
            prefix: prefix.to_string(),
        })
    }
}

pub fn encode(prefix: &str, payload: impl AsRef<[u8]>) -> Result<String, Error> {
    check_prefix(prefix)?;
    let mut serial = String::with_capacity(PREFIX_LEN + encoded_len(payload.as_ref().len()));
    serial.push_str(prefix);
    serial.push_str(&base85::encode(payload));
    Ok(serial)
}

pub fn encode_into(prefix: &str, payload: impl AsRef<[u8]>, output: &mut impl AsMut<[u8]>) -> Result<usize, Error> {
    check_prefix(prefix)?;
    let payload = payload.as_ref();
    let output = output.as_mut();
    let required = PREFIX_LEN + encoded_len(payload.len());
    if output.len() < required {
        return Err(Error::BufferTooSmall {
            required,
            available: output.len(),
        });
    }
    output[..PREFIX_LEN].copy_from_slice(prefix.as_bytes());
    let mut rest = &mut output[PREFIX_LEN..];
    let len = base85::encode_into(payload, &mut rest)?;
    Ok(PREFIX_LEN + len)
}
