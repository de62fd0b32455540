use crate::Error;
use std::{env, error, net::IpAddr};

#[derive(Debug, Clone)]
pub struct Configuration {
    host: IpAddr,
    port: u16,
    max_body_size: usize,
    input_file_path: Option<String>,
    serial_prefix: Option<String>,
}

struct Variables<F> {
    lookup: F,
}

impl<F: Fn(&str) -> Option<String>> Variables<F> {
    fn var(&self, key: &str) -> Option<String> {
        (self.lookup)(key).filter(|value| !value.is_empty())
    }

    fn var_map<T, E: error::Error>(&self, key: &str, mut f: impl FnMut(&str) -> Result<T, E>, default: T) -> Result<T, Error> {
        match self.var(key) {
            Some(value) => f(&value).map_err(|_| Error::new(format!("Invalid {} {}", key, value))),
            None => Ok(default),
        }
    }
}

impl Configuration {
    pub fn new() -> Result<Self, Error> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, Error> {
        let variables = Variables { lookup };
        let host = variables.var_map("HOST", |host| host.parse(), IpAddr::from([127, 0, 0, 1]))?;
        let port = variables.var_map("PORT", |port| port.parse(), 8000)?;
        let max_body_size = variables.var_map("MAX_BODY_SIZE", |size| size.parse(), 1 << 20)?;
        let input_file_path = variables.var("INPUT_FILE_PATH");
        let serial_prefix = variables.var("SERIAL_PREFIX");
        Ok(Self {
            host,
            port,
            max_body_size,
            input_file_path,
            serial_prefix,
        })
    }

    pub fn host(&self) -> IpAddr {
        self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn max_body_size(&self) -> usize {
        self.max_body_size
    }

    pub fn input_file_path(&self) -> Option<&str> {
        self.input_file_path.as_deref()
    }

    pub fn serial_prefix(&self) -> Option<&str> {
        self.serial_prefix.as_deref()
    }
}
