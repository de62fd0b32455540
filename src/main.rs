pub mod base85;
pub mod base_common;
pub mod chronometer;
pub mod configuration;
pub mod encode_service;
pub mod error;
pub mod hex;
pub mod logger;
pub mod serial;
pub mod server;

use self::{
    chronometer::Chronometer,
    configuration::Configuration,
    encode_service::{create_server, State},
    error::Error,
    logger::Logger,
    server::Server,
};
use std::{fs, net::SocketAddr, process, sync::Arc};
use tokio::runtime::Runtime;

fn encode_file(path: &str, prefix: Option<&str>) -> Result<String, Error> {
    let payload = fs::read(path).map_err(|error| Error::new(format!("Could not read {}: {}", path, error)))?;
    match prefix {
        Some(prefix) => Ok(serial::encode(prefix, &payload)?),
        None => Ok(base85::encode(&payload)),
    }
}

fn serve(configuration: &Configuration, logger: Logger) -> Result<(), Error> {
    let runtime = Runtime::new().map_err(|error| Error::new(format!("Could not start runtime: {}", error)))?;
    let server = create_server(Arc::new(State::new()), logger, configuration.max_body_size())?;
    let address = SocketAddr::new(configuration.host(), configuration.port());
    logger.log(format!("Listening on {}", address));
    runtime.block_on(server.run(address))
}

fn run(logger: Logger) -> Result<(), Error> {
    let configuration = Configuration::new()?;
    match configuration.input_file_path() {
        Some(path) => {
            println!("{}", encode_file(path, configuration.serial_prefix())?);
            Ok(())
        }
        None => serve(&configuration, logger),
    }
}

fn main() {
    let logger = Logger::new();
    if let Err(error) = run(logger) {
        logger.error(error);
        process::exit(1);
    }
}
