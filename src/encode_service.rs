use crate::{base85, hex, serial, Arc, Error, Logger, Server};
use hyper::{Body, Response, StatusCode};
use serde::Deserialize;
use serde_json::{json, Value};

macro_rules! unwrap {
    ( $x:expr ) => {{
        match $x {
            Ok(result) => result,
            Err(error) => return respond_error(error),
        }
    }};
}

#[derive(Debug, Deserialize)]
struct SerialRequest {
    prefix: String,
    payload: String,
}

pub struct State {
    encoder: &'static base85::Encoder<'static>,
}

impl State {
    pub fn new() -> Self {
        Self {
            encoder: base85::Encoder::default(),
        }
    }

    pub fn encode(&self, payload: &[u8]) -> Value {
        let encoded = self.encoder.encode(payload);
        let length = encoded.len();
        json!({ "encoded": encoded, "length": length })
    }

    pub fn encode_hex(&self, payload: &str) -> Result<Value, Error> {
        Ok(self.encode(&hex::decode(payload)?))
    }

    pub fn encode_serial(&self, body: &[u8]) -> Result<Value, Error> {
        let request: SerialRequest =
            serde_json::from_slice(body).map_err(|error| Error::new(format!("Invalid JSON body: {}", error)))?;
        let payload = hex::decode(&request.payload)?;
        let serial = serial::encode(&request.prefix, payload)?;
        Ok(json!({ "serial": serial }))
    }
}

fn respond_ok(value: Value) -> Response<Body> {
    crate::server::respond(StatusCode::OK, value)
}

fn respond_error(error: Error) -> Response<Body> {
    crate::server::respond_message(StatusCode::BAD_REQUEST, error.message())
}

pub fn create_server(state: Arc<State>, logger: Logger, max_body_size: usize) -> Result<Server<State>, Error> {
    let mut server = Server::new(state, logger, max_body_size);

    server.post("/encode", |_parameters, body, state| async move { respond_ok(state.encode(&body)) })?;

    server.get("/encode/{hex}", |parameters, _body, state| async move {
        let payload = unwrap!(parameters.get("hex").ok_or_else(|| Error::new("Missing hex parameter")));
        respond_ok(unwrap!(state.encode_hex(payload)))
    })?;

    server.post("/serials", |_parameters, body, state| async move {
        respond_ok(unwrap!(state.encode_serial(&body)))
    })?;

    Ok(server)
}

#[cfg(test)]
mod tests {
    use super::{create_server, State};
    use crate::{Arc, Logger};
    use hyper::{Body, Method, Request, StatusCode};
    use serde_json::{json, Value};
    use tokio::runtime::Runtime;

    fn send(method: Method, uri: &str, body: &'static str) -> (StatusCode, Value) {
        let server = create_server(Arc::new(State::new()), Logger::new(), 16).unwrap();
        let request = Request::builder().method(method).uri(uri).body(Body::from(body)).unwrap();
        Runtime::new().unwrap().block_on(async {
            let response = server.call(request).await;
            let status = response.status();
            let body = hyper::body::to_bytes(response.into_body()).await.unwrap();
            (status, serde_json::from_slice(&body).unwrap())
        })
    }

    #[test]
    fn encode() {
        let state = State::new();
        assert_eq!(state.encode(b"foobar"), json!({ "encoded": "W^Zp/VR8", "length": 8 }));
        assert_eq!(state.encode(b""), json!({ "encoded": "", "length": 0 }));
    }

    #[test]
    fn encode_hex() {
        let state = State::new();
        assert_eq!(state.encode_hex("ffffffff1c"), Ok(json!({ "encoded": "/NsC08~", "length": 7 })));
        assert_eq!(
            state.encode_hex("fff").unwrap_err().message(),
            "Invalid hex payload: Odd number of digits"
        );
    }

    #[test]
    fn encode_serial() {
        let state = State::new();
        let body = br#"{"prefix": "@Ug", "payload": "666f6f626172"}"#;
        assert_eq!(state.encode_serial(body), Ok(json!({ "serial": "@UgW^Zp/VR8" })));

        let body = br#"{"prefix": "Ug", "payload": "00"}"#;
        assert_eq!(state.encode_serial(body).unwrap_err().message(), r#"Invalid serial prefix "Ug""#);

        let body = br#"{"prefix": "@Ug"}"#;
        assert!(state.encode_serial(body).unwrap_err().message().starts_with("Invalid JSON body"));
    }

    #[test]
    fn routes() {
        assert_eq!(
            send(Method::POST, "/encode", "foobar"),
            (StatusCode::OK, json!({ "encoded": "W^Zp/VR8", "length": 8 }))
        );
        assert_eq!(
            send(Method::GET, "/encode/41", ""),
            (StatusCode::OK, json!({ "encoded": "K>", "length": 2 }))
        );
        assert_eq!(
            send(Method::POST, "/serials", r#"{"prefix":"@Ug","payload":"00"}"#),
            (StatusCode::OK, json!({ "serial": "@Ug00" }))
        );
    }

    #[test]
    fn unknown_routes() {
        assert_eq!(send(Method::GET, "/nope", ""), (StatusCode::NOT_FOUND, json!({ "message": "Not Found" })));
        assert_eq!(send(Method::GET, "/encode", "").0, StatusCode::NOT_FOUND);
        assert_eq!(send(Method::POST, "/encode/41", "").0, StatusCode::NOT_FOUND);
    }

    #[test]
    fn invalid_requests() {
        assert_eq!(
            send(Method::GET, "/encode/zz", ""),
            (
                StatusCode::BAD_REQUEST,
                json!({ "message": "Invalid hex payload: Invalid character 'z' at position 0" })
            )
        );
        let (status, body) = send(Method::POST, "/encode", "0123456789abcdefg");
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(body, json!({ "message": "Request body exceeds 16 bytes" }));
    }
}
