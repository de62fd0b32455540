use crate::{Error, Logger};
use hyper::{
    body::HttpBody,
    header::{HeaderValue, CONTENT_TYPE},
    service::{make_service_fn, service_fn},
    Body, Method, Request, Response, StatusCode,
};
use regex::Regex;
use serde_json::{json, Value};
use std::{collections::HashMap, convert::Infallible, future::Future, net::SocketAddr, pin::Pin, sync::Arc};

pub type Parameters = HashMap<String, String>;

/// Route template such as `/encode/{hex}`, each `{name}` matching one path segment.
pub struct DynamicUri {
    regex: Regex,
    names: Vec<String>,
}

impl DynamicUri {
    pub fn new(template: &str) -> Result<Self, Error> {
        let placeholder = Regex::new(r"\{([^\{\}]*)\}").map_err(|error| Error::new(error.to_string()))?;
        let mut pattern = String::from("^");
        let mut names: Vec<String> = Vec::new();
        let mut offset = 0;
        for occurence in placeholder.find_iter(template) {
            let range = occurence.range();
            let name = &template[range.start + 1..range.end - 1];
            if names.iter().any(|existing| existing == name) {
                return Err(Error::new(format!(r#"Duplicate parameter "{}" in route {}"#, name, template)));
            }
            names.push(name.to_string());
            pattern.push_str(&regex::escape(&template[offset..range.start]));
            pattern.push_str("([^/]*)");
            offset = range.end;
        }
        pattern.push_str(&regex::escape(&template[offset..]));
        pattern.push('$');
        let regex = Regex::new(&pattern).map_err(|error| Error::new(error.to_string()))?;
        Ok(Self { regex, names })
    }

    pub fn check(&self, path: &str) -> Option<Parameters> {
        let captures = self.regex.captures(path)?;
        let mut parameters = HashMap::new();
        for (index, name) in self.names.iter().enumerate() {
            let value = captures.get(index + 1)?;
            parameters.insert(name.clone(), value.as_str().to_string());
        }
        Some(parameters)
    }
}

type BoxedResponseFuture = Pin<Box<dyn Send + Future<Output = Response<Body>>>>;
type BoxedHandler<S> = Box<dyn Fn(Parameters, Vec<u8>, Arc<S>) -> BoxedResponseFuture + Send + Sync>;

struct Route<S> {
    method: Method,
    dynamic_uri: DynamicUri,
    handler: BoxedHandler<S>,
}

pub struct Router<S> {
    routes: Vec<Route<S>>,
    state: Arc<S>,
    logger: Logger,
}

fn parse_query(query: &str, parameters: &mut Parameters) {
    for part in query.split('&') {
        if let Some((name, value)) = part.split_once('=') {
            parameters.insert(name.to_string(), value.to_string());
        }
    }
}

impl<S> Router<S> {
    pub fn new(state: Arc<S>, logger: Logger) -> Self {
        Self {
            routes: Vec::new(),
            state,
            logger,
        }
    }

    fn add<H, F>(&mut self, method: Method, uri: &str, handler: H) -> Result<(), Error>
    where
        H: 'static + Fn(Parameters, Vec<u8>, Arc<S>) -> F + Send + Sync,
        F: 'static + Future<Output = Response<Body>> + Send,
    {
        self.routes.push(Route {
            method,
            dynamic_uri: DynamicUri::new(uri)?,
            handler: Box::new(move |parameters, body, state| Box::pin(handler(parameters, body, state))),
        });
        Ok(())
    }

    pub async fn route(&self, method: &Method, path: &str, query: Option<&str>, body: Vec<u8>) -> Response<Body> {
        for route in self.routes.iter().filter(|route| route.method == *method) {
            if let Some(mut parameters) = route.dynamic_uri.check(path) {
                if let Some(query) = query {
                    parse_query(query, &mut parameters);
                }
                return (route.handler)(parameters, body, self.state.clone()).await;
            }
        }
        respond_message(StatusCode::NOT_FOUND, "Not Found")
    }
}

pub fn respond(status: StatusCode, value: Value) -> Response<Body> {
    let mut response = Response::new(Body::from(value.to_string()));
    *response.status_mut() = status;
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    response
}

pub fn respond_message(status: StatusCode, message: impl Into<String>) -> Response<Body> {
    respond(status, json!({ "message": message.into() }))
}

async fn read_body(request: &mut Request<Body>, max_body_size: usize) -> Result<Vec<u8>, Response<Body>> {
    let mut body: Vec<u8> = Vec::new();
    while let Some(chunk) = request.body_mut().data().await {
        let chunk = chunk.map_err(|error| respond_message(StatusCode::BAD_REQUEST, error.to_string()))?;
        if body.len() + chunk.len() > max_body_size {
            return Err(respond_message(
                StatusCode::PAYLOAD_TOO_LARGE,
                format!("Request body exceeds {} bytes", max_body_size),
            ));
        }
        body.extend_from_slice(&chunk);
    }
    Ok(body)
}

pub struct Server<S> {
    router: Router<S>,
    max_body_size: usize,
}

impl<S: 'static + Send + Sync> Server<S> {
    pub fn new(state: Arc<S>, logger: Logger, max_body_size: usize) -> Self {
        Self {
            router: Router::new(state, logger),
            max_body_size,
        }
    }

    pub fn get<H, F>(&mut self, uri: &str, handler: H) -> Result<(), Error>
    where
        H: 'static + Fn(Parameters, Vec<u8>, Arc<S>) -> F + Send + Sync,
        F: 'static + Future<Output = Response<Body>> + Send,
    {
        self.router.add(Method::GET, uri, handler)
    }

    pub fn post<H, F>(&mut self, uri: &str, handler: H) -> Result<(), Error>
    where
        H: 'static + Fn(Parameters, Vec<u8>, Arc<S>) -> F + Send + Sync,
        F: 'static + Future<Output = Response<Body>> + Send,
    {
        self.router.add(Method::POST, uri, handler)
    }

    /// Reads the body under the size limit and dispatches the request to its route.
    pub async fn call(&self, mut request: Request<Body>) -> Response<Body> {
        let method = request.method().clone();
        let uri = request.uri().clone();
        let logger = self.router.logger;
        logger.log(format!("{} {}", method, uri));
        let response = match read_body(&mut request, self.max_body_size).await {
            Ok(body) => self.router.route(&method, uri.path(), uri.query(), body).await,
            Err(response) => response,
        };
        logger.log(format!("{} {} {}", method, uri, response.status()));
        response
    }

    pub async fn run(self, address: SocketAddr) -> Result<(), Error> {
        let server = Arc::new(self);
        let make_service = make_service_fn(move |_| {
            let server = server.clone();
            async move {
                Ok::<_, Infallible>(service_fn(move |request: Request<Body>| {
                    let server = server.clone();
                    async move { Ok::<_, Infallible>(server.call(request).await) }
                }))
            }
        });
        let server = hyper::Server::try_bind(&address).map_err(|error| Error::new(format!("Could not bind {}: {}", address, error)))?;
        server
            .serve(make_service)
            .await
            .map_err(|error| Error::new(format!("Server error: {}", error)))
    }
}
