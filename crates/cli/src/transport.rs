//! reqwest-backed transport with a file-persisted cookie jar.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, SET_COOKIE};
use resource::{ApiRequest, ApiResponse, ClientError, CookieJar, Method, Transport};
use std::cell::RefCell;
use std::fs;
use std::io;
use std::path::Path;
use std::rc::Rc;

/// Sends requests to the backend host, carrying cookies like a browser would.
#[derive(Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
    jar: Rc<RefCell<CookieJar>>,
}

impl HttpTransport {
    pub fn new(base_url: impl Into<String>, jar: CookieJar) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            jar: Rc::new(RefCell::new(jar)),
        }
    }

    /// Snapshot of the current cookies.
    pub fn jar(&self) -> CookieJar {
        self.jar.borrow().clone()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

fn reqwest_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Patch => reqwest::Method::PATCH,
        Method::Delete => reqwest::Method::DELETE,
    }
}

/// Apply every `Set-Cookie` header of a response to the jar.
fn absorb_set_cookies(jar: &mut CookieJar, headers: &HeaderMap) {
    for value in headers.get_all(SET_COOKIE) {
        match value.to_str() {
            Ok(set_cookie) => jar.absorb_set_cookie(set_cookie),
            Err(e) => tracing::warn!(error = %e, "skipping unreadable Set-Cookie header"),
        }
    }
}

#[async_trait(?Send)]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> resource::Result<ApiResponse> {
        let mut builder = self
            .client
            .request(reqwest_method(request.method), self.url(&request.path));
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let cookies = self.jar.borrow().header();
        if !cookies.is_empty() {
            builder = builder.header(reqwest::header::COOKIE, cookies);
        }
        if let Some(body) = &request.body {
            builder = builder.body(serde_json::to_vec(body)?);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        absorb_set_cookies(&mut self.jar.borrow_mut(), response.headers());

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;
        Ok(ApiResponse::new(status, body))
    }

    fn cookie(&self, name: &str) -> Option<String> {
        self.jar.borrow().get(name).map(str::to_string)
    }

    fn remove_cookie(&self, name: &str) {
        self.jar.borrow_mut().remove(name);
    }
}

/// Read the cookie file. A missing file is an empty jar.
pub fn load_cookies(path: &Path) -> io::Result<CookieJar> {
    match fs::read_to_string(path) {
        Ok(contents) => Ok(CookieJar::parse(contents.trim())),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(CookieJar::new()),
        Err(e) => Err(e),
    }
}

/// Write the cookie file, deleting it once no cookies remain.
pub fn save_cookies(path: &Path, jar: &CookieJar) -> io::Result<()> {
    if jar.is_empty() {
        return match fs::remove_file(path) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
            _ => Ok(()),
        };
    }
    fs::write(path, format!("{}\n", jar.header()))
}
