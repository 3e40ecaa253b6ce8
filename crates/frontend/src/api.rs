//! Browser transport over `fetch`, with cookies from `document.cookie`.

use async_trait::async_trait;
use gloo_net::http::Request;
use resource::{ApiRequest, ApiResponse, ClientError, CookieJar, Method, Transport};
use wasm_bindgen::JsCast;
use web_sys::{HtmlDocument, RequestCredentials};

/// Backend host baked in at build time. Empty means same origin.
pub const API_HOST: &str = match option_env!("SIMPLIFY_API_HOST") {
    Some(host) => host,
    None => "",
};

/// Sends requests with the browser's cookie session.
#[derive(Debug, Clone, PartialEq)]
pub struct BrowserTransport {
    host: String,
}

impl Default for BrowserTransport {
    fn default() -> Self {
        Self::new(API_HOST)
    }
}

impl BrowserTransport {
    pub fn new(host: impl Into<String>) -> Self {
        Self { host: host.into() }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.host.trim_end_matches('/'), path)
    }
}

fn html_document() -> Option<HtmlDocument> {
    web_sys::window()?
        .document()?
        .dyn_into::<HtmlDocument>()
        .ok()
}

fn document_cookies() -> CookieJar {
    html_document()
        .and_then(|doc| doc.cookie().ok())
        .map(|cookies| CookieJar::parse(&cookies))
        .unwrap_or_default()
}

fn transport_error(e: gloo_net::Error) -> ClientError {
    ClientError::Transport(e.to_string())
}

#[async_trait(?Send)]
impl Transport for BrowserTransport {
    async fn send(&self, request: ApiRequest) -> resource::Result<ApiResponse> {
        let url = self.url(&request.path);
        let mut builder = match request.method {
            Method::Get => Request::get(&url),
            Method::Post => Request::post(&url),
            Method::Patch => Request::patch(&url),
            Method::Delete => Request::delete(&url),
        }
        .credentials(RequestCredentials::Include);
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        let built = match &request.body {
            Some(body) => builder.body(serde_json::to_string(body)?),
            None => builder.build(),
        }
        .map_err(transport_error)?;

        let response = built.send().await.map_err(transport_error)?;
        let status = response.status();
        let body = response.text().await.map_err(transport_error)?;
        Ok(ApiResponse::new(status, body))
    }

    fn cookie(&self, name: &str) -> Option<String> {
        document_cookies().get(name).map(str::to_string)
    }

    fn remove_cookie(&self, name: &str) {
        if let Some(doc) = html_document()
            && let Err(e) = doc.set_cookie(&format!("{name}=; Max-Age=0; path=/"))
        {
            log::warn!("Failed to clear cookie {name}: {e:?}");
        }
    }
}
