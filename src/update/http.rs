//! HTTP request/response values and the client seam.

use super::HttpError;

/// An HTTP request to be sent by an [`HttpClient`].
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// HTTP method
    pub method: http::Method,
    /// Target URL
    pub url: url::Url,
    /// Headers to send
    pub headers: http::HeaderMap,
}

impl HttpRequest {
    /// Creates a GET request to `url` with no headers.
    #[must_use]
    pub fn get(url: url::Url) -> Self {
        Self {
            method: http::Method::GET,
            url,
            headers: http::HeaderMap::new(),
        }
    }
}

/// A fully buffered HTTP response.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// Status code
    pub status: http::StatusCode,
    /// Response body
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Creates a response from its parts.
    #[must_use]
    pub const fn new(status: http::StatusCode, body: Vec<u8>) -> Self {
        Self { status, body }
    }

    /// Returns true if the status code is 2xx.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Returns the body as text, replacing invalid UTF-8.
    #[must_use]
    pub fn body_text(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }
}

/// Sends HTTP requests.
///
/// # Example
///
/// ```
/// use albatross::update::{HttpClient, HttpError, HttpRequest, HttpResponse};
///
/// struct Fixed(&'static str);
///
/// impl HttpClient for Fixed {
///     async fn request(&self, _req: HttpRequest) -> Result<HttpResponse, HttpError> {
///         Ok(HttpResponse::new(http::StatusCode::OK, self.0.as_bytes().to_vec()))
///     }
/// }
/// ```
pub trait HttpClient: Send + Sync {
    /// Sends `req` and returns the buffered response.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] when the request cannot be built, the server
    /// cannot be reached, or it does not answer in time. Non-2xx statuses
    /// are responses, not errors.
    fn request(
        &self,
        req: HttpRequest,
    ) -> impl std::future::Future<Output = Result<HttpResponse, HttpError>> + Send;
}
