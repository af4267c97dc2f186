//! Shared HTTP client for the GTW backend
//!
//! Every request carries the stored bearer token. A 401 outside the login
//! endpoints means the token is no longer accepted: the gateway wipes the
//! stored credentials and returns [`Error::SessionExpired`]. Moving the view
//! to the login route is left to [`crate::Navigator::react`].

use crate::config::ApiConfig;
use crate::navigation::Navigator;
use crate::session::TokenStore;
use crate::{Error, Result};
use gtw_admin_types::Route;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client, Method, RequestBuilder, StatusCode, multipart};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

/// Paths whose 401 answers mean "wrong credentials", not "session expired"
const LOGIN_PATHS: [&str; 2] = ["/auth/admin-login", "/auth/login"];

/// Whether a response should end the stored session
///
/// Only 401 counts, and never for the login endpoints or while the login
/// route is shown.
#[must_use]
pub fn is_session_expiry(status: StatusCode, path: &str, current: Route) -> bool {
    status == StatusCode::UNAUTHORIZED
        && current != Route::Login
        && !LOGIN_PATHS.iter().any(|login| path.contains(login))
}

/// HTTP client bound to one base endpoint
#[derive(Debug, Clone)]
pub struct AuthGateway {
    client: Client,
    base_url: String,
    tokens: TokenStore,
    navigator: Navigator,
}

#[derive(serde::Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

impl AuthGateway {
    /// Build the shared client from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL does not parse or the HTTP client
    /// cannot be built.
    pub fn new(config: &ApiConfig, tokens: TokenStore, navigator: Navigator) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout())
            .build()?;

        Self::with_client(client, &config.base_url, tokens, navigator)
    }

    /// Use an existing client
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidUrl`] if `base_url` does not parse.
    pub fn with_client(
        client: Client,
        base_url: &str,
        tokens: TokenStore,
        navigator: Navigator,
    ) -> Result<Self> {
        Url::parse(base_url)?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            tokens,
            navigator,
        })
    }

    /// Base endpoint without trailing slash
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Credential store consulted for every request
    #[must_use]
    pub const fn tokens(&self) -> &TokenStore {
        &self.tokens
    }

    /// Navigator consulted for the 401 exemption
    #[must_use]
    pub const fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    /// `GET path`
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let request = self.request(Method::GET, path)?;
        self.dispatch(path, request).await
    }

    /// `GET path?query`
    pub async fn get_with_query<T, Q>(&self, path: &str, query: &Q) -> Result<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let request = self.request(Method::GET, path)?.query(query);
        self.dispatch(path, request).await
    }

    /// `POST path` with a JSON body
    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let request = self.request(Method::POST, path)?.json(body);
        self.dispatch(path, request).await
    }

    /// `PUT path` with a JSON body
    pub async fn put<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let request = self.request(Method::PUT, path)?.json(body);
        self.dispatch(path, request).await
    }

    /// `DELETE path`
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let request = self.request(Method::DELETE, path)?;
        self.dispatch(path, request).await
    }

    /// Multipart upload; the form's own content type replaces the JSON default
    pub async fn send_multipart<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        form: multipart::Form,
    ) -> Result<T> {
        let request = self.request(method, path)?.multipart(form);
        self.dispatch(path, request).await
    }

    fn url(&self, path: &str) -> Result<Url> {
        Ok(Url::parse(&format!("{}{path}", self.base_url))?)
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let url = self.url(path)?;
        debug!(%method, %url, "Sending request");
        let builder = self.client.request(method, url);
        Ok(match self.tokens.access_token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        })
    }

    async fn dispatch<T: DeserializeOwned>(&self, path: &str, request: RequestBuilder) -> Result<T> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if status.is_success() {
            return decode_body(&body);
        }

        let message = error_message(status, &body);
        if is_session_expiry(status, path, self.navigator.current()) {
            warn!(path, "Backend rejected the session token, clearing credentials");
            self.tokens.clear_logged();
            return Err(Error::SessionExpired { message });
        }

        debug!(path, status = status.as_u16(), %message, "Request failed");
        Err(Error::Api {
            status: status.as_u16(),
            message,
        })
    }
}

fn decode_body<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return serde_json::from_str("null")
            .or_else(|_| serde_json::from_str("{}"))
            .map_err(Error::from);
    }
    Ok(serde_json::from_slice(body)?)
}

fn error_message(status: StatusCode, body: &[u8]) -> String {
    serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|body| body.message)
        .filter(|message| !message.trim().is_empty())
        .unwrap_or_else(|| status.canonical_reason().unwrap_or_default().to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use gtw_admin_types::Acknowledgement;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use std::sync::Arc;

    #[rstest]
    #[case(401, "/form", Route::GetStartedForms, true)]
    #[case(401, "/subscriptions?page=1", Route::Dashboard, true)]
    #[case(401, "/auth/admin-login", Route::Login, false)]
    #[case(401, "/auth/admin-login", Route::Dashboard, false)]
    #[case(401, "/auth/login", Route::Dashboard, false)]
    #[case(401, "/form", Route::Login, false)]
    #[case(401, "/auth/forgot-password", Route::ForgotPassword, true)]
    #[case(403, "/form", Route::Dashboard, false)]
    #[case(500, "/form", Route::Dashboard, false)]
    fn test_session_expiry_matrix(
        #[case] status: u16,
        #[case] path: &str,
        #[case] current: Route,
        #[case] expected: bool,
    ) {
        let status = StatusCode::from_u16(status).unwrap();
        assert_eq!(is_session_expiry(status, path, current), expected);
    }

    #[test]
    fn test_error_message_prefers_body() {
        assert_eq!(
            error_message(StatusCode::BAD_REQUEST, br#"{"message":"Invalid OTP"}"#),
            "Invalid OTP"
        );
        assert_eq!(error_message(StatusCode::NOT_FOUND, b"<html>"), "Not Found");
        assert_eq!(
            error_message(StatusCode::INTERNAL_SERVER_ERROR, br#"{"message":""}"#),
            "Internal Server Error"
        );
    }

    #[test]
    fn test_empty_body_decodes() {
        let ack: Acknowledgement = decode_body(b"").unwrap();
        assert!(!ack.success);
        assert!(decode_body::<()>(b"  ").is_ok());
        assert!(decode_body::<Vec<u8>>(b"").is_err());
    }

    #[test]
    fn test_base_url_is_joined_by_concatenation() {
        let tokens = TokenStore::new(Arc::new(MemoryStore::new()));
        let gateway = AuthGateway::with_client(
            Client::new(),
            "https://gtw.dev/api/",
            tokens,
            Navigator::default(),
        )
        .unwrap();
        assert_eq!(gateway.base_url(), "https://gtw.dev/api");
        assert_eq!(
            gateway.url("/case-studies/7").unwrap().as_str(),
            "https://gtw.dev/api/case-studies/7"
        );
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        let tokens = TokenStore::new(Arc::new(MemoryStore::new()));
        let result = AuthGateway::with_client(Client::new(), "not a url", tokens, Navigator::default());
        assert!(matches!(result, Err(Error::InvalidUrl(_))));
    }
}
