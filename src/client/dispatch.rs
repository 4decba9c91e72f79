//! Request Dispatcher: richieste JSON autenticate verso il backend

use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use super::envelope::Envelope;
use super::guard::SessionGuard;
use crate::config::Config;
use crate::error::{ClientError, Result};
use crate::session::CredentialStore;

pub const SERVER_ERROR_FALLBACK: &str = "Si è verificato un errore sul server";
pub const NETWORK_ERROR_FALLBACK: &str = "Impossibile connettersi al server";

/// Opzioni di una singola richiesta
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub method: Method,
    pub body: Option<Value>,
    pub headers: Vec<(String, String)>,
}

impl RequestOptions {
    pub fn get() -> Self {
        Self::default()
    }

    pub fn post() -> Self {
        Self::with_method(Method::POST)
    }

    pub fn put() -> Self {
        Self::with_method(Method::PUT)
    }

    pub fn with_method(method: Method) -> Self {
        Self {
            method,
            ..Self::default()
        }
    }

    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// Client HTTP condiviso da tutte le superfici
#[derive(Debug, Clone)]
pub struct ApiClient {
    pub(crate) http: reqwest::Client,
    base_url: String,
    store: Arc<CredentialStore>,
    guard: SessionGuard,
}

impl ApiClient {
    pub fn new(config: &Config, store: Arc<CredentialStore>) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        Ok(Self::with_http_client(builder.build()?, config.base_url(), store))
    }

    pub fn with_http_client(
        http: reqwest::Client,
        base_url: impl Into<String>,
        store: Arc<CredentialStore>,
    ) -> Self {
        let base_url: String = base_url.into();
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            guard: SessionGuard::new(store.clone()),
            store,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn store(&self) -> &Arc<CredentialStore> {
        &self.store
    }

    pub fn guard(&self) -> &SessionGuard {
        &self.guard
    }

    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// Esegue la richiesta e normalizza l'esito in un `Envelope`
    ///
    /// Non fallisce mai: errori di rete, di stato HTTP e di formato
    /// diventano `success: false`. Un 401 rimuove anche la sessione salvata.
    pub async fn dispatch<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Envelope<T> {
        let url = self.url(path);
        let token = self.store.token();

        let headers = match compose_headers(&options.headers, token.as_deref(), true) {
            Ok(headers) => headers,
            Err(e) => return Envelope::failure(e.to_string()),
        };

        tracing::debug!("[API] {} {}", options.method, url);

        let mut request = self.http.request(options.method.clone(), &url).headers(headers);
        if let Some(body) = &options.body {
            request = request.body(body.to_string());
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!("[API] Errore di rete su {}: {}", url, e);
                return Envelope::failure(network_message(&e));
            }
        };

        let status = response.status();
        if status == StatusCode::NO_CONTENT {
            return Envelope::empty();
        }

        let bytes = match response.bytes().await {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::error!("[API] Lettura risposta fallita su {}: {}", url, e);
                if status == StatusCode::UNAUTHORIZED {
                    self.guard.on_unauthorized();
                }
                return Envelope::failure(network_message(&e));
            }
        };

        let parsed = if bytes.is_empty() {
            None
        } else {
            Some(serde_json::from_slice::<Value>(&bytes))
        };

        if !status.is_success() {
            tracing::warn!(
                "[API] Errore ({}) su {} {}",
                status.as_u16(),
                options.method,
                path
            );
            if status == StatusCode::UNAUTHORIZED {
                self.guard.on_unauthorized();
            }
            let body = parsed.and_then(|p| p.ok());
            return Envelope::failure(error_message(body.as_ref()));
        }

        let value = match parsed {
            None => return Envelope::empty(),
            Some(Ok(value)) => value,
            Some(Err(e)) => {
                tracing::warn!("[API] Risposta non JSON da {}: {}", path, e);
                return Envelope::failure(format!("Risposta non valida dal server: {}", e));
            }
        };

        match serde_json::from_value::<T>(value) {
            Ok(data) => Envelope::ok(data),
            Err(e) => {
                tracing::warn!("[API] Risposta inattesa da {}: {}", path, e);
                Envelope::failure(format!("Risposta inattesa dal server: {}", e))
            }
        }
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Envelope<T> {
        self.dispatch(path, RequestOptions::get()).await
    }

    pub async fn post<T: DeserializeOwned>(&self, path: &str) -> Envelope<T> {
        self.dispatch(path, RequestOptions::post()).await
    }

    pub async fn post_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Envelope<T> {
        match serde_json::to_value(body) {
            Ok(body) => self.dispatch(path, RequestOptions::post().json(body)).await,
            Err(e) => Envelope::failure(ClientError::from(e).to_string()),
        }
    }

    pub async fn put_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Envelope<T> {
        match serde_json::to_value(body) {
            Ok(body) => self.dispatch(path, RequestOptions::put().json(body)).await,
            Err(e) => Envelope::failure(ClientError::from(e).to_string()),
        }
    }
}

/// Header di una richiesta
///
/// Ordine di precedenza: `Content-Type` di default, poi gli header del
/// chiamante, infine `Authorization` che non può essere sovrascritto.
pub fn compose_headers(
    extra: &[(String, String)],
    token: Option<&str>,
    json_body: bool,
) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();

    if json_body {
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    }

    for (name, value) in extra {
        let header_name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|_| ClientError::InvalidHeader(name.clone()))?;
        let header_value = HeaderValue::from_str(value)
            .map_err(|_| ClientError::InvalidHeader(format!("{}: {}", name, value)))?;
        headers.insert(header_name, header_value);
    }

    if let Some(token) = token {
        let mut value = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|_| ClientError::InvalidHeader("token non valido".to_string()))?;
        value.set_sensitive(true);
        headers.insert(AUTHORIZATION, value);
    }

    Ok(headers)
}

/// Messaggio d'errore dal corpo della risposta: `detail`, poi `message`,
/// poi `error`, altrimenti il messaggio generico
pub fn error_message(body: Option<&Value>) -> String {
    body.and_then(|body| {
        ["detail", "message", "error"]
            .iter()
            .find_map(|key| body.get(*key).and_then(message_text))
    })
    .unwrap_or_else(|| SERVER_ERROR_FALLBACK.to_string())
}

fn message_text(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        other => Some(other.to_string()),
    }
}

fn network_message(error: &reqwest::Error) -> String {
    let message = error.to_string();
    if message.is_empty() {
        NETWORK_ERROR_FALLBACK.to_string()
    } else {
        message
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_headers_default_json_content_type() {
        let headers = compose_headers(&[], None, true).unwrap();
        assert_eq!(headers.get(CONTENT_TYPE).unwrap(), "application/json");
        assert!(headers.get(AUTHORIZATION).is_none());
    }

    #[test]
    fn test_headers_caller_overrides_content_type() {
        let extra = vec![("Content-Type".to_string(), "text/plain".to_string())];
        let headers = compose_headers(&extra, None, true).unwrap();
        assert_eq!(headers.get(CONTENT_TYPE).unwrap(), "text/plain");
    }

    #[test]
    fn test_headers_token_wins_over_caller_authorization() {
        let extra = vec![("authorization".to_string(), "Bearer spoofed".to_string())];
        let headers = compose_headers(&extra, Some("abc123"), true).unwrap();
        assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Bearer abc123");
        assert_eq!(headers.get_all(AUTHORIZATION).iter().count(), 1);
    }

    #[test]
    fn test_headers_caller_authorization_kept_without_token() {
        let extra = vec![("Authorization".to_string(), "Bearer manual".to_string())];
        let headers = compose_headers(&extra, None, true).unwrap();
        assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Bearer manual");
    }

    #[test]
    fn test_headers_multipart_has_no_content_type() {
        let headers = compose_headers(&[], Some("abc123"), false).unwrap();
        assert!(headers.get(CONTENT_TYPE).is_none());
        assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Bearer abc123");
    }

    #[test]
    fn test_headers_invalid_name_rejected() {
        let extra = vec![("bad header".to_string(), "x".to_string())];
        assert!(matches!(
            compose_headers(&extra, None, true),
            Err(ClientError::InvalidHeader(_))
        ));
    }

    #[test]
    fn test_error_message_precedence() {
        let body = json!({"detail": "Token expired", "message": "m", "error": "e"});
        assert_eq!(error_message(Some(&body)), "Token expired");

        let body = json!({"message": "Stok habis", "error": "e"});
        assert_eq!(error_message(Some(&body)), "Stok habis");

        let body = json!({"detail": "", "error": "Bad input"});
        assert_eq!(error_message(Some(&body)), "Bad input");

        let body = json!({"status": 500});
        assert_eq!(error_message(Some(&body)), SERVER_ERROR_FALLBACK);
        assert_eq!(error_message(None), SERVER_ERROR_FALLBACK);
    }

    #[test]
    fn test_error_message_structured_detail_rendered_as_json() {
        let body = json!({"detail": [{"loc": ["body", "qty"], "msg": "field required"}]});
        let message = error_message(Some(&body));
        assert!(message.contains("field required"));
    }

    #[test]
    fn test_url_joining() {
        let store = Arc::new(CredentialStore::in_memory());
        let client =
            ApiClient::with_http_client(reqwest::Client::new(), "http://localhost:8000/api/", store);
        assert_eq!(client.url("/orders/5"), "http://localhost:8000/api/orders/5");
        assert_eq!(client.url("supplies"), "http://localhost:8000/api/supplies");
    }
}
