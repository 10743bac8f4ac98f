use crate::models::auth::{LoginRequest, SendOtpRequest};
use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

pub mod auth;

/// Status and body of a completed HTTP exchange, whatever the status.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    /// Parsed JSON body; `None` when the body is empty or not JSON.
    pub body: Option<Value>,
    pub text: String,
}

impl ApiResponse {
    pub fn new(status: u16, text: impl Into<String>) -> Self {
        let text = text.into();
        let body = serde_json::from_str(&text).ok();
        Self { status, body, text }
    }

    pub async fn read(resp: reqwest::Response) -> Result<Self> {
        let status = resp.status().as_u16();
        let text = resp.text().await?;
        Ok(Self::new(status, text))
    }
}

/// Backend calls used by the login form.
///
/// `Err` means the exchange did not complete (connection, TLS, timeout,
/// unreadable body). Any HTTP status, success or not, is an `Ok`.
#[async_trait]
pub trait AuthApi: Send + Sync {
    async fn send_otp(&self, request: &SendOtpRequest) -> Result<ApiResponse>;
    async fn login(&self, request: &LoginRequest) -> Result<ApiResponse>;
}

pub struct HttpAuthApi {
    client: Client,
    base_url: String,
}

impl HttpAuthApi {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl AuthApi for HttpAuthApi {
    async fn send_otp(&self, request: &SendOtpRequest) -> Result<ApiResponse> {
        auth::send_otp(&self.client, &self.base_url, request).await
    }

    async fn login(&self, request: &LoginRequest) -> Result<ApiResponse> {
        auth::login(&self.client, &self.base_url, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::auth::Channel;
    use axum::{extract::Json, http::StatusCode, routing::post, Router};
    use serde_json::json;
    use std::sync::{Arc, Mutex};
    use tokio::net::TcpListener;

    async fn serve(router: Router) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("addr");
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("serve");
        });
        format!("http://{}", addr)
    }

    fn api(base_url: String) -> HttpAuthApi {
        HttpAuthApi::new(base_url, Duration::from_secs(5)).expect("client")
    }

    #[test]
    fn response_body_is_optional() {
        let parsed = ApiResponse::new(400, r#"{"raw":"bad phone"}"#);
        assert_eq!(parsed.body, Some(json!({ "raw": "bad phone" })));

        let garbage = ApiResponse::new(200, "OK");
        assert_eq!(garbage.body, None);
        assert_eq!(garbage.text, "OK");
    }

    #[tokio::test]
    async fn send_otp_posts_phone_and_channel() {
        let seen = Arc::new(Mutex::new(None));
        let captured = seen.clone();
        let router = Router::new().route(
            "/auth/send-otp",
            post(move |Json(body): Json<serde_json::Value>| {
                let captured = captured.clone();
                async move {
                    *captured.lock().unwrap() = Some(body);
                    (StatusCode::CREATED, Json(json!({ "ok": true })))
                }
            }),
        );
        let api = api(serve(router).await);

        let response = api
            .send_otp(&SendOtpRequest {
                phone: "+15550001111".into(),
                via: Channel::WhatsApp,
            })
            .await
            .expect("response");

        assert_eq!(response.status, 201);
        assert_eq!(
            seen.lock().unwrap().clone(),
            Some(json!({ "phone": "+15550001111", "via": "wa" }))
        );
    }

    #[tokio::test]
    async fn error_status_is_returned_not_raised() {
        let router = Router::new().route(
            "/auth/login",
            post(|| async {
                (
                    StatusCode::UNAUTHORIZED,
                    Json(json!({ "detail": { "raw": "otp expired" } })),
                )
            }),
        );
        let api = api(serve(router).await);

        let response = api
            .login(&LoginRequest {
                phone: "1".into(),
                otp: "123456".into(),
                xp: Some(5.0),
            })
            .await
            .expect("response");

        assert_eq!(response.status, 401);
        assert_eq!(response.body, Some(json!({ "detail": { "raw": "otp expired" } })));
    }

    #[tokio::test]
    async fn non_json_body_is_kept_as_text() {
        let router = Router::new().route(
            "/auth/send-otp",
            post(|| async { (StatusCode::BAD_GATEWAY, "upstream down") }),
        );
        let api = api(serve(router).await);

        let response = api
            .send_otp(&SendOtpRequest {
                phone: "1".into(),
                via: Channel::Sms,
            })
            .await
            .expect("response");

        assert_eq!(response.status, 502);
        assert_eq!(response.body, None);
        assert_eq!(response.text, "upstream down");
    }

    #[tokio::test]
    async fn unreachable_backend_is_an_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("addr");
        drop(listener);

        let api = api(format!("http://{}", addr));
        let result = api
            .send_otp(&SendOtpRequest {
                phone: "1".into(),
                via: Channel::Sms,
            })
            .await;

        assert!(result.is_err());
    }
}
