use super::ApiResponse;
use crate::models::auth::{LoginRequest, SendOtpRequest};
use anyhow::Result;
use log::{debug, info, warn};
use reqwest::Client;

pub async fn send_otp(
    client: &Client,
    base_url: &str,
    request: &SendOtpRequest,
) -> Result<ApiResponse, anyhow::Error> {
    debug!("Requesting OTP for {} via {}", request.phone, request.via);
    let url = format!("{}/auth/send-otp", base_url);
    let resp = client.post(&url).json(request).send().await?;
    let response = ApiResponse::read(resp).await?;

    if matches!(response.status, 200 | 201) {
        info!("OTP requested successfully");
    } else {
        warn!("OTP request rejected with status {}", response.status);
    }
    Ok(response)
}

pub async fn login(
    client: &Client,
    base_url: &str,
    request: &LoginRequest,
) -> Result<ApiResponse, anyhow::Error> {
    debug!("Logging in {}", request.phone);
    let url = format!("{}/auth/login", base_url);
    let resp = client.post(&url).json(request).send().await?;
    // The body may carry a token, so it is never logged.
    let response = ApiResponse::read(resp).await?;

    if response.status == 200 {
        info!("Login succeeded");
    } else {
        warn!("Login rejected with status {}", response.status);
    }
    Ok(response)
}
