use crate::api::ApiResponse;

/// Events delivered back to the UI thread from background tasks.
#[derive(Debug)]
pub enum AppEvent {
    OtpRequestFinished(anyhow::Result<ApiResponse>),
    LoginFinished(anyhow::Result<ApiResponse>),
    ResendTick { generation: u64 },
}
