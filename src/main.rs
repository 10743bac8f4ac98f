use eframe::egui;
use otp_login_desktop::api::HttpAuthApi;
use otp_login_desktop::config::CONFIG;
use otp_login_desktop::gui::{state::AppState, OtpLoginApp};
use std::sync::Arc;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Network calls and the resend ticker run here; the UI thread never blocks on them.
    let runtime = tokio::runtime::Runtime::new()?;
    let api = HttpAuthApi::new(CONFIG.base_url.clone(), CONFIG.request_timeout)?;
    log::info!("Using backend {}", api.base_url());
    let state = AppState::new(Arc::new(api), runtime.handle().clone());

    let builder = egui::ViewportBuilder::default()
        .with_title("Phone Login")
        .with_inner_size(egui::vec2(420.0, 320.0));

    let options = eframe::NativeOptions {
        viewport: builder,
        ..Default::default()
    };

    eframe::run_native(
        "Phone Login",
        options,
        Box::new(move |cc| Ok(Box::new(OtpLoginApp::new(cc, state)))),
    )
    .map_err(|e| anyhow::anyhow!("UI exited with error: {}", e))
}
