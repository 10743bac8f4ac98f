//! Form controller for the phone + OTP login flow.

pub mod otp;
pub mod timer;
pub mod ui;

use crate::api::{ApiResponse, AuthApi};
use crate::config::RESEND_COOLDOWN_SECS;
use crate::models::auth::{error_detail, Channel, LoginRequest, SendOtpRequest};
use log::{debug, info, warn};
use otp::{is_valid_otp, sanitize_otp_input};
use timer::{ResendTimer, Tick};
use ui::{Control, Field, MessageKind, UiPort};

const LOGIN_SUCCESS_MESSAGE: &str = "Login successful. Inform the owner that you completed \
     login; your xp will be sent to your account shortly.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowPhase {
    Idle,
    RequestingOtp,
    OtpRequested,
    LoggingIn,
    LoggedIn,
    LoginFailed,
}

/// Which button asked for an OTP.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OtpTrigger {
    Send,
    Resend,
}

/// Result of the most recent action, as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestOutcome {
    pub success: bool,
    pub message: String,
}

/// Snapshot of what the user has typed.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionDraft {
    pub phone: String,
    pub channel: Channel,
    pub otp: String,
    pub xp: Option<f64>,
}

pub struct FormController<U: UiPort> {
    ui: U,
    timer: ResendTimer,
    phase: FlowPhase,
    otp_in_flight: bool,
    login_in_flight: bool,
    last_outcome: Option<RequestOutcome>,
}

impl<U: UiPort> FormController<U> {
    pub fn new(ui: U) -> Self {
        let mut controller = Self {
            ui,
            timer: ResendTimer::new(),
            phase: FlowPhase::Idle,
            otp_in_flight: false,
            login_in_flight: false,
            last_outcome: None,
        };
        controller.ui.set_visible(Control::OtpSection, false);
        controller.lock_xp();
        controller.sync_login_button();
        controller
    }

    pub fn ui(&self) -> &U {
        &self.ui
    }

    pub fn ui_mut(&mut self) -> &mut U {
        &mut self.ui
    }

    pub fn timer(&self) -> &ResendTimer {
        &self.timer
    }

    pub fn phase(&self) -> FlowPhase {
        self.phase
    }

    pub fn last_outcome(&self) -> Option<&RequestOutcome> {
        self.last_outcome.as_ref()
    }

    pub fn draft(&self) -> SessionDraft {
        let channel = Channel::from_wire(&self.ui.value(Field::Channel)).unwrap_or_default();
        SessionDraft {
            phone: self.ui.value(Field::Phone).trim().to_owned(),
            channel,
            otp: self.ui.value(Field::Otp).trim().to_owned(),
            xp: parse_xp(&self.ui.value(Field::Xp)),
        }
    }

    pub async fn request_otp(&mut self, api: &dyn AuthApi, phone: &str, channel: Channel) {
        self.run_otp_request(api, phone, channel, OtpTrigger::Send).await
    }

    pub async fn resend_otp(&mut self, api: &dyn AuthApi, phone: &str, channel: Channel) {
        self.run_otp_request(api, phone, channel, OtpTrigger::Resend).await
    }

    pub async fn submit_login(
        &mut self,
        api: &dyn AuthApi,
        phone: &str,
        otp: &str,
        xp: Option<f64>,
    ) {
        if let Some(request) = self.begin_login(phone, otp, xp) {
            let result = api.login(&request).await;
            self.finish_login(result);
        }
    }

    async fn run_otp_request(
        &mut self,
        api: &dyn AuthApi,
        phone: &str,
        channel: Channel,
        trigger: OtpTrigger,
    ) {
        if let Some(request) = self.begin_otp_request(phone, channel, trigger) {
            let result = api.send_otp(&request).await;
            self.finish_otp_request(result);
        }
    }

    /// Validates input and disables the OTP buttons. Returns the request to
    /// send, or `None` when nothing should go out.
    pub fn begin_otp_request(
        &mut self,
        phone: &str,
        channel: Channel,
        trigger: OtpTrigger,
    ) -> Option<SendOtpRequest> {
        if self.otp_in_flight {
            debug!("OTP request already in flight, ignoring {:?}", trigger);
            return None;
        }
        if trigger == OtpTrigger::Resend && self.timer.is_active() {
            debug!(
                "Resend ignored, cooldown has {}s left",
                self.timer.remaining()
            );
            return None;
        }

        let phone = phone.trim();
        if phone.is_empty() {
            self.fail_locally("Please enter phone number");
            return None;
        }

        self.otp_in_flight = true;
        self.phase = FlowPhase::RequestingOtp;
        self.ui.set_enabled(Control::SendOtp, false);
        self.ui.set_enabled(Control::ResendOtp, false);
        self.ui.show_message("Sending OTP...", MessageKind::Info);

        Some(SendOtpRequest {
            phone: phone.to_owned(),
            via: channel,
        })
    }

    pub fn finish_otp_request(&mut self, result: anyhow::Result<ApiResponse>) {
        self.otp_in_flight = false;

        match result {
            Ok(response) if matches!(response.status, 200 | 201) => {
                info!("OTP issued (status {})", response.status);
                self.phase = FlowPhase::OtpRequested;
                self.ui.set_visible(Control::OtpSection, true);
                self.ui.focus(Field::Otp);
                self.start_resend_cooldown();
                self.lock_xp();
                self.record(
                    true,
                    "OTP sent successfully. Please enter the 6-digit OTP.".to_owned(),
                );
            }
            Ok(response) => {
                let detail = error_detail(response.body.as_ref(), &response.text);
                warn!("OTP request failed with status {}: {}", response.status, detail);
                self.reset_after_otp_failure();
                self.record(false, format!("Failed to send OTP: {}", detail));
            }
            Err(e) => {
                warn!("OTP request could not complete: {:#}", e);
                self.reset_after_otp_failure();
                self.record(false, format!("Network error: {:#}", e));
            }
        }

        self.ui.set_enabled(Control::SendOtp, true);
    }

    /// Checks the OTP locally and disables the login button. Returns the
    /// request to send, or `None` when nothing should go out.
    pub fn begin_login(&mut self, phone: &str, otp: &str, xp: Option<f64>) -> Option<LoginRequest> {
        if self.login_in_flight {
            debug!("Login already in flight, ignoring");
            return None;
        }

        let otp = otp.trim();
        if !is_valid_otp(otp) {
            self.fail_locally("OTP must be 6 digits");
            return None;
        }

        self.login_in_flight = true;
        self.phase = FlowPhase::LoggingIn;
        self.ui.set_enabled(Control::Login, false);
        self.ui.show_message("Logging in...", MessageKind::Info);

        Some(LoginRequest {
            phone: phone.trim().to_owned(),
            otp: otp.to_owned(),
            xp,
        })
    }

    pub fn finish_login(&mut self, result: anyhow::Result<ApiResponse>) {
        self.login_in_flight = false;

        match result {
            Ok(response) if response.status == 200 => {
                info!("Login accepted");
                self.phase = FlowPhase::LoggedIn;
                self.ui.set_enabled(Control::Xp, true);
                self.record(true, LOGIN_SUCCESS_MESSAGE.to_owned());
            }
            Ok(response) => {
                let detail = error_detail(response.body.as_ref(), &response.text);
                warn!("Login failed with status {}", response.status);
                self.phase = FlowPhase::LoginFailed;
                self.lock_xp();
                self.record(false, format!("Login failed: {}", detail));
            }
            Err(e) => {
                warn!("Login could not complete: {:#}", e);
                self.phase = FlowPhase::LoginFailed;
                self.lock_xp();
                self.record(false, format!("Network error: {:#}", e));
            }
        }

        self.sync_login_button();
    }

    /// Sanitizes typed OTP text, writes it back and returns it.
    pub fn on_otp_input(&mut self, raw: &str) -> String {
        let sanitized = sanitize_otp_input(raw);
        self.ui.set_value(Field::Otp, &sanitized);
        self.sync_login_button();
        sanitized
    }

    pub fn on_resend_tick(&mut self, generation: u64) {
        match self.timer.tick(generation) {
            Tick::Ignored => {}
            Tick::Counting(remaining) => {
                self.ui
                    .set_resend_countdown(&format!("Resend in {}s", remaining));
            }
            Tick::Finished => {
                debug!("Resend cooldown finished");
                self.ui.set_resend_countdown("");
                self.ui.set_enabled(Control::ResendOtp, true);
            }
        }
    }

    fn start_resend_cooldown(&mut self) {
        self.timer.start(RESEND_COOLDOWN_SECS);
        self.ui.set_enabled(Control::ResendOtp, false);
        self.ui
            .set_resend_countdown(&format!("Resend in {}s", self.timer.remaining()));
    }

    fn reset_after_otp_failure(&mut self) {
        self.phase = FlowPhase::Idle;
        self.timer.cancel();
        self.ui.set_resend_countdown("");
        self.ui.set_enabled(Control::ResendOtp, true);
    }

    fn fail_locally(&mut self, message: &str) {
        debug!("Rejected locally: {}", message);
        self.record(false, message.to_owned());
    }

    fn record(&mut self, success: bool, message: String) {
        let kind = if success {
            MessageKind::Success
        } else {
            MessageKind::Error
        };
        self.ui.show_message(&message, kind);
        self.last_outcome = Some(RequestOutcome { success, message });
    }

    fn sync_login_button(&mut self) {
        let otp = self.ui.value(Field::Otp);
        self.ui
            .set_enabled(Control::Login, is_valid_otp(otp.trim()));
    }

    fn lock_xp(&mut self) {
        self.ui.set_enabled(Control::Xp, false);
    }
}

/// Blank is zero; anything that is not a number becomes `None`.
pub fn parse_xp(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Some(0.0);
    }
    raw.parse::<f64>().ok().filter(|v| v.is_finite())
}
