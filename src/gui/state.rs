use crate::api::AuthApi;
use crate::controller::ui::FormView;
use crate::controller::{FormController, OtpTrigger};
use crate::models::events::AppEvent;
use log::{debug, warn};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

struct Ticker {
    generation: u64,
    handle: JoinHandle<()>,
}

/// UI-thread side of the app: owns the form controller and turns button
/// presses into background requests whose results come back as events.
pub struct AppState {
    pub controller: FormController<FormView>,
    api: Arc<dyn AuthApi>,
    runtime: Handle,
    event_sender: Sender<AppEvent>,
    event_receiver: Receiver<AppEvent>,
    ticker: Option<Ticker>,
    repaint: Option<egui::Context>,
}

impl AppState {
    pub fn new(api: Arc<dyn AuthApi>, runtime: Handle) -> Self {
        let (event_sender, event_receiver) = channel();
        Self {
            controller: FormController::new(FormView::default()),
            api,
            runtime,
            event_sender,
            event_receiver,
            ticker: None,
            repaint: None,
        }
    }

    pub fn with_repaint(mut self, ctx: egui::Context) -> Self {
        self.repaint = Some(ctx);
        self
    }

    pub fn send_otp(&mut self) {
        self.start_otp_request(OtpTrigger::Send);
    }

    pub fn resend_otp(&mut self) {
        self.start_otp_request(OtpTrigger::Resend);
    }

    pub fn login(&mut self) {
        let draft = self.controller.draft();
        let Some(request) = self
            .controller
            .begin_login(&draft.phone, &draft.otp, draft.xp)
        else {
            return;
        };

        let api = self.api.clone();
        let sender = self.event_sender.clone();
        let repaint = self.repaint.clone();
        self.runtime.spawn(async move {
            let result = api.login(&request).await;
            if sender.send(AppEvent::LoginFinished(result)).is_err() {
                warn!("UI went away before login finished");
            }
            if let Some(ctx) = repaint {
                ctx.request_repaint();
            }
        });
    }

    pub fn otp_input(&mut self, raw: &str) {
        self.controller.on_otp_input(raw);
    }

    /// Applies every event that arrived since the last frame.
    pub fn pump_events(&mut self) {
        while let Ok(event) = self.event_receiver.try_recv() {
            match event {
                AppEvent::OtpRequestFinished(result) => self.controller.finish_otp_request(result),
                AppEvent::LoginFinished(result) => self.controller.finish_login(result),
                AppEvent::ResendTick { generation } => self.controller.on_resend_tick(generation),
            }
        }
        self.sync_ticker();
    }

    pub fn ticker_running(&self) -> bool {
        self.ticker.is_some()
    }

    fn start_otp_request(&mut self, trigger: OtpTrigger) {
        let draft = self.controller.draft();
        let Some(request) = self
            .controller
            .begin_otp_request(&draft.phone, draft.channel, trigger)
        else {
            return;
        };

        let api = self.api.clone();
        let sender = self.event_sender.clone();
        let repaint = self.repaint.clone();
        self.runtime.spawn(async move {
            let result = api.send_otp(&request).await;
            if sender.send(AppEvent::OtpRequestFinished(result)).is_err() {
                warn!("UI went away before OTP request finished");
            }
            if let Some(ctx) = repaint {
                ctx.request_repaint();
            }
        });
    }

    /// Keeps exactly one ticker alive for the controller's current countdown.
    fn sync_ticker(&mut self) {
        let timer = self.controller.timer();
        let wanted = timer.is_active().then(|| timer.generation());
        let current = self.ticker.as_ref().map(|t| t.generation);
        if current == wanted {
            return;
        }

        if let Some(ticker) = self.ticker.take() {
            debug!("Stopping resend ticker {}", ticker.generation);
            ticker.handle.abort();
        }
        if let Some(generation) = wanted {
            debug!("Starting resend ticker {}", generation);
            self.ticker = Some(self.spawn_ticker(generation));
        }
    }

    fn spawn_ticker(&self, generation: u64) -> Ticker {
        let sender = self.event_sender.clone();
        let repaint = self.repaint.clone();
        let handle = self.runtime.spawn(async move {
            let period = Duration::from_secs(1);
            let mut interval =
                tokio::time::interval_at(tokio::time::Instant::now() + period, period);
            loop {
                interval.tick().await;
                if sender.send(AppEvent::ResendTick { generation }).is_err() {
                    break;
                }
                if let Some(ctx) = &repaint {
                    ctx.request_repaint();
                }
            }
        });
        Ticker { generation, handle }
    }
}

impl Drop for AppState {
    fn drop(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.handle.abort();
        }
    }
}
