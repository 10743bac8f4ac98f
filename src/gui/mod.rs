use crate::controller::ui::{Field, MessageKind};
use crate::models::auth::Channel;
use eframe::egui;
use state::AppState;

pub mod state;

enum Action {
    SendOtp,
    ResendOtp,
    OtpInput(String),
    Login,
}

pub struct OtpLoginApp {
    state: AppState,
}

impl OtpLoginApp {
    pub fn new(cc: &eframe::CreationContext<'_>, state: AppState) -> Self {
        cc.egui_ctx.set_visuals(egui::Visuals::light());
        Self {
            state: state.with_repaint(cc.egui_ctx.clone()),
        }
    }
}

impl eframe::App for OtpLoginApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ui_main(ctx, &mut self.state);
    }
}

fn message_color(kind: MessageKind) -> egui::Color32 {
    match kind {
        MessageKind::Info => egui::Color32::from_rgb(0xa6, 0xac, 0xcd),
        MessageKind::Success => egui::Color32::from_rgb(0x00, 0xd6, 0x8f),
        MessageKind::Error => egui::Color32::from_rgb(0xff, 0x55, 0x73),
    }
}

pub fn ui_main(ctx: &egui::Context, state: &mut AppState) {
    state.pump_events();

    let mut actions = Vec::new();
    let phase = state.controller.phase();
    let view = state.controller.ui_mut();

    egui::TopBottomPanel::top("header").show(ctx, |ui| {
        egui::Frame::default()
            .outer_margin(egui::vec2(0.0, 4.0))
            .show(ui, |ui| {
                ui.heading("Phone Login");
            });
    });

    egui::CentralPanel::default().show(ctx, |ui| {
        ui.vertical_centered(|ui| {
            ui.add_space(12.0);
            egui::Grid::new("login_grid")
                .num_columns(2)
                .show(ui, |ui| {
                    ui.label("Phone:");
                    ui.text_edit_singleline(&mut view.phone);
                    ui.end_row();

                    ui.label("Send via:");
                    egui::ComboBox::from_id_salt("via")
                        .selected_text(view.channel.label())
                        .show_ui(ui, |ui| {
                            for channel in Channel::ALL {
                                ui.selectable_value(&mut view.channel, channel, channel.label());
                            }
                        });
                    ui.end_row();

                    if view.otp_section_visible {
                        ui.label("OTP:");
                        let mut otp = view.otp.clone();
                        let response = ui.text_edit_singleline(&mut otp);
                        if view.pending_focus.take() == Some(Field::Otp) {
                            response.request_focus();
                        }
                        if response.changed() {
                            actions.push(Action::OtpInput(otp));
                        }
                        ui.end_row();

                        ui.label("XP:");
                        ui.add_enabled(view.xp_enabled, egui::TextEdit::singleline(&mut view.xp));
                        ui.end_row();
                    }
                });

            ui.add_space(12.0);
            ui.horizontal(|ui| {
                if ui
                    .add_enabled(view.send_enabled, egui::Button::new("Send OTP"))
                    .clicked()
                {
                    actions.push(Action::SendOtp);
                }
                if view.otp_section_visible {
                    if ui
                        .add_enabled(view.resend_enabled, egui::Button::new("Resend OTP"))
                        .clicked()
                    {
                        actions.push(Action::ResendOtp);
                    }
                    if !view.resend_countdown.is_empty() {
                        ui.label(&view.resend_countdown);
                    }
                    if ui
                        .add_enabled(view.login_enabled, egui::Button::new("Login"))
                        .clicked()
                    {
                        actions.push(Action::Login);
                    }
                }
            });

            ui.add_space(12.0);
            ui.colored_label(message_color(view.message_kind), &view.message);
        });
    });

    egui::TopBottomPanel::bottom("footer").show(ctx, |ui| {
        ui.label(format!("Status: {:?}", phase));
    });

    for action in actions {
        match action {
            Action::SendOtp => state.send_otp(),
            Action::ResendOtp => state.resend_otp(),
            Action::OtpInput(raw) => state.otp_input(&raw),
            Action::Login => state.login(),
        }
    }
}
