use crate::models::auth::Channel;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Phone,
    Channel,
    Otp,
    Xp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    SendOtp,
    ResendOtp,
    OtpSection,
    Xp,
    Login,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MessageKind {
    #[default]
    Info,
    Success,
    Error,
}

/// What the form controller needs from whatever draws the form.
pub trait UiPort {
    fn value(&self, field: Field) -> String;
    fn set_value(&mut self, field: Field, value: &str);
    fn set_enabled(&mut self, control: Control, enabled: bool);
    fn set_visible(&mut self, control: Control, visible: bool);
    /// Empty text hides the countdown.
    fn set_resend_countdown(&mut self, text: &str);
    fn show_message(&mut self, text: &str, kind: MessageKind);
    fn focus(&mut self, _field: Field) {}
}

/// Widget state of the login form, rendered by the egui layer.
#[derive(Debug, Clone, PartialEq)]
pub struct FormView {
    pub phone: String,
    pub channel: Channel,
    pub otp: String,
    pub xp: String,
    pub send_enabled: bool,
    pub resend_enabled: bool,
    pub login_enabled: bool,
    pub xp_enabled: bool,
    pub otp_section_visible: bool,
    pub resend_countdown: String,
    pub message: String,
    pub message_kind: MessageKind,
    pub pending_focus: Option<Field>,
}

impl Default for FormView {
    fn default() -> Self {
        Self {
            phone: String::new(),
            channel: Channel::Sms,
            otp: String::new(),
            xp: String::new(),
            send_enabled: true,
            resend_enabled: true,
            login_enabled: false,
            xp_enabled: false,
            otp_section_visible: false,
            resend_countdown: String::new(),
            message: String::new(),
            message_kind: MessageKind::Info,
            pending_focus: None,
        }
    }
}

impl UiPort for FormView {
    fn value(&self, field: Field) -> String {
        match field {
            Field::Phone => self.phone.clone(),
            Field::Channel => self.channel.as_wire().to_owned(),
            Field::Otp => self.otp.clone(),
            Field::Xp => self.xp.clone(),
        }
    }

    fn set_value(&mut self, field: Field, value: &str) {
        match field {
            Field::Phone => self.phone = value.to_owned(),
            Field::Channel => {
                if let Some(channel) = Channel::from_wire(value) {
                    self.channel = channel;
                }
            }
            Field::Otp => self.otp = value.to_owned(),
            Field::Xp => self.xp = value.to_owned(),
        }
    }

    fn set_enabled(&mut self, control: Control, enabled: bool) {
        match control {
            Control::SendOtp => self.send_enabled = enabled,
            Control::ResendOtp => self.resend_enabled = enabled,
            Control::Xp => self.xp_enabled = enabled,
            Control::Login => self.login_enabled = enabled,
            Control::OtpSection => {}
        }
    }

    fn set_visible(&mut self, control: Control, visible: bool) {
        if control == Control::OtpSection {
            self.otp_section_visible = visible;
        }
    }

    fn set_resend_countdown(&mut self, text: &str) {
        self.resend_countdown = text.to_owned();
    }

    fn show_message(&mut self, text: &str, kind: MessageKind) {
        self.message = text.to_owned();
        self.message_kind = kind;
    }

    fn focus(&mut self, field: Field) {
        self.pending_focus = Some(field);
    }
}
