use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// OTP delivery channel.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Channel {
    #[default]
    #[serde(rename = "sms")]
    Sms,
    #[serde(rename = "wa")]
    WhatsApp,
}

impl Channel {
    pub const ALL: [Channel; 2] = [Channel::Sms, Channel::WhatsApp];

    pub fn as_wire(&self) -> &'static str {
        match self {
            Channel::Sms => "sms",
            Channel::WhatsApp => "wa",
        }
    }

    pub fn from_wire(value: &str) -> Option<Self> {
        match value {
            "sms" => Some(Channel::Sms),
            "wa" => Some(Channel::WhatsApp),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Channel::Sms => "SMS",
            Channel::WhatsApp => "WhatsApp",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire())
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct SendOtpRequest {
    pub phone: String,
    pub via: Channel,
}

#[derive(Serialize, Clone, PartialEq)]
pub struct LoginRequest {
    pub phone: String,
    pub otp: String,
    /// `None` is sent as `null` when the field does not hold a number.
    pub xp: Option<f64>,
}

// Keeps the OTP out of debug logs.
impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("phone", &self.phone)
            .field("otp", &"******")
            .field("xp", &self.xp)
            .finish()
    }
}

/// Picks the message shown for a failed call: `raw`, then `detail.raw`,
/// then the raw response text.
pub fn error_detail(body: Option<&Value>, text: &str) -> String {
    let non_empty = |v: Option<&Value>| {
        v.and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_owned)
    };

    body.and_then(|b| non_empty(b.get("raw")))
        .or_else(|| body.and_then(|b| non_empty(b.get("detail").and_then(|d| d.get("raw")))))
        .unwrap_or_else(|| text.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn send_otp_request_uses_wire_channel_names() {
        let request = SendOtpRequest {
            phone: "+15550001111".into(),
            via: Channel::WhatsApp,
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({ "phone": "+15550001111", "via": "wa" })
        );
        assert_eq!(Channel::from_wire("sms"), Some(Channel::Sms));
        assert_eq!(Channel::from_wire("telegram"), None);
    }

    #[test]
    fn login_request_serializes_missing_xp_as_null() {
        let request = LoginRequest {
            phone: "1".into(),
            otp: "123456".into(),
            xp: None,
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({ "phone": "1", "otp": "123456", "xp": null })
        );
        assert!(!format!("{:?}", request).contains("123456"));
    }

    #[test]
    fn error_detail_prefers_raw_then_nested_then_text() {
        let both = json!({ "raw": "top", "detail": { "raw": "nested" } });
        assert_eq!(error_detail(Some(&both), "text"), "top");

        let nested = json!({ "detail": { "raw": "nested" } });
        assert_eq!(error_detail(Some(&nested), "text"), "nested");

        let other = json!({ "detail": "Not Found" });
        assert_eq!(error_detail(Some(&other), "plain body"), "plain body");

        assert_eq!(error_detail(None, "<html>bad gateway</html>"), "<html>bad gateway</html>");
    }

    #[test]
    fn empty_raw_is_treated_as_absent() {
        let body = json!({ "raw": "", "detail": { "raw": "fallback" } });
        assert_eq!(error_detail(Some(&body), "text"), "fallback");
    }
}
