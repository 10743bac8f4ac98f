pub const OTP_LEN: usize = 6;

/// True iff `value` is exactly six ASCII digits.
pub fn is_valid_otp(value: &str) -> bool {
    value.len() == OTP_LEN && value.bytes().all(|b| b.is_ascii_digit())
}

/// Strips everything but ASCII digits and keeps at most the first six.
pub fn sanitize_otp_input(raw: &str) -> String {
    raw.chars()
        .filter(char::is_ascii_digit)
        .take(OTP_LEN)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_otp_is_six_ascii_digits() {
        assert!(is_valid_otp("000000"));
        assert!(is_valid_otp("123456"));

        assert!(!is_valid_otp(""));
        assert!(!is_valid_otp("12345"));
        assert!(!is_valid_otp("1234567"));
        assert!(!is_valid_otp("12a45"));
        assert!(!is_valid_otp(" 12345"));
        // Non-ASCII digits do not count.
        assert!(!is_valid_otp("١٢٣٤٥٦"));
        assert!(!is_valid_otp("１２３４５６"));
    }

    #[test]
    fn sanitize_keeps_digits_in_order() {
        assert_eq!(sanitize_otp_input("1a2b3c"), "123");
        assert_eq!(sanitize_otp_input(" 98-76 54 "), "987654");
        assert_eq!(sanitize_otp_input("12345678"), "123456");
        assert_eq!(sanitize_otp_input("abc"), "");
        assert_eq!(sanitize_otp_input("１2٣3"), "23");
    }

    #[test]
    fn sanitized_output_is_short_and_numeric() {
        let inputs = ["", "x", "0000000000", "a1b2c3d4e5f6g7", "🙂1🙂2", "\t\n42"];
        for input in inputs {
            let out = sanitize_otp_input(input);
            assert!(out.len() <= OTP_LEN, "{input:?} -> {out:?}");
            assert!(out.bytes().all(|b| b.is_ascii_digit()));
            let digits: String = input.chars().filter(char::is_ascii_digit).collect();
            assert!(digits.starts_with(&out));
        }
    }
}
