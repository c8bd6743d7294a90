//! HMAC signing for the revalidation webhook and the member session cookie.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

fn mac(secret: &str, message: &[u8]) -> HmacSha256 {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key length");
    mac.update(message);
    mac
}

/// Hex-encoded HMAC-SHA256 of `message`.
pub(crate) fn sign(secret: &str, message: &[u8]) -> String {
    hex::encode(mac(secret, message).finalize().into_bytes())
}

/// Constant-time check of a hex-encoded signature.
pub(crate) fn verify(secret: &str, message: &[u8], signature_hex: &str) -> bool {
    let Ok(signature) = hex::decode(signature_hex) else {
        return false;
    };
    mac(secret, message).verify_slice(&signature).is_ok()
}

/// Issue a member session value: `<expiry>.<signature>`.
pub(crate) fn issue_session(secret: &str, now_unix: i64, max_age_secs: i64) -> String {
    let expiry = now_unix + max_age_secs;
    let signature = sign(secret, format!("member:{expiry}").as_bytes());
    format!("{expiry}.{signature}")
}

/// Check a member session value: signature must match and the expiry must be
/// in the future.
pub(crate) fn session_is_valid(secret: &str, value: &str, now_unix: i64) -> bool {
    let Some((expiry_text, signature)) = value.split_once('.') else {
        return false;
    };
    let Ok(expiry) = expiry_text.parse::<i64>() else {
        return false;
    };
    if expiry <= now_unix {
        return false;
    }
    verify(secret, format!("member:{expiry}").as_bytes(), signature)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_and_verify_round_trip() {
        let signature = sign("secret", b"payload");
        assert!(verify("secret", b"payload", &signature));
    }

    #[test]
    fn test_verify_rejects_tampered_message() {
        let signature = sign("secret", b"payload");
        assert!(!verify("secret", b"tampered", &signature));
    }

    #[test]
    fn test_verify_rejects_wrong_secret() {
        let signature = sign("secret", b"payload");
        assert!(!verify("other", b"payload", &signature));
    }

    #[test]
    fn test_verify_rejects_malformed_hex() {
        assert!(!verify("secret", b"payload", "not-hex"));
    }

    #[test]
    fn test_session_round_trip() {
        let value = issue_session("secret", 1_000, 604_800);
        assert!(session_is_valid("secret", &value, 1_000));
        assert!(session_is_valid("secret", &value, 1_000 + 604_799));
    }

    #[test]
    fn test_session_expires() {
        let value = issue_session("secret", 1_000, 604_800);
        assert!(!session_is_valid("secret", &value, 1_000 + 604_800));
    }

    #[test]
    fn test_session_rejects_forged_expiry() {
        let value = issue_session("secret", 1_000, 60);
        let (_, signature) = value.split_once('.').unwrap();
        let forged = format!("9999999999.{signature}");
        assert!(!session_is_valid("secret", &forged, 1_000));
    }

    #[test]
    fn test_session_rejects_garbage() {
        assert!(!session_is_valid("secret", "no-dot-here", 1_000));
        assert!(!session_is_valid("secret", "abc.def", 1_000));
    }
}
