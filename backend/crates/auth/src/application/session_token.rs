//! Session Token
//!
//! Cookie value format: `<session_id>.<signature>` where the signature is
//! HMAC-SHA256 over the session id (base64url, no padding).

use kernel::id::SessionId;

/// Signed token for `session_id`
pub fn issue(session_id: SessionId, secret: &[u8; 32]) -> String {
    let session_id = session_id.to_string();
    let signature = platform::crypto::sign(secret, session_id.as_bytes());
    format!("{session_id}.{signature}")
}

/// Verify signature and parse the session id
///
/// Any malformed or forged token yields `None`.
pub fn parse(token: &str, secret: &[u8; 32]) -> Option<SessionId> {
    let (session_id, signature) = token.split_once('.')?;
    if signature.contains('.') {
        return None;
    }

    if !platform::crypto::verify(secret, session_id.as_bytes(), signature) {
        return None;
    }

    session_id.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: [u8; 32] = [7u8; 32];

    #[test]
    fn test_issue_then_parse() {
        let id = SessionId::new();
        let token = issue(id, &SECRET);
        assert_eq!(parse(&token, &SECRET), Some(id));
    }

    #[test]
    fn test_forged_signature_rejected() {
        let id = SessionId::new();
        let token = issue(id, &SECRET);
        assert_eq!(parse(&token, &[8u8; 32]), None);

        let unsigned = format!("{id}.AAAA");
        assert_eq!(parse(&unsigned, &SECRET), None);
    }

    #[test]
    fn test_wrong_part_count_rejected() {
        let id = SessionId::new();
        assert_eq!(parse(&id.to_string(), &SECRET), None);

        let token = issue(id, &SECRET);
        assert_eq!(parse(&format!("{token}.extra"), &SECRET), None);
        assert_eq!(parse("", &SECRET), None);
    }

    #[test]
    fn test_signed_garbage_id_rejected() {
        let signature = platform::crypto::sign(&SECRET, b"not-a-uuid");
        assert_eq!(parse(&format!("not-a-uuid.{signature}"), &SECRET), None);
    }
}
