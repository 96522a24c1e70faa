use base64::Engine as _;

use crate::error::AuthError;

/// Decode the `sub` claim from a token's payload segment, without verifying
/// the signature. This is the display identity shown next to "signed in as".
///
/// Returns `None` for anything that is not a well-formed token of at least
/// two dot-separated segments whose second segment is base64url JSON with a
/// string `sub` field. Decode and parse failures are absorbed — this function
/// never errors.
#[must_use]
pub fn decode_subject(token: &str) -> Option<String> {
    let mut segments = token.split('.');
    let _header = segments.next()?;
    let payload = segments.next()?;
    let bytes = base64::engine::general_purpose::URL_SAFE_NO_PAD
        .decode(payload)
        .ok()?;
    let value: serde_json::Value = serde_json::from_slice(&bytes).ok()?;
    value.get("sub")?.as_str().map(str::to_owned)
}

/// Decode the `exp` claim without signature validation (for quick expiry
/// checks before bothering the backend).
///
/// # Errors
///
/// Returns `AuthError::InvalidToken` if the token format is invalid or the
/// `exp` claim is missing or cannot be parsed.
pub fn decode_expiry(token: &str) -> Result<chrono::DateTime<chrono::Utc>, AuthError> {
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        return Err(AuthError::InvalidToken("not a three-segment token".into()));
    }
    let payload = base64::engine::general_purpose::URL_SAFE_NO_PAD
        .decode(parts[1])
        .map_err(|e| AuthError::InvalidToken(format!("base64 decode failed: {e}")))?;
    let value: serde_json::Value = serde_json::from_slice(&payload)
        .map_err(|e| AuthError::InvalidToken(format!("JSON parse failed: {e}")))?;
    let exp = value["exp"]
        .as_i64()
        .ok_or_else(|| AuthError::InvalidToken("missing exp claim".into()))?;
    chrono::DateTime::from_timestamp(exp, 0)
        .ok_or_else(|| AuthError::InvalidToken("invalid exp timestamp".into()))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn encode(segment: &str) -> String {
        base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(segment)
    }

    fn make_token(payload_json: &str) -> String {
        let header = encode(r#"{"alg":"HS256"}"#);
        let payload = encode(payload_json);
        let signature = encode("fake_sig");
        format!("{header}.{payload}.{signature}")
    }

    #[test]
    fn decode_subject_valid_token() {
        let token = make_token(r#"{"sub":"reader@example.com","exp":1999999999}"#);
        assert_eq!(
            decode_subject(&token),
            Some("reader@example.com".to_string())
        );
    }

    #[test]
    fn decode_subject_two_segments_is_enough() {
        let token = format!("{}.{}", encode("{}"), encode(r#"{"sub":"x"}"#));
        assert_eq!(decode_subject(&token), Some("x".to_string()));
    }

    #[test]
    fn decode_subject_single_segment_returns_none() {
        assert_eq!(decode_subject("justonesegment"), None);
        assert_eq!(decode_subject(""), None);
    }

    #[test]
    fn decode_subject_invalid_base64_returns_none() {
        assert_eq!(decode_subject("header.!!!invalid!!!.sig"), None);
    }

    #[test]
    fn decode_subject_invalid_json_returns_none() {
        let token = format!("{}.{}.sig", encode("{}"), encode("not json"));
        assert_eq!(decode_subject(&token), None);
    }

    #[test]
    fn decode_subject_non_string_sub_returns_none() {
        let token = make_token(r#"{"sub":42}"#);
        assert_eq!(decode_subject(&token), None);
    }

    #[test]
    fn decode_subject_missing_sub_returns_none() {
        let token = make_token(r#"{"role":"admin"}"#);
        assert_eq!(decode_subject(&token), None);
    }

    #[test]
    fn decode_expiry_valid_token() {
        let future_exp = chrono::Utc::now().timestamp() + 3600;
        let token = make_token(&format!(r#"{{"sub":"user","exp":{future_exp}}}"#));
        let dt = decode_expiry(&token).expect("should decode");
        assert_eq!(dt.timestamp(), future_exp);
    }

    #[test]
    fn decode_expiry_invalid_format() {
        let result = decode_expiry("not-a-token");
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("not a three-segment token")
        );
    }

    #[test]
    fn decode_expiry_missing_exp_claim() {
        let token = make_token(r#"{"sub":"user"}"#);
        let result = decode_expiry(&token);
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("missing exp claim")
        );
    }
}
