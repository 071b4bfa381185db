//! Log sanitization utilities
//!
//! Keeps access tokens and oversized provider payloads (full analytics pages,
//! error dumps) out of debug/error logs.

/// Maximum number of bytes of a body included in log output.
const TRUNCATE_LIMIT: usize = 512;

/// Number of leading characters of a token left visible when masked.
const TOKEN_VISIBLE_PREFIX: usize = 6;

/// `str::floor_char_boundary` for our MSRV of 1.89; std only stabilised it in 1.91.0.
fn floor_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        s.len()
    } else {
        let mut i = index;
        while i > 0 && !s.is_char_boundary(i) {
            i -= 1;
        }
        i
    }
}

/// Truncate a string for safe logging.
///
/// Strings within the limit are returned unchanged; longer ones are cut on a
/// char boundary and suffixed with the original length.
pub fn truncate_for_log(s: &str) -> String {
    if s.len() <= TRUNCATE_LIMIT {
        s.to_string()
    } else {
        format!(
            "{}... [truncated, total {} bytes]",
            &s[..floor_char_boundary(s, TRUNCATE_LIMIT)],
            s.len()
        )
    }
}

/// Mask a credential, keeping the scheme (`Bearer`) and a short prefix.
///
/// `"Bearer AQXdSP_W41_UPs5ioT_t8HESyODB"` becomes `"Bearer AQXdSP***"`.
pub fn mask_token(value: &str) -> String {
    let (scheme, token) = match value.split_once(' ') {
        Some((scheme, token)) => (Some(scheme), token),
        None => (None, value),
    };

    let visible = &token[..floor_char_boundary(token, TOKEN_VISIBLE_PREFIX)];
    let masked = if visible.len() < token.len() {
        format!("{visible}***")
    } else {
        "***".to_string()
    };

    match scheme {
        Some(scheme) => format!("{scheme} {masked}"),
        None => masked,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_string_unchanged() {
        let s = r#"{"elements":[]}"#;
        assert_eq!(truncate_for_log(s), s);
    }

    #[test]
    fn exactly_at_limit() {
        let s = "a".repeat(TRUNCATE_LIMIT);
        assert_eq!(truncate_for_log(&s), s);
    }

    #[test]
    fn over_limit_truncated() {
        let s = "a".repeat(TRUNCATE_LIMIT + 100);
        let result = truncate_for_log(&s);
        assert!(result.contains("... [truncated, total"));
        assert!(result.contains(&format!("{} bytes]", TRUNCATE_LIMIT + 100)));
        assert!(result.len() < s.len());
    }

    #[test]
    fn multibyte_chars_safe() {
        let s = "é".repeat(400);
        let result = truncate_for_log(&s);
        assert!(result.contains("... [truncated, total"));
    }

    #[test]
    fn mask_bearer_token() {
        assert_eq!(mask_token("Bearer AQXdSP_W41_UPs5ioT"), "Bearer AQXdSP***");
    }

    #[test]
    fn mask_bare_token() {
        assert_eq!(mask_token("AQXdSP_W41_UPs5ioT"), "AQXdSP***");
    }

    #[test]
    fn mask_short_token_hides_everything() {
        assert_eq!(mask_token("abc"), "***");
        assert_eq!(mask_token("Bearer abc"), "Bearer ***");
    }
}
