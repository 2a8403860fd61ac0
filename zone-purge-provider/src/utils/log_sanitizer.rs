//! Log sanitization utilities
//!
//! Keeps response bodies short in debug output and keeps account identities
//! out of logs.

/// Maximum number of bytes of a body included in log output.
const TRUNCATE_LIMIT: usize = 256;

/// Truncate a response body for logging.
///
/// Cuts on a char boundary at or below `TRUNCATE_LIMIT` bytes and notes the full size.
pub fn truncate_for_log(s: &str) -> String {
    if s.len() <= TRUNCATE_LIMIT {
        return s.to_string();
    }
    let cut = s
        .char_indices()
        .map(|(i, _)| i)
        .take_while(|i| *i <= TRUNCATE_LIMIT)
        .last()
        .unwrap_or(0);
    format!("{}... [truncated, total {} bytes]", &s[..cut], s.len())
}

/// Mask the local part of an email address: `ops@example.com` -> `o***@example.com`.
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => {
            let first = local.chars().next().map(String::from).unwrap_or_default();
            format!("{first}***@{domain}")
        }
        None => "***".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_body_unchanged() {
        assert_eq!(truncate_for_log(r#"{"success":true}"#), r#"{"success":true}"#);
    }

    #[test]
    fn long_body_truncated_with_size() {
        let body = "x".repeat(TRUNCATE_LIMIT * 2);
        let out = truncate_for_log(&body);
        assert!(out.starts_with(&"x".repeat(TRUNCATE_LIMIT)));
        assert!(out.ends_with(&format!("total {} bytes]", TRUNCATE_LIMIT * 2)));
    }

    #[test]
    fn multibyte_body_cut_on_boundary() {
        let body = "é".repeat(TRUNCATE_LIMIT);
        let out = truncate_for_log(&body);
        assert!(out.contains("[truncated"));
    }

    #[test]
    fn email_local_part_masked() {
        assert_eq!(mask_email("ops@example.com"), "o***@example.com");
        assert_eq!(mask_email("not-an-email"), "***");
    }
}
