//! Cloudflare error envelope handling

use crate::traits::ProviderErrorMapper;

use super::types::CloudflareError;
use super::{CloudflareProvider, CloudflareResponse, PROVIDER_NAME};

impl ProviderErrorMapper for CloudflareProvider {
    fn provider_name(&self) -> &'static str {
        PROVIDER_NAME
    }
}

/// Join error entries as `code: message`, separated by `"; "`.
///
/// The code segment is left out when the API sent none. With no entries at all
/// the raw body is the best description available.
pub(crate) fn format_error_message(errors: &[CloudflareError], raw_body: &str) -> String {
    if errors.is_empty() {
        return raw_body.to_string();
    }
    errors
        .iter()
        .map(|e| match &e.code {
            Some(serde_json::Value::String(code)) => format!("{code}: {}", e.message),
            Some(code) => format!("{code}: {}", e.message),
            None => e.message.clone(),
        })
        .collect::<Vec<_>>()
        .join("; ")
}

/// Describe a failed response from its body.
///
/// Bodies that are not an error envelope become a single entry holding the raw text.
pub(crate) fn error_message_from_body(body: &str) -> String {
    let errors = match serde_json::from_str::<CloudflareResponse<serde_json::Value>>(body) {
        Ok(envelope) => envelope.errors,
        Err(_) => vec![CloudflareError {
            code: None,
            message: body.to_string(),
        }],
    };
    format_error_message(&errors, body)
}
