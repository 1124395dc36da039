//! Shared validation helpers for inbound payloads.
//!
//! Payload structs derive [`Validate`]; the helpers here flatten the
//! resulting errors into stable `field: code` strings.

pub use validator::Validate;

use validator::ValidationErrors;

/// Flattens validator errors into sorted `field: code` messages.
pub fn field_messages(errors: &ValidationErrors) -> Vec<String> {
    let mut messages: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                let code = e.code.as_ref();
                format!("{}: {}", field, code)
            })
        })
        .collect();
    messages.sort();
    messages
}
