//! Human-readable rendering of values and strategies for logs and reports.

use std::fmt::Write;

use crate::classify::classify;
use crate::strategy::{value_text, MutationStrategy};

/// Payload characters kept by [`truncated_value`].
pub const DEFAULT_TRUNCATE_AT: usize = 30;

/// Escape every special character as `\uXXXX`.
///
/// Characters outside the BMP are written as their UTF-16 surrogate pair so
/// every escape has exactly four hex digits.
pub fn format_value(data: &str) -> String {
    let mut out = String::with_capacity(data.len());
    for c in data.chars() {
        if classify(c).is_special() {
            let mut units = [0u16; 2];
            for unit in c.encode_utf16(&mut units) {
                // Writing into a String cannot fail.
                let _ = write!(out, "\\u{:04x}", unit);
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// `"<NAME> with <payload>"`, payload cut at 30 characters and escaped;
/// just `"<NAME>"` when there is no payload.
pub fn truncated_value(strategy: &MutationStrategy) -> String {
    truncated_value_at(strategy, DEFAULT_TRUNCATE_AT)
}

pub fn truncated_value_at(strategy: &MutationStrategy, limit: usize) -> String {
    match strategy.payload() {
        Some(payload) => {
            let text = value_text(payload);
            let shown = match text.char_indices().nth(limit) {
                Some((cut, _)) => format!("{}...", &text[..cut]),
                None => text,
            };
            format!("{} with {}", strategy.name(), format_value(&shown))
        }
        None => strategy.name().to_string(),
    }
}
