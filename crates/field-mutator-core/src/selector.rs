//! Strategy selection: infer the mutation shape that an existing value carries.
//!
//! A value that already contains special characters (see [`crate::classify`])
//! tells us *where* those characters sit: everywhere, at the front, at the
//! back, or somewhere inside. [`from_value`] turns that position into a
//! strategy; [`merge_fuzzing`] reuses the shape with different material.

use serde_json::Value;

use crate::classify::is_special;
use crate::error::MutationError;
use crate::strategy::{value_text, MutationStrategy};

/// Marker prefix of generated large strings.
pub const LARGE_STRING_PREFIX: &str = "ca";
/// Marker suffix of generated large strings.
pub const LARGE_STRING_SUFFIX: &str = "ts";

/// Multi-code-point sequences that render as a single glyph and are matched
/// as one unit when looking for embedded special content.
const CONFUSABLE_SEQUENCES: &[&str] = &["జ్ఞ\u{200C}ా", "স্র\u{200C}ু"];

/// Infer the strategy that describes `value`.
///
/// The checks run in a fixed order and the first one that applies wins:
///
/// 1. blank, or made only of special characters: `Replace` with the value
/// 2. starts with a special character: `Prefix` with the stripped core
/// 3. ends with a special character: `Trail` with the stripped core
/// 4. carries the large-string marker: `Replace` with the value
/// 5. contains a run of special characters (or a confusable sequence):
///    `Insert` with the leftmost such run
/// 6. anything else: `Replace` with the value
pub fn from_value(value: &Value) -> MutationStrategy {
    let text = value_text(value);

    if text.trim().is_empty() || text.chars().all(is_special) {
        tracing::trace!("value is blank or entirely special");
        return MutationStrategy::replace().with_data(value.clone());
    }
    if text.chars().next().is_some_and(is_special) {
        return MutationStrategy::prefix().with_data(strip_special_edges(&text));
    }
    if text.chars().next_back().is_some_and(is_special) {
        return MutationStrategy::trail().with_data(strip_special_edges(&text));
    }
    if is_large_string(&text) {
        tracing::trace!("value carries the large string marker");
        return MutationStrategy::replace().with_data(value.clone());
    }
    if let Some(run) = find_special_run(&text) {
        return MutationStrategy::insert().with_data(run);
    }

    MutationStrategy::replace().with_data(value.clone())
}

/// Shape `supplied` the way `fuzzed` is shaped.
///
/// `fuzzed` picks the strategy through [`from_value`]; `supplied` is the value
/// that strategy is then applied to.
pub fn merge_fuzzing(fuzzed: &Value, supplied: &Value) -> Result<Value, MutationError> {
    let strategy = from_value(fuzzed);
    tracing::debug!(strategy = %strategy, "merging supplied value through inferred strategy");
    strategy.process(supplied)
}

/// True when `data` bears the large-string marker.
pub fn is_large_string(data: &str) -> bool {
    data.starts_with(LARGE_STRING_PREFIX) && data.ends_with(LARGE_STRING_SUFFIX)
}

/// Wrap `input` in the large-string marker.
pub fn mark_large_string(input: &str) -> String {
    format!("{LARGE_STRING_PREFIX}{input}{LARGE_STRING_SUFFIX}")
}

/// Drop the runs of special characters at both ends.
fn strip_special_edges(text: &str) -> &str {
    text.trim_matches(is_special)
}

/// Leftmost run of special characters, or confusable sequence, in `text`.
fn find_special_run(text: &str) -> Option<&str> {
    for (start, c) in text.char_indices() {
        if is_special(c) {
            let end = text[start..]
                .char_indices()
                .find(|(_, next)| !is_special(*next))
                .map_or(text.len(), |(offset, _)| start + offset);
            return Some(&text[start..end]);
        }
        let rest = &text[start..];
        if let Some(sequence) = CONFUSABLE_SEQUENCES.iter().find(|s| rest.starts_with(**s)) {
            return Some(&rest[..sequence.len()]);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::StrategyKind;
    use serde_json::json;

    fn decide(value: Value) -> (StrategyKind, Option<Value>) {
        let strategy = from_value(&value);
        (strategy.kind(), strategy.payload().cloned())
    }

    #[test]
    fn test_empty_is_replace_with_empty() {
        assert_eq!(decide(json!("")), (StrategyKind::Replace, Some(json!(""))));
    }

    #[test]
    fn test_blank_is_replace_with_original() {
        assert_eq!(decide(json!("   ")), (StrategyKind::Replace, Some(json!("   "))));
    }

    #[test]
    fn test_all_special_is_replace() {
        assert_eq!(
            decide(json!("\u{0007}\u{200B}\u{1F600}")),
            (StrategyKind::Replace, Some(json!("\u{0007}\u{200B}\u{1F600}")))
        );
    }

    #[test]
    fn test_leading_special_is_prefix_with_core() {
        assert_eq!(decide(json!("\u{0007}abc")), (StrategyKind::Prefix, Some(json!("abc"))));
    }

    #[test]
    fn test_trailing_special_is_trail_with_core() {
        assert_eq!(decide(json!("abc\u{0007}")), (StrategyKind::Trail, Some(json!("abc"))));
    }

    #[test]
    fn test_special_at_both_ends_prefers_prefix() {
        assert_eq!(
            decide(json!("\u{200B}ab\u{0007}c\u{2028}")),
            (StrategyKind::Prefix, Some(json!("ab\u{0007}c")))
        );
    }

    #[test]
    fn test_large_string_marker_is_replace() {
        let marked = mark_large_string("a\u{0007}b");
        assert!(is_large_string(&marked));
        assert_eq!(decide(json!(marked)), (StrategyKind::Replace, Some(json!(marked))));
    }

    #[test]
    fn test_embedded_run_is_insert() {
        assert_eq!(
            decide(json!("ab\u{200B}\u{200C}cd")),
            (StrategyKind::Insert, Some(json!("\u{200B}\u{200C}")))
        );
    }

    #[test]
    fn test_embedded_run_picks_leftmost() {
        assert_eq!(
            decide(json!("a\u{0007}b\u{200B}\u{200B}c")),
            (StrategyKind::Insert, Some(json!("\u{0007}")))
        );
    }

    #[test]
    fn test_confusable_sequence_is_insert() {
        let value = "xజ్ఞ\u{200C}ాy";
        assert_eq!(
            decide(json!(value)),
            (StrategyKind::Insert, Some(json!("జ్ఞ\u{200C}ా")))
        );
        let value = "pস্র\u{200C}ুq";
        assert_eq!(
            decide(json!(value)),
            (StrategyKind::Insert, Some(json!("স্র\u{200C}ু")))
        );
    }

    #[test]
    fn test_plain_value_is_replace() {
        assert_eq!(decide(json!("hello")), (StrategyKind::Replace, Some(json!("hello"))));
        assert_eq!(decide(json!(42)), (StrategyKind::Replace, Some(json!(42))));
    }

    #[test]
    fn test_merge_fuzzing_shapes_supplied_value() {
        let merged = merge_fuzzing(&json!("\u{0007}abc"), &json!("xyz")).unwrap();
        assert_eq!(merged, json!("abcxyz"));

        let merged = merge_fuzzing(&json!("ab\u{200B}cd"), &json!("wxyz")).unwrap();
        assert_eq!(merged, json!("wx\u{200B}yz"));

        // A plain fuzzed value replaces the supplied one with itself.
        let merged = merge_fuzzing(&json!("plain"), &json!("other")).unwrap();
        assert_eq!(merged, json!("plain"));
    }
}
