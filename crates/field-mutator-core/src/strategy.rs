//! Mutation strategies: the closed set of ways a field value can be altered.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::MutationError;

/// The kind of mutation a [`MutationStrategy`] performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StrategyKind {
    /// Replace the existing value with the payload.
    Replace,
    /// Put the payload in front of the existing value.
    Prefix,
    /// Append the payload after the existing value.
    Trail,
    /// Splice the payload into the middle of the existing value.
    Insert,
    /// Leave the existing value untouched.
    Skip,
    /// Report the payload itself as the result.
    Noop,
}

impl StrategyKind {
    /// Fixed display name, used in logs and reports.
    pub fn name(self) -> &'static str {
        match self {
            StrategyKind::Replace => "REPLACE",
            StrategyKind::Prefix => "PREFIX",
            StrategyKind::Trail => "TRAIL",
            StrategyKind::Insert => "INSERT",
            StrategyKind::Skip => "SKIP",
            StrategyKind::Noop => "NOOP",
        }
    }
}

/// One mutation decision for one field: a kind plus the material it applies.
///
/// The kind is fixed at construction. The payload is attached once through
/// [`MutationStrategy::with_data`]; only `Skip` may go without one, and for
/// `Skip` it is diagnostic text that is never applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MutationStrategy {
    kind: StrategyKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    payload: Option<Value>,
}

impl MutationStrategy {
    fn of(kind: StrategyKind) -> Self {
        Self {
            kind,
            payload: None,
        }
    }

    pub fn replace() -> Self {
        Self::of(StrategyKind::Replace)
    }

    pub fn prefix() -> Self {
        Self::of(StrategyKind::Prefix)
    }

    pub fn trail() -> Self {
        Self::of(StrategyKind::Trail)
    }

    pub fn insert() -> Self {
        Self::of(StrategyKind::Insert)
    }

    pub fn skip() -> Self {
        Self::of(StrategyKind::Skip)
    }

    pub fn noop() -> Self {
        Self::of(StrategyKind::Noop)
    }

    /// Attach the payload. Consumes the strategy so it can only happen while
    /// the strategy is being built.
    pub fn with_data(mut self, payload: impl Into<Value>) -> Self {
        self.payload = Some(payload.into());
        self
    }

    pub fn kind(&self) -> StrategyKind {
        self.kind
    }

    pub fn payload(&self) -> Option<&Value> {
        self.payload.as_ref()
    }

    pub fn is_skip(&self) -> bool {
        self.kind == StrategyKind::Skip
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// Compute the new value for `existing`.
    ///
    /// | kind    | result                                   |
    /// |---------|------------------------------------------|
    /// | Replace | payload                                  |
    /// | Prefix  | payload + existing                       |
    /// | Trail   | existing + payload                       |
    /// | Insert  | existing with payload spliced at its middle |
    /// | Skip    | existing                                 |
    /// | Noop    | payload                                  |
    ///
    /// Prefix, Trail and Insert work on the textual form of both values and
    /// always yield a JSON string.
    pub fn process(&self, existing: &Value) -> Result<Value, MutationError> {
        match self.kind {
            StrategyKind::Skip => Ok(existing.clone()),
            StrategyKind::Replace | StrategyKind::Noop => Ok(self.require_payload()?.clone()),
            StrategyKind::Prefix => {
                let payload = value_text(self.require_payload()?);
                Ok(Value::String(payload + &value_text(existing)))
            }
            StrategyKind::Trail => {
                let payload = value_text(self.require_payload()?);
                Ok(Value::String(value_text(existing) + &payload))
            }
            StrategyKind::Insert => {
                let payload = value_text(self.require_payload()?);
                Ok(Value::String(insert_in_the_middle(
                    &value_text(existing),
                    &payload,
                    true,
                )))
            }
        }
    }

    fn require_payload(&self) -> Result<&Value, MutationError> {
        self.payload
            .as_ref()
            .ok_or(MutationError::MissingPayload {
                strategy: self.kind.name(),
            })
    }
}

impl fmt::Display for MutationStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::format::truncated_value(self))
    }
}

/// Textual form of a JSON value: strings unquoted, everything else as
/// compact JSON (`null`, `42`, `true`, `[1,2]`).
pub fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Splice `filler` into the middle of `value`.
///
/// The split point is `chars(value) / 2`, so for odd lengths the left half is
/// the shorter one. With `insert_without_replace` the filler is inserted and
/// nothing is removed. Otherwise `min(chars(value), chars(filler))` characters
/// centred on the split point are overwritten, keeping the total length
/// unchanged whenever the filler is no longer than the value.
pub fn insert_in_the_middle(value: &str, filler: &str, insert_without_replace: bool) -> String {
    let chars: Vec<char> = value.chars().collect();
    let middle = chars.len() / 2;

    let (cut_start, cut_end) = if insert_without_replace {
        (middle, middle)
    } else {
        let overwritten = chars.len().min(filler.chars().count());
        let start = middle - overwritten / 2;
        (start, start + overwritten)
    };

    let mut result = String::with_capacity(value.len() + filler.len());
    result.extend(&chars[..cut_start]);
    result.push_str(filler);
    result.extend(&chars[cut_end..]);
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_replace_ignores_existing() {
        let strategy = MutationStrategy::replace().with_data("Z");
        assert_eq!(strategy.process(&json!("anything")).unwrap(), json!("Z"));
        assert_eq!(strategy.process(&json!("")).unwrap(), json!("Z"));
        assert_eq!(strategy.process(&json!(12)).unwrap(), json!("Z"));
    }

    #[test]
    fn test_replace_keeps_payload_type() {
        let strategy = MutationStrategy::replace().with_data(json!(7));
        assert_eq!(strategy.process(&json!("abc")).unwrap(), json!(7));
    }

    #[test]
    fn test_prefix_and_trail() {
        let prefix = MutationStrategy::prefix().with_data("Z");
        let trail = MutationStrategy::trail().with_data("Z");
        assert_eq!(prefix.process(&json!("abc")).unwrap(), json!("Zabc"));
        assert_eq!(trail.process(&json!("abc")).unwrap(), json!("abcZ"));
    }

    #[test]
    fn test_prefix_stringifies_non_string_existing() {
        let prefix = MutationStrategy::prefix().with_data(" ");
        assert_eq!(prefix.process(&json!(42)).unwrap(), json!(" 42"));
        assert_eq!(prefix.process(&Value::Null).unwrap(), json!(" null"));
    }

    #[test]
    fn test_insert_splits_at_middle() {
        let insert = MutationStrategy::insert().with_data("\u{200B}");
        assert_eq!(insert.process(&json!("abcd")).unwrap(), json!("ab\u{200B}cd"));
        assert_eq!(insert.process(&json!("abc")).unwrap(), json!("a\u{200B}bc"));
        assert_eq!(insert.process(&json!("")).unwrap(), json!("\u{200B}"));
    }

    #[test]
    fn test_skip_returns_existing_and_ignores_payload() {
        let skip = MutationStrategy::skip().with_data("diagnostic");
        assert!(skip.is_skip());
        assert_eq!(skip.process(&json!({"a": 1})).unwrap(), json!({"a": 1}));
        assert_eq!(MutationStrategy::skip().process(&json!("x")).unwrap(), json!("x"));
    }

    #[test]
    fn test_noop_returns_payload() {
        let noop = MutationStrategy::noop().with_data("literal");
        assert_eq!(noop.process(&json!("other")).unwrap(), json!("literal"));
        assert_eq!(noop.kind(), StrategyKind::Noop);
        assert_ne!(noop.kind(), StrategyKind::Replace);
    }

    #[test]
    fn test_missing_payload_is_an_error() {
        for strategy in [
            MutationStrategy::replace(),
            MutationStrategy::prefix(),
            MutationStrategy::trail(),
            MutationStrategy::insert(),
            MutationStrategy::noop(),
        ] {
            let err = strategy.process(&json!("abc")).unwrap_err();
            assert!(matches!(err, MutationError::MissingPayload { .. }));
        }
    }

    #[test]
    fn test_names() {
        assert_eq!(MutationStrategy::replace().name(), "REPLACE");
        assert_eq!(MutationStrategy::prefix().name(), "PREFIX");
        assert_eq!(MutationStrategy::trail().name(), "TRAIL");
        assert_eq!(MutationStrategy::insert().name(), "INSERT");
        assert_eq!(MutationStrategy::skip().name(), "SKIP");
        assert_eq!(MutationStrategy::noop().name(), "NOOP");
    }

    #[test]
    fn test_strategy_serializes_kind_and_payload() {
        let json = serde_json::to_value(MutationStrategy::trail().with_data(" ")).unwrap();
        assert_eq!(json, json!({"kind": "TRAIL", "payload": " "}));
        let json = serde_json::to_value(MutationStrategy::skip()).unwrap();
        assert_eq!(json, json!({"kind": "SKIP"}));
    }

    #[test]
    fn test_insert_in_the_middle_replacing_keeps_length() {
        assert_eq!(insert_in_the_middle("abcdef", "XY", false), "abXYef");
        assert_eq!(insert_in_the_middle("abcdef", "X", false), "abcXef");
        assert_eq!(insert_in_the_middle("ab", "WXYZ", false), "WXYZ");
        assert_eq!(insert_in_the_middle("", "X", false), "X");
    }

    #[test]
    fn test_insert_in_the_middle_counts_chars_not_bytes() {
        assert_eq!(insert_in_the_middle("ééé", "-", true), "é-éé");
        assert_eq!(insert_in_the_middle("éééé", "-", false), "éé-é");
    }
}
