//! Payload mutator: applies one strategy to one addressed field of a JSON
//! document.
//!
//! A field is read once, from a representative location, and the computed
//! value is then written to every location the write path matches. When the
//! document root is an array, or the addressed value is itself an array, the
//! write is broadcast over all elements.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::MutationOptions;
use crate::error::MutationError;
use crate::path::FieldPath;
use crate::selector::merge_fuzzing;
use crate::strategy::{value_text, MutationStrategy};

/// Outcome of [`replace_field`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MutationResult {
    /// The mutated document, re-serialized. Empty for blank input.
    pub document: String,
    /// The literal value written at each matched location.
    pub applied_value: Value,
}

impl MutationResult {
    pub fn empty() -> Self {
        Self {
            document: String::new(),
            applied_value: Value::Null,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.document.is_empty()
    }
}

/// Apply `strategy` to the field at `field_path`.
///
/// Shorthand for [`replace_field_with_options`] with default options
/// (no merge-fuzzing).
pub fn replace_field(
    document: &str,
    field_path: &str,
    strategy: &MutationStrategy,
) -> Result<MutationResult, MutationError> {
    replace_field_with_options(document, field_path, strategy, &MutationOptions::default())
}

/// Apply `strategy` to the field at `field_path`, honouring
/// `options.merge_fuzzing`.
///
/// 1. A blank document yields [`MutationResult::empty`].
/// 2. For a root array the field is read through `[0]` and written through
///    `[*]`.
/// 3. If the value read is an array and the read path has no `[*]`, its first
///    element is the value to mutate and `[*]` is appended to the write path.
/// 4. The new value is `strategy.process(old)`, or with merge-fuzzing the
///    strategy payload shaped like `old` (see [`merge_fuzzing`]).
/// 5. The new value is written at every location the write path matches.
///
/// A `Skip` strategy (without merge-fuzzing) reports the existing value and
/// leaves the document content unchanged, rather than writing the first
/// element's value to every broadcast location.
///
/// With merge-fuzzing, a `null` field stays `null`.
///
/// # Errors
///
/// - [`MutationError::JsonError`] when `document` is not valid JSON.
/// - [`MutationError::InvalidPath`] when `field_path` is malformed or does
///   not resolve in the document.
/// - [`MutationError::MissingPayload`] when the strategy needs a payload and
///   has none.
pub fn replace_field_with_options(
    document: &str,
    field_path: &str,
    strategy: &MutationStrategy,
    options: &MutationOptions,
) -> Result<MutationResult, MutationError> {
    if document.trim().is_empty() {
        tracing::debug!("blank document, nothing to mutate");
        return Ok(MutationResult::empty());
    }

    let path = FieldPath::parse(field_path)?;
    let mut root: Value = serde_json::from_str(document)?;

    let (read_path, mut write_path) = if root.is_array() {
        (path.first_element_of_root(), path.all_elements_of_root())
    } else {
        (path.clone(), path)
    };

    let mut old_value = read_first(&root, &read_path)?;
    if let Value::Array(items) = &old_value {
        if !read_path.requests_all_elements() {
            let first = items.first().cloned().ok_or_else(|| {
                MutationError::invalid_path(read_path.to_string(), "addressed array is empty")
            })?;
            old_value = first;
            write_path = write_path.with_all_elements();
        }
    }

    if strategy.is_skip() && !options.merge_fuzzing {
        tracing::debug!(path = %read_path, "skip strategy, document left unchanged");
        return Ok(MutationResult {
            document: serde_json::to_string(&root)?,
            applied_value: old_value,
        });
    }

    let new_value = if options.merge_fuzzing {
        let supplied = strategy.payload().cloned().unwrap_or(Value::Null);
        let fuzzed = match &old_value {
            Value::Null => Value::Null,
            other => Value::String(value_text(other)),
        };
        merge_fuzzing(&fuzzed, &supplied)?
    } else {
        strategy.process(&old_value)?
    };

    let locations = write_path.select(&root);
    for pointer in &locations {
        if let Some(slot) = root.pointer_mut(pointer) {
            *slot = new_value.clone();
        }
    }
    tracing::debug!(
        read = %read_path,
        write = %write_path,
        locations = locations.len(),
        strategy = %strategy,
        merge_fuzzing = options.merge_fuzzing,
        "field replaced"
    );

    Ok(MutationResult {
        document: serde_json::to_string(&root)?,
        applied_value: new_value,
    })
}

/// Value at the first location `path` matches.
fn read_first(root: &Value, path: &FieldPath) -> Result<Value, MutationError> {
    path.select(root)
        .first()
        .and_then(|pointer| root.pointer(pointer))
        .cloned()
        .ok_or_else(|| MutationError::invalid_path(path.to_string(), "no value at this path"))
}
