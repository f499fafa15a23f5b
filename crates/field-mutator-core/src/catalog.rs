//! Strategy catalog: candidate mutations for one field, built from its schema
//! constraints and a list of filler values.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::selector::mark_large_string;
use crate::strategy::{insert_in_the_middle, MutationStrategy};

/// Diagnostic carried by the `Skip` strategy for fields that cannot hold text.
pub const NOT_A_STRING_FIELD: &str =
    "field does not match string schema or has binary/byte format";

/// Sample repeated to build large strings. Mixes scripts and symbols so the
/// payload exercises more than ASCII handling.
const LARGE_STRING_SAMPLE: &str = "ÄÖÜßæøåĀЖऄԱⅧ©☃∂Ωλ";

// ---------------------------------------------------------------------------
// Schema constraints
// ---------------------------------------------------------------------------

/// A schema `type` keyword: one name, or a list of names (OpenAPI 3.1).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TypeDeclaration {
    Single(String),
    Union(Vec<String>),
}

/// Read-only snapshot of the schema keywords this crate looks at.
///
/// Deserializes directly from an OpenAPI / JSON Schema fragment; other
/// keywords are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaConstraints {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<TypeDeclaration>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    #[serde(rename = "enum", default, skip_serializing_if = "Vec::is_empty")]
    pub enumeration: Vec<Value>,
}

impl SchemaConstraints {
    /// Constraints of a plain `{"type": "string"}` field.
    pub fn string() -> Self {
        Self {
            schema_type: Some(TypeDeclaration::Single("string".to_string())),
            ..Self::default()
        }
    }

    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    pub fn with_length(mut self, min_length: Option<usize>, max_length: Option<usize>) -> Self {
        self.min_length = min_length;
        self.max_length = max_length;
        self
    }

    pub fn with_enum<I, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.enumeration = values.into_iter().map(Into::into).collect();
        self
    }

    /// True when the declared type is `string` (case-insensitive). A type
    /// list qualifies when every non-`null` member is `string`.
    pub fn is_textual(&self) -> bool {
        let is_string = |name: &str| name.eq_ignore_ascii_case("string");
        match &self.schema_type {
            Some(TypeDeclaration::Single(name)) => is_string(name),
            Some(TypeDeclaration::Union(names)) => {
                let members: Vec<&String> = names
                    .iter()
                    .filter(|n| !n.eq_ignore_ascii_case("null"))
                    .collect();
                !members.is_empty() && members.iter().all(|n| is_string(n))
            }
            None => false,
        }
    }

    /// True for the `binary` and `byte` string formats.
    pub fn is_binary(&self) -> bool {
        self.format
            .as_deref()
            .is_some_and(|f| f.eq_ignore_ascii_case("binary") || f.eq_ignore_ascii_case("byte"))
    }
}

// ---------------------------------------------------------------------------
// Base value generation
// ---------------------------------------------------------------------------

/// Produces a schema-conformant base value for a textual field.
pub trait ValueGenerator {
    fn generate(&self, constraints: &SchemaConstraints) -> String;
}

/// Deterministic generator: the first textual enum value when there is one,
/// otherwise lowercase letters sized to `preferred_length` and clamped into
/// `[minLength, maxLength]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefaultValueGenerator {
    pub preferred_length: usize,
}

impl Default for DefaultValueGenerator {
    fn default() -> Self {
        Self {
            preferred_length: 10,
        }
    }
}

impl ValueGenerator for DefaultValueGenerator {
    fn generate(&self, constraints: &SchemaConstraints) -> String {
        if let Some(first) = constraints.enumeration.iter().find_map(Value::as_str) {
            return first.to_string();
        }

        let mut length = self.preferred_length;
        if let Some(max) = constraints.max_length {
            length = length.min(max);
        }
        if let Some(min) = constraints.min_length {
            length = length.max(min);
        }
        ('a'..='z').cycle().take(length).collect()
    }
}

// ---------------------------------------------------------------------------
// Strategy builders
// ---------------------------------------------------------------------------

/// Candidate strategies for a field, one per filler value.
///
/// Non-textual and `binary`/`byte` fields get a single `Skip`. Otherwise each
/// filler is spliced into the middle of a generated base value and wrapped in
/// a `Replace`. Fillers overwrite part of the base (keeping its length) only
/// when `maintain_size` is set and the field has no enumeration; enumerated
/// fields always get plain insertion.
pub fn get_fuzzing_strategies<S: AsRef<str>>(
    constraints: &SchemaConstraints,
    fillers: &[S],
    maintain_size: bool,
) -> Vec<MutationStrategy> {
    get_fuzzing_strategies_with(&DefaultValueGenerator::default(), constraints, fillers, maintain_size)
}

/// [`get_fuzzing_strategies`] with a caller-supplied base value generator.
pub fn get_fuzzing_strategies_with<G, S>(
    generator: &G,
    constraints: &SchemaConstraints,
    fillers: &[S],
    maintain_size: bool,
) -> Vec<MutationStrategy>
where
    G: ValueGenerator + ?Sized,
    S: AsRef<str>,
{
    if !constraints.is_textual() || constraints.is_binary() {
        tracing::debug!(
            schema_type = ?constraints.schema_type,
            format = ?constraints.format,
            "field is not fuzzable as a string, skipping"
        );
        return vec![MutationStrategy::skip().with_data(NOT_A_STRING_FIELD)];
    }

    let base = generator.generate(constraints);
    let insert_without_replace = !maintain_size || !constraints.enumeration.is_empty();
    tracing::debug!(
        base_length = base.chars().count(),
        insert_without_replace,
        fillers = fillers.len(),
        "building filler strategies"
    );

    fillers
        .iter()
        .map(|filler| {
            MutationStrategy::replace().with_data(insert_in_the_middle(
                &base,
                filler.as_ref(),
                insert_without_replace,
            ))
        })
        .collect()
}

/// `Replace` with `character` repeated past the field's `minLength`
/// (`minLength / len + 1` times), or `character` alone when no minimum is known.
pub fn repeated_character_strategy(
    constraints: Option<&SchemaConstraints>,
    character: &str,
) -> MutationStrategy {
    let unit = character.chars().count();
    let value = match constraints.and_then(|c| c.min_length) {
        Some(min_length) if unit > 0 => character.repeat(min_length / unit + 1),
        _ => character.to_string(),
    };
    MutationStrategy::replace().with_data(value)
}

/// A single `Replace` carrying a marked large string of roughly `size`
/// characters.
pub fn large_values_strategy(size: usize) -> Vec<MutationStrategy> {
    let sample_length = LARGE_STRING_SAMPLE.chars().count();
    let repetitions = size / sample_length;
    let body: String = if repetitions == 0 {
        LARGE_STRING_SAMPLE.chars().take(size).collect()
    } else {
        LARGE_STRING_SAMPLE.repeat(repetitions + 1)
    };
    vec![MutationStrategy::replace().with_data(mark_large_string(&body))]
}
