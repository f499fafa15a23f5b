//! # field-mutator-core
//!
//! Decide how to alter a string field of a JSON document and apply that
//! alteration, including to every element when the field lives inside arrays.
//!
//! The pieces, leaves first:
//!
//! - [`classify`]: Unicode character classification ("special" vs ordinary).
//! - [`strategy`]: the closed set of mutation kinds and how each one processes
//!   an existing value.
//! - [`selector`]: infer a strategy from an existing value (`from_value`) and
//!   merge-fuzzing.
//! - [`catalog`]: candidate strategies for a field from its schema constraints
//!   and a list of fillers.
//! - [`mutator`]: apply a strategy to an addressed field (`replace_field`).
//! - [`format`]: escaping and truncation for human-readable output.
//!
//! ```
//! use field_mutator_core::{replace_field, MutationStrategy};
//!
//! let result = replace_field(
//!     r#"{"a":[{"b":1},{"b":2}]}"#,
//!     "a.b",
//!     &MutationStrategy::replace().with_data("X"),
//! )
//! .unwrap();
//! assert_eq!(result.document, r#"{"a":[{"b":"X"},{"b":"X"}]}"#);
//! ```

pub mod catalog;
pub mod classify;
pub mod config;
pub mod error;
pub mod fillers;
pub mod format;
pub mod mutator;
pub mod path;
pub mod selector;
pub mod strategy;

pub use catalog::{
    get_fuzzing_strategies, get_fuzzing_strategies_with, large_values_strategy,
    repeated_character_strategy, DefaultValueGenerator, SchemaConstraints, TypeDeclaration,
    ValueGenerator,
};
pub use classify::{classify, classify_code_point, is_special, CodePointCategory};
pub use config::{DiscriminatorSet, MutationOptions};
pub use error::{ErrorCode, MutationError};
pub use fillers::FillerSet;
pub use format::{format_value, truncated_value};
pub use mutator::{replace_field, replace_field_with_options, MutationResult};
pub use path::{lookup_nested, FieldAddress, FieldPath};
pub use selector::{from_value, is_large_string, mark_large_string, merge_fuzzing};
pub use strategy::{insert_in_the_middle, value_text, MutationStrategy, StrategyKind};
