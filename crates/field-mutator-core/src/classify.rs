//! Unicode character classification.
//!
//! Maps every character onto a fixed partition of general categories. Every
//! category other than [`CodePointCategory::Ordinary`] is "special": invisible,
//! separating or symbolic characters that the selector and formatter treat
//! differently from plain text.

use std::sync::OnceLock;

use regex::RegexSet;
use serde::{Deserialize, Serialize};

/// The category a single code point belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CodePointCategory {
    /// `Cc`
    Control,
    /// `Cf`
    Format,
    /// `Co`
    PrivateUse,
    /// `Cs`. Only reachable through [`classify_code_point`].
    Surrogate,
    /// `Zl`
    LineSeparator,
    /// `Zp`
    ParagraphSeparator,
    /// `Zs`
    SpaceSeparator,
    /// `So`
    OtherSymbol,
    /// `Sk`
    ModifierSymbol,
    /// Everything else: letters, marks, digits, punctuation, unassigned.
    Ordinary,
}

impl CodePointCategory {
    pub fn is_special(self) -> bool {
        !matches!(self, CodePointCategory::Ordinary)
    }

    /// Control, format, private-use and surrogate code points.
    pub fn is_control_like(self) -> bool {
        matches!(
            self,
            CodePointCategory::Control
                | CodePointCategory::Format
                | CodePointCategory::PrivateUse
                | CodePointCategory::Surrogate
        )
    }

    pub fn is_separator(self) -> bool {
        matches!(
            self,
            CodePointCategory::LineSeparator
                | CodePointCategory::ParagraphSeparator
                | CodePointCategory::SpaceSeparator
        )
    }

    pub fn is_symbol(self) -> bool {
        matches!(
            self,
            CodePointCategory::OtherSymbol | CodePointCategory::ModifierSymbol
        )
    }
}

// Index in this table == index of the pattern in the compiled set.
const CATEGORY_PATTERNS: &[(&str, CodePointCategory)] = &[
    (r"\A\p{Cc}\z", CodePointCategory::Control),
    (r"\A\p{Cf}\z", CodePointCategory::Format),
    (r"\A\p{Co}\z", CodePointCategory::PrivateUse),
    (r"\A\p{Zl}\z", CodePointCategory::LineSeparator),
    (r"\A\p{Zp}\z", CodePointCategory::ParagraphSeparator),
    (r"\A\p{Zs}\z", CodePointCategory::SpaceSeparator),
    (r"\A\p{So}\z", CodePointCategory::OtherSymbol),
    (r"\A\p{Sk}\z", CodePointCategory::ModifierSymbol),
];

fn category_set() -> &'static RegexSet {
    static SET: OnceLock<RegexSet> = OnceLock::new();
    SET.get_or_init(|| {
        RegexSet::new(CATEGORY_PATTERNS.iter().map(|(pattern, _)| *pattern))
            .expect("general category patterns are valid")
    })
}

/// Classify a single character.
pub fn classify(c: char) -> CodePointCategory {
    let mut buf = [0u8; 4];
    let encoded: &str = c.encode_utf8(&mut buf);
    category_set()
        .matches(encoded)
        .iter()
        .next()
        .map(|index| CATEGORY_PATTERNS[index].1)
        .unwrap_or(CodePointCategory::Ordinary)
}

/// Classify a raw code point, including the surrogate range that `char`
/// cannot represent. Values above `U+10FFFF` are [`CodePointCategory::Ordinary`].
pub fn classify_code_point(code_point: u32) -> CodePointCategory {
    if (0xD800..=0xDFFF).contains(&code_point) {
        return CodePointCategory::Surrogate;
    }
    char::from_u32(code_point)
        .map(classify)
        .unwrap_or(CodePointCategory::Ordinary)
}

/// Shorthand for `classify(c).is_special()`.
pub fn is_special(c: char) -> bool {
    classify(c).is_special()
}
