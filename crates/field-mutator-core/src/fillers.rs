//! Filler catalogue: substrings used to probe how a service handles invisible
//! or unusual characters inside string fields.

use serde::{Deserialize, Serialize};

const CONTROL_CHARS: &[&str] = &[
    "\r\n", "\u{0000}", "\u{0007}", "\u{0008}", "\n", "\u{000B}", "\u{000C}", "\r", "\u{001B}",
    "\u{007F}", "\u{0080}", "\u{009F}", "\u{00AD}", "\u{061C}", "\u{180E}", "\u{200B}",
    "\u{200C}", "\u{200D}", "\u{200E}", "\u{200F}", "\u{202A}", "\u{202B}", "\u{202C}",
    "\u{202D}", "\u{202E}", "\u{2060}", "\u{2061}", "\u{2062}", "\u{2063}", "\u{2064}",
    "\u{206A}", "\u{206F}", "\u{FEFF}", "\u{FFF9}", "\u{FFFA}", "\u{FFFB}", "\u{E000}",
];

const SEPARATORS: &[&str] = &[
    " ", "\u{0009}", "\u{000C}", "\u{00A0}", "\u{1680}", "\u{2000}", "\u{2001}", "\u{2002}",
    "\u{2003}", "\u{2004}", "\u{2005}", "\u{2006}", "\u{2007}", "\u{2008}", "\u{2009}",
    "\u{200A}", "\u{2028}", "\u{2029}", "\u{202F}", "\u{205F}", "\u{3000}",
];

const SINGLE_CODE_POINT_EMOJIS: &[&str] = &[
    "\u{1F47B}", "\u{1F480}", "\u{1F976}", "\u{1F916}", "\u{1F47D}", "\u{1F525}", "\u{2603}",
    "\u{1F600}",
];

const MULTI_CODE_POINT_EMOJIS: &[&str] = &[
    "\u{1F469}\u{1F3FE}",
    "\u{1F468}\u{200D}\u{1F3ED}",
    "\u{1F3F3}\u{FE0F}\u{200D}\u{1F308}",
    "\u{1F468}\u{200D}\u{1F469}\u{200D}\u{1F467}\u{200D}\u{1F466}",
    "\u{1F1F7}\u{1F1F4}",
    "\u{2764}\u{FE0F}",
];

/// Control and format characters, including bidi overrides and the BOM.
pub fn control_chars() -> &'static [&'static str] {
    CONTROL_CHARS
}

/// Unicode whitespace and separators.
pub fn separators() -> &'static [&'static str] {
    SEPARATORS
}

pub fn single_code_point_emojis() -> &'static [&'static str] {
    SINGLE_CODE_POINT_EMOJIS
}

/// Emojis built from several code points (modifiers, ZWJ sequences, flags).
pub fn multi_code_point_emojis() -> &'static [&'static str] {
    MULTI_CODE_POINT_EMOJIS
}

/// Named filler catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FillerSet {
    ControlChars,
    Separators,
    SingleCodePointEmojis,
    MultiCodePointEmojis,
}

impl FillerSet {
    pub fn values(self) -> &'static [&'static str] {
        match self {
            FillerSet::ControlChars => control_chars(),
            FillerSet::Separators => separators(),
            FillerSet::SingleCodePointEmojis => single_code_point_emojis(),
            FillerSet::MultiCodePointEmojis => multi_code_point_emojis(),
        }
    }
}
