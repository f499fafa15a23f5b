//! Field addressing.
//!
//! Two address dialects reach this crate:
//!
//! 1. **Field paths** (`$.a.b`, `a[0].b`, `items[*].name`, `$['odd.key']`):
//!    dot/bracket JSON-path style, used to read and write document fields.
//!    `[n]` selects one array element, `[*]` selects every element (or every
//!    value of an object). A field step applied to an array projects over the
//!    array's elements, so `a.b` on `{"a": [{"b": 1}, {"b": 2}]}` matches both
//!    `b`s.
//! 2. **Nested names** (`a#b#c`): property names joined with `#`. They are
//!    kept verbatim and only used for read-only lookups; they are never parsed
//!    as field paths.
//!
//! Matched locations are reported as RFC 6901 JSON Pointers so they can be fed
//! straight to [`Value::pointer`] / [`Value::pointer_mut`].

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use crate::error::MutationError;

// ---------------------------------------------------------------------------
// JSON Pointer escaping (RFC 6901)
// ---------------------------------------------------------------------------

/// Escape a single pointer segment per RFC 6901.
///
/// - `~` → `~0`
/// - `/` → `~1`
///
/// Returns `Cow::Borrowed` when no escaping is needed (the common case).
pub fn escape_pointer_segment(segment: &str) -> Cow<'_, str> {
    if segment.contains('~') || segment.contains('/') {
        Cow::Owned(segment.replace('~', "~0").replace('/', "~1"))
    } else {
        Cow::Borrowed(segment)
    }
}

fn push_pointer_segment(pointer: &mut String, segment: &str) {
    pointer.push('/');
    pointer.push_str(&escape_pointer_segment(segment));
}

// ---------------------------------------------------------------------------
// Field paths
// ---------------------------------------------------------------------------

/// One step of a [`FieldPath`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Object property (projected over arrays).
    Field(String),
    /// Literal array index.
    Index(usize),
    /// Every element of an array, or every value of an object.
    Wildcard,
}

/// A parsed dot/bracket field path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldPath {
    segments: Vec<Segment>,
}

impl FieldPath {
    /// The document root.
    pub fn root() -> Self {
        Self::default()
    }

    /// Parse a field path. A leading `$` is optional; the empty string and
    /// `$` both denote the root.
    pub fn parse(input: &str) -> Result<Self, MutationError> {
        Parser::new(input).parse()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// True when any step is `[*]`.
    pub fn requests_all_elements(&self) -> bool {
        self.segments.contains(&Segment::Wildcard)
    }

    /// `[0]` followed by this path: reads through the first element of a root array.
    pub fn first_element_of_root(&self) -> Self {
        self.prepended(Segment::Index(0))
    }

    /// `[*]` followed by this path: broadcasts over every element of a root array.
    pub fn all_elements_of_root(&self) -> Self {
        self.prepended(Segment::Wildcard)
    }

    /// This path followed by `[*]`.
    pub fn with_all_elements(&self) -> Self {
        let mut segments = self.segments.clone();
        segments.push(Segment::Wildcard);
        Self { segments }
    }

    /// Name of the last property step, if any.
    pub fn property_name(&self) -> Option<&str> {
        self.segments.iter().rev().find_map(|segment| match segment {
            Segment::Field(name) => Some(name.as_str()),
            _ => None,
        })
    }

    fn prepended(&self, first: Segment) -> Self {
        let mut segments = Vec::with_capacity(self.segments.len() + 1);
        segments.push(first);
        segments.extend(self.segments.iter().cloned());
        Self { segments }
    }

    /// JSON Pointers of every location this path matches in `document`, in
    /// document order. Empty when nothing matches.
    pub fn select(&self, document: &Value) -> Vec<String> {
        let mut found = Vec::new();
        let mut pointer = String::new();
        select_into(document, &self.segments, &mut pointer, &mut found);
        found
    }
}

fn select_into(value: &Value, segments: &[Segment], pointer: &mut String, found: &mut Vec<String>) {
    let Some((segment, rest)) = segments.split_first() else {
        found.push(pointer.clone());
        return;
    };
    let mark = pointer.len();

    match (segment, value) {
        (Segment::Field(name), Value::Object(map)) => {
            if let Some(child) = map.get(name) {
                push_pointer_segment(pointer, name);
                select_into(child, rest, pointer, found);
            }
        }
        (Segment::Field(_), Value::Array(items)) => {
            // Projection: the same field step is applied to each element.
            for (index, item) in items.iter().enumerate() {
                push_pointer_segment(pointer, &index.to_string());
                select_into(item, segments, pointer, found);
                pointer.truncate(mark);
            }
        }
        (Segment::Index(index), Value::Array(items)) => {
            if let Some(item) = items.get(*index) {
                push_pointer_segment(pointer, &index.to_string());
                select_into(item, rest, pointer, found);
            }
        }
        (Segment::Wildcard, Value::Array(items)) => {
            for (index, item) in items.iter().enumerate() {
                push_pointer_segment(pointer, &index.to_string());
                select_into(item, rest, pointer, found);
                pointer.truncate(mark);
            }
        }
        (Segment::Wildcard, Value::Object(map)) => {
            for (key, child) in map {
                push_pointer_segment(pointer, key);
                select_into(child, rest, pointer, found);
                pointer.truncate(mark);
            }
        }
        _ => {
            tracing::trace!(?segment, "path segment does not apply to value");
        }
    }
    pointer.truncate(mark);
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("$")?;
        for segment in &self.segments {
            match segment {
                Segment::Field(name) if is_plain_name(name) => write!(f, ".{name}")?,
                Segment::Field(name) => {
                    f.write_str("['")?;
                    for c in name.chars() {
                        if c == '\'' || c == '\\' {
                            f.write_str("\\")?;
                        }
                        write!(f, "{c}")?;
                    }
                    f.write_str("']")?;
                }
                Segment::Index(index) => write!(f, "[{index}]")?,
                Segment::Wildcard => f.write_str("[*]")?,
            }
        }
        Ok(())
    }
}

impl FromStr for FieldPath {
    type Err = MutationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn is_plain_name(name: &str) -> bool {
    !name.is_empty()
        && !name
            .chars()
            .any(|c| matches!(c, '.' | '[' | ']' | '\'' | '"' | '\\' | '$') || c.is_whitespace())
}

struct Parser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn error(&self, reason: impl Into<String>) -> MutationError {
        MutationError::invalid_path(self.input, reason)
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn parse(mut self) -> Result<FieldPath, MutationError> {
        let mut segments = Vec::new();
        if self.rest().starts_with('$') {
            self.pos += 1;
        } else if !self.rest().is_empty() && !self.rest().starts_with('[') {
            // Bare leading name, e.g. `a.b`.
            segments.push(Segment::Field(self.name()?));
        }

        while let Some(c) = self.rest().chars().next() {
            match c {
                '.' => {
                    self.pos += 1;
                    segments.push(Segment::Field(self.name()?));
                }
                '[' => {
                    self.pos += 1;
                    segments.push(self.bracket()?);
                }
                other => {
                    return Err(self.error(format!("unexpected '{other}' at offset {}", self.pos)))
                }
            }
        }
        Ok(FieldPath { segments })
    }

    /// Unquoted property name up to the next `.` or `[`.
    fn name(&mut self) -> Result<String, MutationError> {
        let rest = self.rest();
        let len = rest.find(&['.', '['][..]).unwrap_or(rest.len());
        if len == 0 {
            return Err(self.error(format!("empty property name at offset {}", self.pos)));
        }
        self.pos += len;
        Ok(rest[..len].to_string())
    }

    /// Contents of `[...]`, the opening bracket already consumed.
    fn bracket(&mut self) -> Result<Segment, MutationError> {
        let rest = self.rest();
        let segment = match rest.chars().next() {
            Some(quote @ ('\'' | '"')) => {
                self.pos += 1;
                Segment::Field(self.quoted(quote)?)
            }
            Some(_) => {
                let len = rest
                    .find(']')
                    .ok_or_else(|| self.error("unterminated '['"))?;
                let inner = rest[..len].trim();
                self.pos += len;
                if inner == "*" {
                    Segment::Wildcard
                } else {
                    let index = inner
                        .parse::<usize>()
                        .map_err(|_| self.error(format!("invalid array selector '[{inner}]'")))?;
                    Segment::Index(index)
                }
            }
            None => return Err(self.error("unterminated '['")),
        };
        if !self.rest().starts_with(']') {
            return Err(self.error("expected ']'"));
        }
        self.pos += 1;
        Ok(segment)
    }

    /// Quoted name with backslash escapes, the opening quote already consumed.
    fn quoted(&mut self, quote: char) -> Result<String, MutationError> {
        let mut name = String::new();
        let mut chars = self.rest().char_indices();
        while let Some((offset, c)) = chars.next() {
            match c {
                '\\' => match chars.next() {
                    Some((_, escaped)) => name.push(escaped),
                    None => break,
                },
                c if c == quote => {
                    self.pos += offset + c.len_utf8();
                    return Ok(name);
                }
                c => name.push(c),
            }
        }
        Err(self.error("unterminated quoted name"))
    }
}

// ---------------------------------------------------------------------------
// Addresses
// ---------------------------------------------------------------------------

/// A field address in either dialect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldAddress {
    /// Dot/bracket path, used for mutation.
    Path(FieldPath),
    /// `#`-joined property names, kept verbatim for read-only lookups.
    NestedName(String),
}

impl FieldAddress {
    /// Parse a dot/bracket field path.
    pub fn parse(input: &str) -> Result<Self, MutationError> {
        FieldPath::parse(input).map(FieldAddress::Path)
    }

    /// Wrap a `#`-joined nested name without interpreting it.
    pub fn nested(name: impl Into<String>) -> Self {
        FieldAddress::NestedName(name.into())
    }

    /// The addressed property's own name: the last field step of a path, or
    /// the last `#` component of a nested name.
    pub fn property_name(&self) -> Option<&str> {
        match self {
            FieldAddress::Path(path) => path.property_name(),
            FieldAddress::NestedName(name) => name.rsplit('#').next().filter(|n| !n.is_empty()),
        }
    }
}

impl fmt::Display for FieldAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldAddress::Path(path) => path.fmt(f),
            FieldAddress::NestedName(name) => f.write_str(name),
        }
    }
}

/// Read-only lookup of a `#`-joined nested name.
///
/// Each component selects an object property; arrays met on the way are
/// entered through their first element.
pub fn lookup_nested<'a>(document: &'a Value, nested_name: &str) -> Option<&'a Value> {
    nested_name
        .split('#')
        .filter(|name| !name.is_empty())
        .try_fold(document, |current, name| {
            let current = match current {
                Value::Array(items) => items.first()?,
                other => other,
            };
            current.get(name)
        })
}
