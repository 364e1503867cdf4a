//! Symbol model: raw declaration records, validated symbols, and their locations.
//!
//! A [`Declaration`] is what an external extractor hands over. A [`Symbol`] is a validated
//! declaration; only the index builder and the artifact loader in this crate create them,
//! and nothing mutates one after construction.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::{LocationError, SymbolError};

/// Scope separator in qualified names.
pub const SCOPE_SEPARATOR: &str = "::";

/// The kind of a documented declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolKind {
    /// Class, struct, union, enum, or typedef.
    Type,
    /// Free function.
    Function,
    /// Member function or data member.
    Member,
    /// Namespace.
    Namespace,
    /// Enumerator, macro, or other constant.
    Constant,
}

impl SymbolKind {
    /// All kinds, in declaration order.
    pub const ALL: [Self; 5] = [
        Self::Type,
        Self::Function,
        Self::Member,
        Self::Namespace,
        Self::Constant,
    ];

    /// Returns the lowercase tag for this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Type => "type",
            Self::Function => "function",
            Self::Member => "member",
            Self::Namespace => "namespace",
            Self::Constant => "constant",
        }
    }
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SymbolKind {
    type Err = SymbolError;

    /// Parses a kind tag, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| SymbolError::UnknownKind {
                kind: s.to_string(),
            })
    }
}

/// A raw declaration record as supplied by an extraction tool.
///
/// Records are unvalidated; the builder turns them into [`Symbol`]s.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Declaration {
    /// `::`-delimited qualified name, e.g. `pcpp::Packet::insertLayer`.
    pub qualified_name: String,
    /// Kind tag: `type`, `function`, `member`, `namespace`, or `constant`.
    pub kind: String,
    /// Declaration form shown to disambiguate overloads. May be empty.
    #[serde(default)]
    pub signature: String,
    /// Document containing the anchor.
    pub page_id: String,
    /// Fragment identifier within the page.
    pub anchor: String,
}

impl Declaration {
    /// Creates a declaration record.
    pub fn new(
        qualified_name: impl Into<String>,
        kind: SymbolKind,
        signature: impl Into<String>,
        page_id: impl Into<String>,
        anchor: impl Into<String>,
    ) -> Self {
        Self {
            qualified_name: qualified_name.into(),
            kind: kind.as_str().to_string(),
            signature: signature.into(),
            page_id: page_id.into(),
            anchor: anchor.into(),
        }
    }
}

/// A navigable location: a page and an anchor within it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Location {
    /// Document identifier.
    pub page_id: String,
    /// Fragment identifier within the document.
    pub anchor: String,
}

impl Location {
    /// Parses a location from `page#anchor` form.
    pub fn parse(s: &str) -> Result<Self, LocationError> {
        match s.split_once('#') {
            Some((page, anchor)) if !page.is_empty() && !anchor.is_empty() => Ok(Self {
                page_id: page.to_string(),
                anchor: anchor.to_string(),
            }),
            _ => Err(LocationError::InvalidFormat(s.to_string())),
        }
    }

    /// Returns the link target, prefixed with `base` when given.
    pub fn href(&self, base: Option<&str>) -> String {
        match base {
            Some(base) => format!("{base}{self}"),
            None => self.to_string(),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.page_id, self.anchor)
    }
}

impl FromStr for Location {
    type Err = LocationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// One documented declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    /// Scope segments followed by the leaf name. Never empty.
    segments: Vec<String>,
    /// Declaration kind.
    kind: SymbolKind,
    /// Declaration form for display.
    signature: String,
    /// Where the declaration is documented.
    location: Location,
}

impl Symbol {
    /// Validates a raw record.
    pub(crate) fn from_declaration(decl: &Declaration) -> Result<Self, SymbolError> {
        let segments = split_qualified_name(&decl.qualified_name)?;
        let kind = decl.kind.parse()?;

        if decl.anchor.is_empty() {
            return Err(SymbolError::EmptyAnchor {
                qualified_name: decl.qualified_name.clone(),
            });
        }
        if decl.page_id.is_empty() {
            return Err(SymbolError::EmptyPage {
                qualified_name: decl.qualified_name.clone(),
            });
        }

        Ok(Self {
            segments,
            kind,
            signature: decl.signature.clone(),
            location: Location {
                page_id: decl.page_id.clone(),
                anchor: decl.anchor.clone(),
            },
        })
    }

    /// The leaf name, which is also the overload group key.
    pub fn display_key(&self) -> &str {
        self.segments.last().map_or("", String::as_str)
    }

    /// The full `::`-joined qualified name.
    pub fn qualified_name(&self) -> String {
        self.segments.join(SCOPE_SEPARATOR)
    }

    /// Scope segments followed by the leaf.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Enclosing scope segments, without the leaf.
    pub fn scope(&self) -> &[String] {
        &self.segments[..self.segments.len().saturating_sub(1)]
    }

    /// Declaration kind.
    pub fn kind(&self) -> SymbolKind {
        self.kind
    }

    /// Declaration form; empty when the source gave none.
    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// Page and anchor of the declaration.
    pub fn location(&self) -> &Location {
        &self.location
    }

    /// Converts back into a raw record.
    pub fn to_declaration(&self) -> Declaration {
        Declaration {
            qualified_name: self.qualified_name(),
            kind: self.kind.as_str().to_string(),
            signature: self.signature.clone(),
            page_id: self.location.page_id.clone(),
            anchor: self.location.anchor.clone(),
        }
    }
}

/// Splits a qualified name into segments.
///
/// Separators nested inside template arguments or parameter lists do not split, so
/// `Map<K, ns::V>::find` has two segments. A leading `::` (global scope) is dropped.
pub fn split_qualified_name(name: &str) -> Result<Vec<String>, SymbolError> {
    let trimmed = name.strip_prefix(SCOPE_SEPARATOR).unwrap_or(name);
    if trimmed.trim().is_empty() {
        return Err(SymbolError::EmptyName);
    }

    let mut segments = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    let bytes = trimmed.as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'<' | b'(' | b'[' => depth += 1,
            b'>' | b')' | b']' => depth = depth.saturating_sub(1),
            b':' if depth == 0 && bytes.get(i + 1) == Some(&b':') => {
                segments.push(&trimmed[start..i]);
                i += 2;
                start = i;
                continue;
            }
            _ => {}
        }
        i += 1;
    }
    segments.push(&trimmed[start..]);

    if segments.iter().any(|s| s.trim().is_empty()) {
        return Err(SymbolError::EmptySegment {
            qualified_name: name.to_string(),
        });
    }

    Ok(segments.into_iter().map(str::to_string).collect())
}
