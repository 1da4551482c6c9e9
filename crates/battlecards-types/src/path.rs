//! Structural paths into a battle card document.
//!
//! A path is written the way the view addresses fields: dotted keys for
//! mapping members and bracketed indices for sequence elements, e.g.
//! `acme.tabs[0].content[2].row[1]`. It is tokenised once into [`Seg`]s;
//! traversal never re-parses the string.

use crate::PathError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

/// A single segment in a path.
///
/// The variant records how the segment was written, not how it is applied:
/// the accessor decides between key and index lookup from the runtime type of
/// the container it is walking (see [`Seg::key_text`] and [`Seg::index_value`]).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Seg {
    /// Mapping member: `.key`
    Key(String),
    /// Sequence element: `[index]`
    Index(usize),
}

impl Seg {
    /// Text used when the segment is applied to a mapping.
    pub fn key_text(&self) -> Cow<'_, str> {
        match self {
            Seg::Key(k) => Cow::Borrowed(k),
            Seg::Index(i) => Cow::Owned(i.to_string()),
        }
    }

    /// Index used when the segment is applied to a sequence.
    pub fn index_value(&self) -> Option<usize> {
        match self {
            Seg::Key(k) => k.parse().ok(),
            Seg::Index(i) => Some(*i),
        }
    }

    #[inline]
    pub fn as_key(&self) -> Option<&str> {
        match self {
            Seg::Key(k) => Some(k),
            Seg::Index(_) => None,
        }
    }
}

impl From<&str> for Seg {
    fn from(s: &str) -> Self {
        Seg::Key(s.to_owned())
    }
}

impl From<String> for Seg {
    fn from(s: String) -> Self {
        Seg::Key(s)
    }
}

impl From<usize> for Seg {
    fn from(i: usize) -> Self {
        Seg::Index(i)
    }
}

/// A parsed path.
///
/// # Examples
///
/// ```
/// use battlecards_types::{Path, Seg};
///
/// let path = Path::parse("acme.tabs[0].title").unwrap();
/// assert_eq!(path.len(), 4);
/// assert_eq!(path.segments()[2], Seg::Index(0));
/// assert_eq!(path, Path::root().key("acme").key("tabs").index(0).key("title"));
/// assert_eq!(path.to_string(), "acme.tabs[0].title");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Path(Vec<Seg>);

impl Path {
    /// The empty path, addressing the document root.
    #[inline]
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Tokenise a path string.
    ///
    /// Rejects empty input, empty segments (`a..b`, trailing `.`), unclosed or
    /// stray brackets, and bracket contents other than word characters.
    /// Bracketed digits become [`Seg::Index`]; anything else is a [`Seg::Key`].
    pub fn parse(input: &str) -> Result<Self, PathError> {
        if input.is_empty() {
            return Err(PathError::malformed(input, "empty path"));
        }

        let mut segments = Vec::new();
        let mut rest = input;
        let mut first = true;

        while !rest.is_empty() {
            if let Some(after) = rest.strip_prefix('[') {
                let close = after
                    .find(']')
                    .ok_or_else(|| PathError::malformed(input, "unclosed '['"))?;
                let inner = &after[..close];
                if inner.is_empty() || !inner.chars().all(|c| c.is_alphanumeric() || c == '_') {
                    return Err(PathError::malformed(
                        input,
                        "brackets must hold an index or a word",
                    ));
                }
                segments.push(match inner.parse::<usize>() {
                    Ok(index) => Seg::Index(index),
                    Err(_) => Seg::Key(inner.to_string()),
                });
                rest = &after[close + 1..];
            } else {
                let body = if first {
                    rest
                } else {
                    rest.strip_prefix('.')
                        .ok_or_else(|| PathError::malformed(input, "expected '.' or '['"))?
                };
                let end = body.find(&['.', '[', ']'][..]).unwrap_or(body.len());
                let key = &body[..end];
                if key.is_empty() {
                    return Err(PathError::malformed(input, "empty segment"));
                }
                if body[end..].starts_with(']') {
                    return Err(PathError::malformed(input, "unbalanced ']'"));
                }
                segments.push(Seg::Key(key.to_string()));
                rest = &body[end..];
            }
            first = false;
        }

        Ok(Self(segments))
    }

    /// Append a key segment (builder).
    #[inline]
    pub fn key(mut self, k: impl Into<String>) -> Self {
        self.0.push(Seg::Key(k.into()));
        self
    }

    /// Append an index segment (builder).
    #[inline]
    pub fn index(mut self, i: usize) -> Self {
        self.0.push(Seg::Index(i));
        self
    }

    #[inline]
    pub fn segments(&self) -> &[Seg] {
        &self.0
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn last(&self) -> Option<&Seg> {
        self.0.last()
    }

    /// Path to the container of the final segment, or `None` for the root.
    pub fn parent(&self) -> Option<Path> {
        if self.0.is_empty() {
            None
        } else {
            Some(Path(self.0[..self.0.len() - 1].to_vec()))
        }
    }

    /// Split into parent segments and the final segment.
    pub fn split_last(&self) -> Option<(&Seg, &[Seg])> {
        self.0.split_last()
    }

    pub fn starts_with(&self, prefix: &Path) -> bool {
        self.0.starts_with(&prefix.0)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, seg) in self.0.iter().enumerate() {
            match seg {
                Seg::Key(k) if i == 0 => write!(f, "{}", k)?,
                Seg::Key(k) => write!(f, ".{}", k)?,
                Seg::Index(idx) => write!(f, "[{}]", idx)?,
            }
        }
        Ok(())
    }
}

impl FromStr for Path {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Path::parse(s)
    }
}

impl Serialize for Path {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Path {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Path::parse(&s).map_err(serde::de::Error::custom)
    }
}
