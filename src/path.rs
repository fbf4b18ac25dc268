//! Dotted field paths for locating values in nested payloads.
//!
//! This module provides [`FieldPath`], the identifier used for every entry in a
//! [`ValidationResult`](crate::ValidationResult) and for every lookup made by the
//! [`PathAccessor`](crate::PathAccessor). Segments are joined with `.`, so the
//! path to `city` inside `address` inside `user` renders as `user.address.city`.

use std::fmt::{self, Display};

/// The default separator between path segments.
pub const SEPARATOR: char = '.';

/// A path to a field in a nested payload.
///
/// Array positions are plain decimal segments (`items.0.name`), matching the
/// way arrays are traversed as index-keyed mappings.
///
/// # Example
///
/// ```rust
/// use usecase_core::FieldPath;
///
/// let path = FieldPath::root()
///     .push("user")
///     .push("address")
///     .push("city");
///
/// assert_eq!(path.to_string(), "user.address.city");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct FieldPath {
    segments: Vec<String>,
}

impl FieldPath {
    /// Creates an empty path representing the payload root.
    pub fn root() -> Self {
        Self::default()
    }

    /// Splits `path` on `separator` into segments.
    ///
    /// Every piece is kept, including empty ones, so `"a..b"` has three
    /// segments and `""` has a single empty segment.
    pub fn parse_with(path: &str, separator: char) -> Self {
        Self {
            segments: path.split(separator).map(str::to_string).collect(),
        }
    }

    /// Splits a dotted path into segments.
    pub fn parse(path: &str) -> Self {
        Self::parse_with(path, SEPARATOR)
    }

    /// Returns a new path with `segment` appended.
    ///
    /// This method does not modify the original path; it returns a new one.
    pub fn push(&self, segment: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment.into());
        Self { segments }
    }

    /// Returns true if this is the root path (no segments).
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns the number of segments in this path.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns true if this path has no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns an iterator over the path segments.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().map(String::as_str)
    }

    /// Returns the parent path, or None if this is root.
    pub fn parent(&self) -> Option<Self> {
        if self.segments.is_empty() {
            None
        } else {
            Some(Self {
                segments: self.segments[..self.segments.len() - 1].to_vec(),
            })
        }
    }

    /// Returns the last segment, or None if this is root.
    pub fn last(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }
}

impl Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                write!(f, "{}", SEPARATOR)?;
            }
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}

impl From<&str> for FieldPath {
    fn from(path: &str) -> Self {
        Self::parse(path)
    }
}
