//! Source references for alternate manifest bundles
//!
//! Format: `<location>[@<revision>]`. The revision is read from the last path
//! segment only, so credentials in the authority of a reference with a path
//! (`https://user@host/org/repo`) are left alone. Without a path the authority
//! is the last segment: `git://user@host` pins revision `host` on `git://user`.
//!
//! # Examples
//! - `git://x@rev` → location `git://x`, revision `rev`
//! - `https://github.com/org/repo/tarball/main` → no revision
//! - `file:///srv/bundles/featurestore@v2` → location
//!   `file:///srv/bundles/featurestore`, revision `v2`

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Locator of a manifest bundle
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SourceReference {
    location: String,
    revision: Option<String>,
}

/// Errors from parsing a [`SourceReference`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SourceReferenceError {
    /// Reference is empty or whitespace
    #[error("source reference is empty")]
    Empty,

    /// Nothing before the `@`
    #[error("source reference '{0}' has no location")]
    MissingLocation(String),

    /// Nothing after the `@`
    #[error("source reference '{0}' has an empty revision")]
    EmptyRevision(String),
}

impl SourceReference {
    /// Create reference from parts
    #[inline]
    #[must_use]
    pub fn new(location: impl Into<String>, revision: Option<String>) -> Self {
        Self {
            location: location.into(),
            revision,
        }
    }

    /// Location without the revision
    #[inline]
    #[must_use]
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Revision, if one was pinned
    #[inline]
    #[must_use]
    pub fn revision(&self) -> Option<&str> {
        self.revision.as_deref()
    }

    /// URI scheme (`git`, `https`, `file`, ...)
    #[must_use]
    pub fn scheme(&self) -> Option<&str> {
        self.location.split_once("://").map(|(scheme, _)| scheme)
    }

    /// Location with the scheme stripped
    #[must_use]
    pub fn path(&self) -> &str {
        self.location
            .split_once("://")
            .map_or(self.location.as_str(), |(_, rest)| rest)
    }
}

impl FromStr for SourceReference {
    type Err = SourceReferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(SourceReferenceError::Empty);
        }

        let tail_start = s.rfind('/').map_or(0, |i| i + 1);
        let (head, tail) = s.split_at(tail_start);

        match tail.rsplit_once('@') {
            Some((name, revision)) => {
                if revision.is_empty() {
                    return Err(SourceReferenceError::EmptyRevision(s.to_string()));
                }
                if head.is_empty() && name.is_empty() {
                    return Err(SourceReferenceError::MissingLocation(s.to_string()));
                }
                Ok(Self {
                    location: format!("{head}{name}"),
                    revision: Some(revision.to_string()),
                })
            }
            None => Ok(Self {
                location: s.to_string(),
                revision: None,
            }),
        }
    }
}

impl TryFrom<String> for SourceReference {
    type Error = SourceReferenceError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SourceReference> for String {
    fn from(value: SourceReference) -> Self {
        value.to_string()
    }
}

impl Display for SourceReference {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.revision {
            Some(revision) => write!(f, "{}@{}", self.location, revision),
            None => write!(f, "{}", self.location),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_revision_from_last_segment() {
        let r: SourceReference = "git://x@rev".parse().unwrap();
        assert_eq!(r.location(), "git://x");
        assert_eq!(r.revision(), Some("rev"));
        assert_eq!(r.scheme(), Some("git"));
        assert_eq!(r.path(), "x");
    }

    #[test]
    fn authority_credentials_are_not_a_revision() {
        let r: SourceReference = "https://user@github.com/org/repo".parse().unwrap();
        assert_eq!(r.location(), "https://user@github.com/org/repo");
        assert_eq!(r.revision(), None);
    }

    #[test]
    fn authority_without_path_is_read_as_revision() {
        let r: SourceReference = "git://user@host".parse().unwrap();
        assert_eq!(r.location(), "git://user");
        assert_eq!(r.revision(), Some("host"));
    }

    #[test]
    fn file_reference_path() {
        let r: SourceReference = "file:///srv/bundles/fs@v2".parse().unwrap();
        assert_eq!(r.scheme(), Some("file"));
        assert_eq!(r.path(), "/srv/bundles/fs");
        assert_eq!(r.revision(), Some("v2"));
    }

    #[test]
    fn rejects_malformed() {
        assert_eq!("  ".parse::<SourceReference>(), Err(SourceReferenceError::Empty));
        assert!(matches!(
            "git://x@".parse::<SourceReference>(),
            Err(SourceReferenceError::EmptyRevision(_))
        ));
        assert!(matches!(
            "@rev".parse::<SourceReference>(),
            Err(SourceReferenceError::MissingLocation(_))
        ));
    }

    #[test]
    fn display_round_trips() {
        for raw in ["git://x@rev", "https://github.com/org/repo/tarball/main"] {
            let r: SourceReference = raw.parse().unwrap();
            assert_eq!(r.to_string(), raw);
        }
    }

    #[test]
    fn deserializes_from_string() {
        let r: SourceReference = serde_json::from_str("\"git://x@rev\"").unwrap();
        assert_eq!(r.revision(), Some("rev"));
        assert!(serde_json::from_str::<SourceReference>("\"\"").is_err());
    }
}
