//! Bundle fetch capability
//!
//! Fetching is owned by an external collaborator. The pipeline only needs to
//! know where the bundle ended up, or why it could not be retrieved.

use crate::source::SourceReference;
use std::path::PathBuf;

/// Stages a manifest bundle for a component
#[async_trait::async_trait]
pub trait BundleFetcher: Send + Sync {
    /// Fetch `reference` for `component` and report where it was staged
    async fn fetch(
        &self,
        component: &str,
        reference: &SourceReference,
    ) -> Result<StagedBundle, FetchError>;
}

/// Location of a staged bundle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedBundle {
    /// Staging root
    pub base_path: PathBuf,
    /// Bundle directory under the staging root
    pub context_dir: String,
}

impl StagedBundle {
    /// Create new staged bundle location
    #[inline]
    #[must_use]
    pub fn new(base_path: impl Into<PathBuf>, context_dir: impl Into<String>) -> Self {
        Self {
            base_path: base_path.into(),
            context_dir: context_dir.into(),
        }
    }
}

/// Classification of fetch failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchFailureKind {
    /// Network or remote host unavailable
    Unreachable,
    /// Reference or revision does not exist
    NotFound,
    /// Credentials rejected
    Unauthorized,
    /// Reference scheme not handled by this fetcher
    Unsupported,
    /// Local staging failed
    Io,
}

/// Bundle could not be retrieved
///
/// Displays the collaborator's diagnostic verbatim.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{detail}")]
pub struct FetchError {
    kind: FetchFailureKind,
    detail: String,
}

impl FetchError {
    /// Create new fetch error
    #[inline]
    #[must_use]
    pub fn new(kind: FetchFailureKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
        }
    }

    /// Remote unreachable
    #[inline]
    #[must_use]
    pub fn unreachable(detail: impl Into<String>) -> Self {
        Self::new(FetchFailureKind::Unreachable, detail)
    }

    /// Reference not found
    #[inline]
    #[must_use]
    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::new(FetchFailureKind::NotFound, detail)
    }

    /// Credentials rejected
    #[inline]
    #[must_use]
    pub fn unauthorized(detail: impl Into<String>) -> Self {
        Self::new(FetchFailureKind::Unauthorized, detail)
    }

    /// Scheme not supported
    #[inline]
    #[must_use]
    pub fn unsupported(detail: impl Into<String>) -> Self {
        Self::new(FetchFailureKind::Unsupported, detail)
    }

    /// Failure classification
    #[inline]
    #[must_use]
    pub fn kind(&self) -> FetchFailureKind {
        self.kind
    }

    /// Diagnostic text as reported by the fetcher
    #[inline]
    #[must_use]
    pub fn detail(&self) -> &str {
        &self.detail
    }
}

impl From<std::io::Error> for FetchError {
    fn from(err: std::io::Error) -> Self {
        Self::new(FetchFailureKind::Io, err.to_string())
    }
}
