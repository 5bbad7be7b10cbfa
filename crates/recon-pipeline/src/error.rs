//! Error types for the reconciliation pipeline
//!
//! Three failure families reach a pass outcome:
//! - [`ConfigurationError`]: static manifest table or config file is malformed (fatal)
//! - [`FetchError`]: override bundle could not be retrieved (transient)
//! - [`ApplyError`]: manifest set could not be applied (transient or permanent)
//!
//! Collaborator diagnostics are carried verbatim so the published condition
//! shows exactly what the fetcher or apply tool reported.

use crate::state::PassState;
use recon_manifest::FetchError;
use std::path::PathBuf;

/// Error returned by a pipeline action
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    /// Static configuration defect
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// Override bundle fetch failed
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Manifest apply failed
    #[error(transparent)]
    Apply(#[from] ApplyError),
}

impl ActionError {
    /// Diagnostic text, unmodified
    #[must_use]
    pub fn detail(&self) -> String {
        self.to_string()
    }

    /// Check if a later pass may succeed without a configuration change
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Configuration(_) => false,
            Self::Fetch(_) => true,
            Self::Apply(err) => err.kind() == ApplyFailureKind::Transient,
        }
    }

    /// Check if error indicates a programming or static-data defect
    #[inline]
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }
}

/// Malformed static configuration
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigurationError {
    /// Catalog text could not be parsed
    #[error("invalid manifest catalog: {0}")]
    Parse(String),

    /// Catalog file could not be read
    #[error("failed to read manifest catalog {path}: {detail}")]
    Read {
        /// File that was read
        path: PathBuf,
        /// Underlying I/O error
        detail: String,
    },

    /// Manifest root is empty
    #[error("manifest root is empty")]
    EmptyManifestRoot,

    /// No catalog entry for a component
    #[error("no manifest entry for component {0}")]
    MissingComponent(String),

    /// Context directory is not a single path segment
    #[error("component {component}: invalid context directory '{value}'")]
    InvalidContextDir {
        /// Component name
        component: String,
        /// Offending value
        value: String,
    },

    /// Overlay path is empty, absolute or escapes the context directory
    #[error("component {component}: invalid source path '{value}'")]
    InvalidSourcePath {
        /// Component name
        component: String,
        /// Offending value
        value: String,
    },

    /// Override requested but initialization registered no manifest
    #[error("component {0}: no manifest registered to override")]
    NoManifestToOverride(String),
}

/// Classification of apply failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyFailureKind {
    /// Environment contention, worth retrying
    Transient,
    /// Manifest is malformed or rejected
    Permanent,
}

/// Manifest set could not be applied
///
/// Displays the apply tool's diagnostic verbatim.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{detail}")]
pub struct ApplyError {
    kind: ApplyFailureKind,
    detail: String,
}

impl ApplyError {
    /// Create new apply error
    #[inline]
    #[must_use]
    pub fn new(kind: ApplyFailureKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
        }
    }

    /// Transient failure
    #[inline]
    #[must_use]
    pub fn transient(detail: impl Into<String>) -> Self {
        Self::new(ApplyFailureKind::Transient, detail)
    }

    /// Permanent failure
    #[inline]
    #[must_use]
    pub fn permanent(detail: impl Into<String>) -> Self {
        Self::new(ApplyFailureKind::Permanent, detail)
    }

    /// Failure classification
    #[inline]
    #[must_use]
    pub fn kind(&self) -> ApplyFailureKind {
        self.kind
    }

    /// Diagnostic text as reported by the apply tool
    #[inline]
    #[must_use]
    pub fn detail(&self) -> &str {
        &self.detail
    }
}

/// Illegal pass state transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("illegal pass transition {from:?} -> {to:?}")]
pub struct TransitionError {
    /// State the pass was in
    pub from: PassState,
    /// Requested state
    pub to: PassState,
}

/// Tracing subscriber could not be installed
#[derive(Debug, thiserror::Error)]
#[error("failed to install tracing subscriber: {0}")]
pub struct TelemetryError(pub String);
