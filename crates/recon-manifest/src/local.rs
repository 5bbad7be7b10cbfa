//! Local directory fetcher
//!
//! Serves `file://` references by copying the referenced directory to
//! `<staging_root>/<component>`. The copy is built in a scratch directory and
//! swapped in afterwards, so a failed fetch leaves the previous copy intact.
//! Fetching the same reference twice yields the same tree. Directory links are
//! followed; a link back into its own ancestry is rejected, as is a source that
//! overlaps the staging target. Revisions are ignored for local directories.

use crate::fetch::{BundleFetcher, FetchError, StagedBundle};
use crate::source::SourceReference;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Fetcher for bundles already present on the local filesystem
#[derive(Debug, Clone)]
pub struct LocalBundleFetcher {
    staging_root: PathBuf,
}

impl LocalBundleFetcher {
    /// Create fetcher staging into `staging_root`
    #[inline]
    #[must_use]
    pub fn new(staging_root: impl Into<PathBuf>) -> Self {
        Self {
            staging_root: staging_root.into(),
        }
    }

    /// Staging root
    #[inline]
    #[must_use]
    pub fn staging_root(&self) -> &Path {
        &self.staging_root
    }
}

#[async_trait::async_trait]
impl BundleFetcher for LocalBundleFetcher {
    async fn fetch(
        &self,
        component: &str,
        reference: &SourceReference,
    ) -> Result<StagedBundle, FetchError> {
        if reference.scheme() != Some("file") {
            return Err(FetchError::unsupported(format!(
                "unsupported source scheme for {reference}: only file:// is served locally"
            )));
        }

        let source = source_dir(Path::new(reference.path())).await?;

        tokio::fs::create_dir_all(&self.staging_root).await?;
        let root = tokio::fs::canonicalize(&self.staging_root).await?;
        let target = root.join(component);
        if target.starts_with(&source) || source.starts_with(&target) {
            return Err(FetchError::unsupported(format!(
                "{}: overlaps staging directory {}",
                source.display(),
                target.display()
            )));
        }

        let token = Uuid::new_v4().simple();
        let scratch = root.join(format!(".{component}.tmp-{token}"));
        if let Err(err) = copy_tree(&source, &scratch).await {
            discard(&scratch).await;
            return Err(err);
        }
        replace_dir(&scratch, &target, &root.join(format!(".{component}.old-{token}"))).await?;

        tracing::debug!(
            component,
            source = %source.display(),
            target = %target.display(),
            "staged local bundle"
        );

        Ok(StagedBundle::new(self.staging_root.clone(), component))
    }
}

/// Canonical form of the referenced directory
async fn source_dir(path: &Path) -> Result<PathBuf, FetchError> {
    let source = match tokio::fs::canonicalize(path).await {
        Ok(source) => source,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Err(FetchError::not_found(format!(
                "{}: no such directory",
                path.display()
            )))
        }
        Err(err) => return Err(err.into()),
    };

    if tokio::fs::metadata(&source).await?.is_dir() {
        Ok(source)
    } else {
        Err(FetchError::not_found(format!(
            "{}: not a directory",
            path.display()
        )))
    }
}

/// Moves `scratch` to `target`. A previous `target` survives until the new
/// tree is in place.
async fn replace_dir(scratch: &Path, target: &Path, retired: &Path) -> Result<(), FetchError> {
    let had_previous = tokio::fs::try_exists(target).await?;
    if had_previous {
        if let Err(err) = tokio::fs::rename(target, retired).await {
            discard(scratch).await;
            return Err(err.into());
        }
    }

    if let Err(err) = tokio::fs::rename(scratch, target).await {
        if had_previous {
            if let Err(restore) = tokio::fs::rename(retired, target).await {
                tracing::error!(
                    target = %target.display(),
                    error = %restore,
                    "previous bundle could not be restored"
                );
            }
        }
        discard(scratch).await;
        return Err(err.into());
    }

    if had_previous {
        discard(retired).await;
    }
    Ok(())
}

async fn discard(dir: &Path) {
    if let Err(err) = tokio::fs::remove_dir_all(dir).await {
        if err.kind() != std::io::ErrorKind::NotFound {
            tracing::warn!(dir = %dir.display(), error = %err, "leftover staging directory");
        }
    }
}

/// Copies `source` into `target`, following directory links. `source` must be
/// canonical.
async fn copy_tree(source: &Path, target: &Path) -> Result<(), FetchError> {
    let mut pending = vec![(
        source.to_path_buf(),
        target.to_path_buf(),
        vec![source.to_path_buf()],
    )];

    while let Some((from, to, ancestors)) = pending.pop() {
        tokio::fs::create_dir_all(&to).await?;
        let mut entries = tokio::fs::read_dir(&from).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            let dest = to.join(entry.file_name());

            if !tokio::fs::metadata(&path).await?.is_dir() {
                tokio::fs::copy(&path, dest).await?;
                continue;
            }

            let real = tokio::fs::canonicalize(&path).await?;
            if ancestors.contains(&real) {
                return Err(FetchError::unsupported(format!(
                    "{}: directory link cycle",
                    path.display()
                )));
            }
            let mut chain = ancestors.clone();
            chain.push(real.clone());
            pending.push((real, dest, chain));
        }
    }

    Ok(())
}
