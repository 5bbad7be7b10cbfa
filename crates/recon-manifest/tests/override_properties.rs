//! Property tests for override resolution.
//!
//! - Without an override the descriptor comes back unchanged.
//! - An override without a sub-path keeps the overlay.
//! - An override with a sub-path selects exactly that overlay.

use proptest::prelude::*;
use recon_manifest::{
    BundleFetcher, FetchError, ManifestDescriptor, ManifestOverride, ManifestOverrideResolver,
    SourceReference, StagedBundle,
};
use std::sync::Arc;

struct EchoFetcher {
    base: String,
}

#[async_trait::async_trait]
impl BundleFetcher for EchoFetcher {
    async fn fetch(
        &self,
        component: &str,
        _reference: &SourceReference,
    ) -> Result<StagedBundle, FetchError> {
        Ok(StagedBundle::new(self.base.clone(), component))
    }
}

fn segment() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9-]{0,11}"
}

fn overlay() -> impl Strategy<Value = String> {
    prop::collection::vec(segment(), 1..4).prop_map(|parts| parts.join("/"))
}

fn block_on<F: std::future::Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap()
        .block_on(future)
}

proptest! {
    #[test]
    fn prop_absent_override_is_identity(
        base in segment(),
        dir in segment(),
        sub in overlay(),
    ) {
        let descriptor = ManifestDescriptor::new(format!("/{base}"), dir.clone(), sub);
        let resolver = ManifestOverrideResolver::new(
            dir,
            Arc::new(EchoFetcher { base: "/stage".into() }),
        );

        let resolved = block_on(resolver.resolve(None, &descriptor)).unwrap();
        prop_assert_eq!(resolved, descriptor);
    }

    #[test]
    fn prop_source_only_override_keeps_overlay(
        dir in segment(),
        sub in overlay(),
        repo in segment(),
        rev in segment(),
    ) {
        let descriptor = ManifestDescriptor::new("/manifests", dir.clone(), sub.clone());
        let resolver = ManifestOverrideResolver::new(
            dir.clone(),
            Arc::new(EchoFetcher { base: "/stage".into() }),
        );
        let uri: SourceReference = format!("git://{repo}@{rev}").parse().unwrap();
        let request = ManifestOverride::new(uri);

        let resolved = block_on(resolver.resolve(Some(&request), &descriptor)).unwrap();
        prop_assert_eq!(resolved.source_path(), sub.as_str());
        prop_assert_eq!(resolved.context_dir(), dir.as_str());
    }

    #[test]
    fn prop_sub_path_override_selects_overlay(
        dir in segment(),
        sub in overlay(),
        wanted in overlay(),
    ) {
        let descriptor = ManifestDescriptor::new("/manifests", dir.clone(), sub);
        let resolver = ManifestOverrideResolver::new(
            dir,
            Arc::new(EchoFetcher { base: "/stage".into() }),
        );
        let request = ManifestOverride::new("git://x@rev".parse().unwrap())
            .with_source_path(wanted.clone());

        let resolved = block_on(resolver.resolve(Some(&request), &descriptor)).unwrap();
        prop_assert_eq!(resolved.source_path(), wanted.as_str());
        prop_assert_eq!(resolved.base_path(), std::path::Path::new("/stage"));
    }
}
