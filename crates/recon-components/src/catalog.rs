//! Built-in component catalog

use crate::{feastoperator, featurestore};
use recon_pipeline::{CatalogConfig, DEFAULT_MANIFEST_ROOT};
use std::path::PathBuf;

/// Built-in catalog for every known component
#[must_use]
pub fn default_catalog() -> CatalogConfig {
    catalog_with_root(DEFAULT_MANIFEST_ROOT)
}

/// Built-in catalog staged under another root
#[must_use]
pub fn catalog_with_root(root: impl Into<PathBuf>) -> CatalogConfig {
    CatalogConfig::new(root)
        .with_component(featurestore::COMPONENT_NAME, featurestore::catalog_entry())
        .with_component(feastoperator::COMPONENT_NAME, feastoperator::catalog_entry())
}

#[cfg(test)]
mod tests {
    use super::*;
    use recon_manifest::ManifestDescriptor;

    #[test]
    fn default_catalog_validates() {
        let catalog = default_catalog();
        assert!(catalog.validate().is_ok());
        assert_eq!(
            catalog.default_manifest("feastoperator").unwrap(),
            ManifestDescriptor::new("/opt/manifests", "feastoperator", "default")
        );
    }

    #[test]
    fn serialized_catalog_parses_back() {
        let text = toml::to_string(&default_catalog()).unwrap();
        assert_eq!(CatalogConfig::from_toml_str(&text).unwrap(), default_catalog());
    }
}
