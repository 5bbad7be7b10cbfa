//! Manifest catalog configuration
//!
//! The catalog is the read-only table of default manifest locations and image
//! parameters per component. It is built once (from defaults or a TOML file)
//! and handed to the actions that need it.
//!
//! ```toml
//! manifest_root = "/opt/manifests"
//!
//! [components.featurestore]
//! context_dir = "featurestore"
//! source_path = "overlays/odh"
//! legacy_name = "feature-store-operator"
//!
//! [components.featurestore.images]
//! IMAGE_FEATURESTORE = "RELATED_IMAGE_ODH_FEATURE_STORE_IMAGE"
//! ```

use crate::error::ConfigurationError;
use recon_manifest::ManifestDescriptor;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};

/// Default root under which manifest trees are staged
pub const DEFAULT_MANIFEST_ROOT: &str = "/opt/manifests";

fn default_manifest_root() -> PathBuf {
    PathBuf::from(DEFAULT_MANIFEST_ROOT)
}

/// Catalog of default manifests per component
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Root shared by all components
    #[serde(default = "default_manifest_root")]
    pub manifest_root: PathBuf,
    /// Entries keyed by component name
    #[serde(default)]
    pub components: BTreeMap<String, ComponentEntry>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self::new(DEFAULT_MANIFEST_ROOT)
    }
}

impl CatalogConfig {
    /// Create empty catalog rooted at `manifest_root`
    #[inline]
    #[must_use]
    pub fn new(manifest_root: impl Into<PathBuf>) -> Self {
        Self {
            manifest_root: manifest_root.into(),
            components: BTreeMap::new(),
        }
    }

    /// Add or replace a component entry
    #[inline]
    #[must_use]
    pub fn with_component(mut self, name: impl Into<String>, entry: ComponentEntry) -> Self {
        self.components.insert(name.into(), entry);
        self
    }

    /// Parse and validate a TOML catalog
    ///
    /// # Errors
    /// [`ConfigurationError::Parse`] on malformed TOML, or any validation error.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigurationError> {
        let config: Self =
            toml::from_str(text).map_err(|e| ConfigurationError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML catalog file
    ///
    /// # Errors
    /// [`ConfigurationError::Read`] when the file cannot be read, otherwise as
    /// [`CatalogConfig::from_toml_str`].
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, ConfigurationError> {
        let path = path.as_ref();
        let text = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| ConfigurationError::Read {
                path: path.to_path_buf(),
                detail: e.to_string(),
            })?;
        let config = Self::from_toml_str(&text)?;
        tracing::info!(
            path = %path.display(),
            components = config.components.len(),
            "loaded manifest catalog"
        );
        Ok(config)
    }

    /// Check every entry
    ///
    /// # Errors
    /// The first defect found.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.manifest_root.as_os_str().is_empty() {
            return Err(ConfigurationError::EmptyManifestRoot);
        }
        for (name, entry) in &self.components {
            entry.validate(name)?;
        }
        Ok(())
    }

    /// Entry for a component
    ///
    /// # Errors
    /// [`ConfigurationError::MissingComponent`] if the component is not listed.
    pub fn component(&self, name: &str) -> Result<&ComponentEntry, ConfigurationError> {
        self.components
            .get(name)
            .ok_or_else(|| ConfigurationError::MissingComponent(name.to_string()))
    }

    /// Default (not yet overridden) manifest for a component
    ///
    /// # Errors
    /// Missing or malformed entry.
    pub fn default_manifest(&self, name: &str) -> Result<ManifestDescriptor, ConfigurationError> {
        if self.manifest_root.as_os_str().is_empty() {
            return Err(ConfigurationError::EmptyManifestRoot);
        }
        let entry = self.component(name)?;
        entry.validate(name)?;
        Ok(ManifestDescriptor::new(
            self.manifest_root.clone(),
            entry.context_dir.clone(),
            entry.source_path.clone(),
        ))
    }
}

/// Static data for one component
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentEntry {
    /// Directory under the manifest root
    pub context_dir: String,
    /// Overlay applied by default
    pub source_path: String,
    /// Name earlier releases labelled the component's deployments with
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legacy_name: Option<String>,
    /// Image parameter name → environment variable holding the image
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub images: BTreeMap<String, String>,
}

impl ComponentEntry {
    /// Create entry without images
    #[inline]
    #[must_use]
    pub fn new(context_dir: impl Into<String>, source_path: impl Into<String>) -> Self {
        Self {
            context_dir: context_dir.into(),
            source_path: source_path.into(),
            legacy_name: None,
            images: BTreeMap::new(),
        }
    }

    /// Set legacy name
    #[inline]
    #[must_use]
    pub fn with_legacy_name(mut self, name: impl Into<String>) -> Self {
        self.legacy_name = Some(name.into());
        self
    }

    /// Add image parameter
    #[inline]
    #[must_use]
    pub fn with_image(mut self, param: impl Into<String>, env_var: impl Into<String>) -> Self {
        self.images.insert(param.into(), env_var.into());
        self
    }

    /// Check the entry's paths
    ///
    /// The context directory must be one plain segment; the overlay must be a
    /// non-empty relative path that stays inside the context directory.
    ///
    /// # Errors
    /// [`ConfigurationError::InvalidContextDir`] or [`ConfigurationError::InvalidSourcePath`].
    pub fn validate(&self, component: &str) -> Result<(), ConfigurationError> {
        let mut dir = Path::new(&self.context_dir).components();
        let single_segment = matches!(
            (dir.next(), dir.next()),
            (Some(Component::Normal(_)), None)
        );
        if !single_segment {
            return Err(ConfigurationError::InvalidContextDir {
                component: component.to_string(),
                value: self.context_dir.clone(),
            });
        }

        let source = Path::new(&self.source_path);
        let contained = !self.source_path.is_empty()
            && source
                .components()
                .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
        if !contained {
            return Err(ConfigurationError::InvalidSourcePath {
                component: component.to_string(),
                value: self.source_path.clone(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
        manifest_root = "/manifests"

        [components.featurestore]
        context_dir = "featurestore"
        source_path = "overlays/odh"
        legacy_name = "feature-store-operator"

        [components.featurestore.images]
        IMAGE_FEATURESTORE = "RELATED_IMAGE_ODH_FEATURE_STORE_IMAGE"
    "#;

    #[test]
    fn parses_sample_catalog() {
        let config = CatalogConfig::from_toml_str(SAMPLE).unwrap();
        let entry = config.component("featurestore").unwrap();
        assert_eq!(entry.legacy_name.as_deref(), Some("feature-store-operator"));
        assert_eq!(
            entry.images.get("IMAGE_FEATURESTORE").map(String::as_str),
            Some("RELATED_IMAGE_ODH_FEATURE_STORE_IMAGE")
        );

        let manifest = config.default_manifest("featurestore").unwrap();
        assert_eq!(
            manifest,
            ManifestDescriptor::new("/manifests", "featurestore", "overlays/odh")
        );
    }

    #[test]
    fn manifest_root_defaults() {
        let config = CatalogConfig::from_toml_str("").unwrap();
        assert_eq!(config.manifest_root, PathBuf::from(DEFAULT_MANIFEST_ROOT));
        assert!(config.components.is_empty());
    }

    #[test]
    fn rejects_bad_paths() {
        for (dir, src) in [
            ("", "overlays/odh"),
            ("a/b", "overlays/odh"),
            ("..", "overlays/odh"),
            ("featurestore", ""),
            ("featurestore", "/etc"),
            ("featurestore", "overlays/../../etc"),
        ] {
            let entry = ComponentEntry::new(dir, src);
            assert!(entry.validate("featurestore").is_err(), "{dir:?} {src:?}");
        }
        assert!(ComponentEntry::new("featurestore", "default").validate("x").is_ok());
    }

    #[test]
    fn missing_component_is_configuration_error() {
        let config = CatalogConfig::default();
        assert_eq!(
            config.default_manifest("featurestore"),
            Err(ConfigurationError::MissingComponent("featurestore".into()))
        );
    }

    #[test]
    fn malformed_toml_is_parse_error() {
        let err = CatalogConfig::from_toml_str("manifest_root = [").unwrap_err();
        assert!(matches!(err, ConfigurationError::Parse(_)));
    }

    #[tokio::test]
    async fn loads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.toml");
        std::fs::write(&path, SAMPLE).unwrap();

        let config = CatalogConfig::load(&path).await.unwrap();
        assert!(config.components.contains_key("featurestore"));

        let missing = CatalogConfig::load(dir.path().join("missing.toml")).await;
        assert!(matches!(missing, Err(ConfigurationError::Read { .. })));
    }
}
