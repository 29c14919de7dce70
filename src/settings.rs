use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::loader::LoadOptions;
use crate::render::PageMeta;

pub const ENV_PREFIX: &str = "SPECSITE";
pub const DEFAULT_CONFIG_FILE: &str = "specsite";

/// Build settings. Every field has a default, so an empty environment is a valid config.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct SiteConfig {
    pub data_dir: PathBuf,
    pub out_dir: PathBuf,
    pub out_file: String,
    pub recursive: bool,
    /// Write an empty `.nojekyll` next to the page so GitHub Pages serves it as-is.
    pub nojekyll: bool,
    pub title: String,
    pub description: String,
    pub keywords: String,
    pub site_url: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        let meta = PageMeta::default();
        SiteConfig {
            data_dir: PathBuf::from("data"),
            out_dir: PathBuf::from("docs"),
            out_file: "index.html".into(),
            recursive: true,
            nojekyll: true,
            title: meta.title,
            description: meta.description,
            keywords: meta.keywords,
            site_url: meta.site_url,
        }
    }
}

impl SiteConfig {
    /// Layered: config file (explicit path required, default `specsite.*` optional),
    /// then `SPECSITE_*` environment variables.
    pub fn load(file: Option<&Path>) -> Result<Self, ConfigError> {
        let file_source = match file {
            Some(p) => File::from(p).required(true),
            None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };
        Config::builder()
            .add_source(file_source)
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?
            .try_deserialize()
    }

    pub fn output_path(&self) -> PathBuf {
        self.out_dir.join(&self.out_file)
    }

    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            recursive: self.recursive,
        }
    }

    pub fn page_meta(&self) -> PageMeta {
        PageMeta {
            title: self.title.clone(),
            description: self.description.clone(),
            keywords: self.keywords.clone(),
            site_url: self.site_url.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let c = SiteConfig::default();
        assert_eq!(c.output_path(), PathBuf::from("docs").join("index.html"));
        assert!(c.recursive);
        assert!(c.nojekyll);
        assert_eq!(c.page_meta(), PageMeta::default());
    }

    #[test]
    fn file_overrides_some_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("site.toml");
        std::fs::write(
            &path,
            "data_dir = \"phones\"\nrecursive = false\nsite_url = \"https://specs.test\"\n",
        )
        .unwrap();

        let c = SiteConfig::load(Some(&path)).unwrap();
        assert_eq!(c.data_dir, PathBuf::from("phones"));
        assert!(!c.recursive);
        assert_eq!(c.site_url, "https://specs.test");
        assert_eq!(c.out_file, "index.html");
        assert!(!c.load_options().recursive);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(SiteConfig::load(Some(&dir.path().join("nope.toml"))).is_err());
    }
}
