//! Generator configuration.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::codegen::{Compiler, MarkerPolicy, CONTENTS_MARKER};
use crate::{Error, Result};

/// Directory holding the bundled list, template and generated header.
pub const DEFAULT_DATA_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/data");

/// Default rule list file name.
pub const DEFAULT_RULE_LIST: &str = "public_suffix_list.dat";

/// Default header template file name.
pub const DEFAULT_TEMPLATE: &str = "public_suffix_list.h.template";

/// Default generated header file name.
pub const DEFAULT_OUTPUT: &str = "public_suffix_list.h";

/// Paths and substitution settings for one generator run.
///
/// Relative paths are resolved against `base_dir`, which is the directory
/// of the config file when loaded with [`GenConfig::load`].
///
/// ```yaml
/// rule_list: public_suffix_list.dat
/// template: public_suffix_list.h.template
/// output: ../include/public_suffix_list.h
/// missing_marker: error
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenConfig {
    pub rule_list: PathBuf,
    pub template: PathBuf,
    pub output: PathBuf,
    pub marker: String,
    pub missing_marker: MarkerPolicy,
    #[serde(skip)]
    base_dir: PathBuf,
}

impl Default for GenConfig {
    fn default() -> Self {
        Self {
            rule_list: PathBuf::from(DEFAULT_RULE_LIST),
            template: PathBuf::from(DEFAULT_TEMPLATE),
            output: PathBuf::from(DEFAULT_OUTPUT),
            marker: CONTENTS_MARKER.to_string(),
            missing_marker: MarkerPolicy::Error,
            base_dir: PathBuf::from(DEFAULT_DATA_DIR),
        }
    }
}

impl GenConfig {
    /// Default file names resolved against `dir`.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: dir.into(),
            ..Self::default()
        }
    }

    /// Parse a YAML config. Relative paths resolve against `base_dir`.
    pub fn from_yaml(content: &str, base_dir: impl Into<PathBuf>) -> Result<Self> {
        let mut config: Self = serde_yaml::from_str(content)?;
        config.base_dir = base_dir.into();
        config.validate()?;
        Ok(config)
    }

    /// Load a YAML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let base_dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        log::debug!("Loaded config from {:?}", path);
        Self::from_yaml(&content, base_dir)
    }

    /// Check settings that would otherwise produce a wrong header.
    pub fn validate(&self) -> Result<()> {
        if self.marker.is_empty() {
            return Err(Error::Config("substitution marker must not be empty".into()));
        }
        for (name, path) in [
            ("rule_list", &self.rule_list),
            ("template", &self.template),
            ("output", &self.output),
        ] {
            if path.as_os_str().is_empty() {
                return Err(Error::Config(format!("{} path must not be empty", name)));
            }
        }
        Ok(())
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn set_base_dir(&mut self, dir: impl Into<PathBuf>) {
        self.base_dir = dir.into();
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }

    pub fn rule_list_path(&self) -> PathBuf {
        self.resolve(&self.rule_list)
    }

    pub fn template_path(&self) -> PathBuf {
        self.resolve(&self.template)
    }

    pub fn output_path(&self) -> PathBuf {
        self.resolve(&self.output)
    }

    /// Compiler for these substitution settings.
    pub fn compiler(&self) -> Compiler {
        Compiler::new()
            .with_marker(self.marker.clone())
            .with_policy(self.missing_marker)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_paths() {
        let config = GenConfig::in_dir("/srv/etld");
        assert_eq!(
            config.rule_list_path(),
            PathBuf::from("/srv/etld/public_suffix_list.dat")
        );
        assert_eq!(
            config.template_path(),
            PathBuf::from("/srv/etld/public_suffix_list.h.template")
        );
        assert_eq!(
            config.output_path(),
            PathBuf::from("/srv/etld/public_suffix_list.h")
        );
        assert_eq!(config.marker, CONTENTS_MARKER);
        assert_eq!(config.missing_marker, MarkerPolicy::Error);
    }

    #[test]
    fn test_default_data_dir() {
        let config = GenConfig::default();
        assert_eq!(config.base_dir(), Path::new(DEFAULT_DATA_DIR));
        assert!(DEFAULT_DATA_DIR.ends_with("/data"));
    }

    #[test]
    fn test_yaml_partial() {
        let yaml = r#"
output: /tmp/out/public_suffix_list.h
missing_marker: ignore
"#;
        let config = GenConfig::from_yaml(yaml, "/etc/psl").unwrap();
        assert_eq!(
            config.rule_list_path(),
            PathBuf::from("/etc/psl/public_suffix_list.dat")
        );
        assert_eq!(
            config.output_path(),
            PathBuf::from("/tmp/out/public_suffix_list.h")
        );
        assert_eq!(config.missing_marker, MarkerPolicy::Ignore);
        assert_eq!(config.compiler().policy(), MarkerPolicy::Ignore);
    }

    #[test]
    fn test_yaml_invalid() {
        assert!(matches!(
            GenConfig::from_yaml("missing_marker: sometimes", "."),
            Err(Error::Yaml(_))
        ));
        assert!(matches!(
            GenConfig::from_yaml("marker: \"\"", "."),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            GenConfig::from_yaml("template: \"\"", "."),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_load_resolves_against_config_dir() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("psl.yaml");
        fs::write(&path, "rule_list: lists/psl.dat\nmarker: \"@RULES@\"\n").unwrap();

        let config = GenConfig::load(&path).unwrap();
        assert_eq!(config.base_dir(), dir.path());
        assert_eq!(config.rule_list_path(), dir.path().join("lists/psl.dat"));
        assert_eq!(config.compiler().marker(), "@RULES@");
    }

    #[test]
    fn test_load_missing_file() {
        let err = GenConfig::load("/nonexistent/psl.yaml").unwrap_err();
        assert!(matches!(err, Error::Read { .. }));
    }
}
