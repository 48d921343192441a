//! Run configuration types (clonegen.toml format).

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root run configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// Generator-wide settings.
    pub generator: GeneratorConfig,

    /// Target classes, in request order. The generated document keeps this
    /// order regardless of how processing is scheduled.
    #[serde(rename = "class", default)]
    pub classes: Vec<ClassSpec>,
}

/// Generator-wide settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Namespace named by the emitted using-declaration.
    #[serde(default = "default_namespace")]
    pub namespace: String,

    /// Prefix of per-class header file names (`Ogre` -> `OgreFoo.h`).
    #[serde(default = "default_header_prefix")]
    pub header_prefix: String,

    /// Directory containing the per-class headers.
    pub header_dir: PathBuf,

    /// Path of the generated file.
    pub output: PathBuf,

    /// Parameter type of the generated clone routines, used whenever a
    /// class entry does not override it.
    #[serde(default)]
    pub most_base: Option<String>,

    /// Include search paths passed to the frontend.
    #[serde(default)]
    pub include_dirs: Vec<PathBuf>,

    /// libclang location override.
    #[serde(default)]
    pub library: Option<PathBuf>,

    /// Record type names copied as opaque aggregate values. An empty list
    /// means every by-value record field is treated that way.
    #[serde(default)]
    pub value_records: Vec<String>,
}

/// One target class.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassSpec {
    /// Class name, optionally namespace-qualified (`Ogre::ParticleSystem`).
    pub name: String,

    /// Replaces the parameter type of this class's clone routine.
    #[serde(default)]
    pub most_base: Option<String>,

    /// Replaces the discovered base-class chain. An empty list suppresses
    /// the base delegation call; used for classes whose runtime base is
    /// reached only through virtual dispatch and cannot be resolved from
    /// the AST.
    #[serde(default)]
    pub bases: Option<Vec<String>>,
}

fn default_namespace() -> String {
    "Ogre".to_string()
}

fn default_header_prefix() -> String {
    "Ogre".to_string()
}

impl RunConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &std::path::Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Parse configuration from TOML text.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> crate::Result<Self> {
        let config: RunConfig = toml::from_str(content)?;
        Ok(config)
    }

    /// Find a class entry by name.
    pub fn find_class(&self, name: &str) -> Option<&ClassSpec> {
        self.classes.iter().find(|c| c.name == name)
    }

    /// Parameter type for a class's clone routine: the per-class override,
    /// then the generator-wide setting, then the class's own simple name.
    pub fn most_base_for(&self, class: &ClassSpec) -> String {
        class
            .most_base
            .clone()
            .or_else(|| self.generator.most_base.clone())
            .unwrap_or_else(|| class.simple_name().to_string())
    }

    /// Check the inputs the generator cannot work without.
    pub fn validate(&self) -> crate::Result<()> {
        if self.generator.header_dir.as_os_str().is_empty() {
            return Err(crate::ConfigError::Validation(
                "header_dir must not be empty".to_string(),
            ));
        }
        if self.generator.output.as_os_str().is_empty() {
            return Err(crate::ConfigError::Validation(
                "output must not be empty".to_string(),
            ));
        }
        if let Some(dir) = self
            .generator
            .include_dirs
            .iter()
            .find(|d| d.as_os_str().is_empty())
        {
            return Err(crate::ConfigError::Validation(format!(
                "empty include directory entry: {:?}",
                dir
            )));
        }
        Ok(())
    }
}

impl ClassSpec {
    /// A class entry with no overrides.
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            most_base: None,
            bases: None,
        }
    }

    /// The unqualified class name, used for header lookup and includes.
    pub fn simple_name(&self) -> &str {
        self.name.rsplit("::").next().unwrap_or(&self.name)
    }
}
