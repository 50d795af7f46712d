//! Case-study profiles.
//!
//! A profile names the annotated source file, the output location, and the
//! method groups the statistics are broken down by. The built-in defaults
//! describe the verified ips4o Sorter, so the tool runs without any profile
//! file at all.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Relative path of the annotated source file scanned by default.
pub const DEFAULT_SOURCE: &str = "src/main/java/de/wiesler/Sorter.java";
/// Relative directory the table and the dump files go to by default.
pub const DEFAULT_OUTPUT_DIR: &str = "src/main/script";

/// Top-level profile definition.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Profile {
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Annotated source file, relative to the project root.
    #[serde(default = "default_source")]
    pub source: PathBuf,
    /// Directory receiving stats.csv and the jml/ dump directory, relative
    /// to the project root.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Signature prefixes the statistics are grouped by, in table row order.
    #[serde(default = "default_method_groups")]
    pub method_groups: Vec<String>,
}

fn default_source() -> PathBuf {
    PathBuf::from(DEFAULT_SOURCE)
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_DIR)
}

fn default_method_groups() -> Vec<String> {
    vec![
        "sort(int[] values)".to_string(),
        "sample(int[] values, int begin, int end, Storage storage)".to_string(),
        "fallback_sort(".to_string(),
        "sample_sort_recurse_on".to_string(),
    ]
}

impl Default for Profile {
    fn default() -> Self {
        Profile {
            version: String::new(),
            name: String::new(),
            description: None,
            source: default_source(),
            output_dir: default_output_dir(),
            method_groups: default_method_groups(),
        }
    }
}

impl Profile {
    /// Parse a profile from a YAML file.
    pub fn parse_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let profile: Profile = serde_yaml::from_str(&content)?;
        Ok(profile)
    }

    /// Path of the stats table, relative to the project root.
    pub fn stats_path(&self) -> PathBuf {
        self.output_dir.join("stats.csv")
    }

    /// Directory the annotation dumps go to, relative to the project root.
    pub fn dumps_dir(&self) -> PathBuf {
        self.output_dir.join("jml")
    }

    /// Stem of the dump file names, taken from the source file name.
    pub fn dump_stem(&self) -> String {
        self.source
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "annotations".to_string())
    }
}

/// Validate a profile for correctness.
pub fn validate(profile: &Profile) -> anyhow::Result<()> {
    if profile.source.as_os_str().is_empty() {
        anyhow::bail!("profile names no source file");
    }
    if profile.source.is_absolute() {
        anyhow::bail!(
            "source must be relative to the project root, got {:?}",
            profile.source
        );
    }
    if profile.output_dir.is_absolute() {
        anyhow::bail!(
            "output_dir must be relative to the project root, got {:?}",
            profile.output_dir
        );
    }
    if profile.method_groups.is_empty() {
        anyhow::bail!("profile needs at least one method group");
    }
    for group in &profile.method_groups {
        if group.trim().is_empty() {
            anyhow::bail!("method group prefixes must not be empty");
        }
    }
    Ok(())
}
