use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use ig_grid::GridSpec;
use serde::{Deserialize, Serialize};

use crate::error::BundleError;
use crate::sizes::{REFERENCE_SIZES, STEP_COUNT, SizeEntry};

/// How `favicon.ico` is encoded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FaviconFormat {
    /// Raw PNG bytes of the 32px raster under the `.ico` name.
    #[default]
    Png,
    /// A conformant single-image ICO container.
    Ico,
}

/// Fields of the generated `manifest.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManifestConfig {
    pub name: String,
    pub short_name: String,
    pub theme_color: String,
    pub background_color: String,
    pub display: String,
}

impl Default for ManifestConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            short_name: String::new(),
            theme_color: "#ffffff".to_string(),
            background_color: "#ffffff".to_string(),
            display: "standalone".to_string(),
        }
    }
}

/// Bundle settings. Every field has a default, so a JSON file only needs
/// the keys it overrides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BundleConfig {
    pub sizes: Vec<SizeEntry>,
    /// Index into each size's cell steps (`0` = finest).
    pub step: usize,
    /// Render and encode sizes on the rayon pool.
    pub parallel: bool,
    pub favicon: FaviconFormat,
    pub manifest: ManifestConfig,
    /// `TileColor` in `browserconfig.xml`.
    pub tile_color: String,
}

impl Default for BundleConfig {
    fn default() -> Self {
        Self {
            sizes: REFERENCE_SIZES.to_vec(),
            step: 0,
            parallel: true,
            favicon: FaviconFormat::default(),
            manifest: ManifestConfig::default(),
            tile_color: "#da532c".to_string(),
        }
    }
}

impl BundleConfig {
    pub fn from_json_str(json: &str) -> Result<Self, BundleError> {
        serde_json::from_str(json).map_err(|e| BundleError::Config(e.to_string()))
    }

    pub fn from_json_file(path: &Path) -> Result<Self, BundleError> {
        let data = fs::read_to_string(path)?;
        serde_json::from_str(&data)
            .map_err(|e| BundleError::Config(format!("{}: {e}", path.display())))
    }

    /// The step applies to every size, so an out-of-range step is rejected
    /// for the whole run.
    pub fn check_step(&self) -> Result<(), BundleError> {
        if self.step >= STEP_COUNT {
            return Err(BundleError::Config(format!(
                "step {} out of range, expected 0..{STEP_COUNT}",
                self.step
            )));
        }
        Ok(())
    }

    /// Grid spec for one size at the configured step.
    pub fn grid_spec(&self, entry: &SizeEntry) -> Result<GridSpec, BundleError> {
        let cell = entry.cell_for_step(self.step).ok_or_else(|| {
            BundleError::Config(format!(
                "step {} out of range, expected 0..{STEP_COUNT}",
                self.step
            ))
        })?;
        Ok(GridSpec::new(entry.size, cell)?)
    }

    /// Checks every size up front and reports all problems at once.
    pub fn validate(&self) -> Result<(), BundleError> {
        let mut problems = Vec::new();

        if self.step >= STEP_COUNT {
            problems.push(format!("step {} out of range, expected 0..{STEP_COUNT}", self.step));
        }

        let mut seen = BTreeSet::new();
        for entry in &self.sizes {
            if !seen.insert(entry.size) {
                problems.push(format!("size {} listed more than once", entry.size));
                continue;
            }
            if self.step < STEP_COUNT
                && let Err(err) = self.grid_spec(entry)
            {
                problems.push(err.to_string());
            }
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(BundleError::Config(problems.join("; ")))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::{BundleConfig, FaviconFormat};
    use crate::error::BundleError;
    use crate::sizes::SizeEntry;

    #[test]
    fn default_config_is_valid_at_finest_step() {
        let cfg = BundleConfig::default();
        assert_eq!(cfg.sizes.len(), 9);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = BundleConfig::from_json_str(
            r#"{ "favicon": "ico", "manifest": { "name": "Demo" }, "parallel": false }"#,
        )
        .expect("valid json");

        assert_eq!(cfg.favicon, FaviconFormat::Ico);
        assert_eq!(cfg.manifest.name, "Demo");
        assert_eq!(cfg.manifest.display, "standalone");
        assert!(!cfg.parallel);
        assert_eq!(cfg.sizes, BundleConfig::default().sizes);
    }

    #[test]
    fn reads_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, r##"{{ "step": 2, "tile_color": "#123456" }}"##).expect("write config");

        let cfg = BundleConfig::from_json_file(file.path()).expect("valid config file");
        assert_eq!(cfg.step, 2);
        assert_eq!(cfg.tile_color, "#123456");
    }

    #[test]
    fn validate_reports_every_bad_size() {
        let cfg = BundleConfig {
            step: 1,
            sizes: vec![
                SizeEntry::new(150, 10),
                SizeEntry::new(64, 4),
                SizeEntry::new(64, 4),
                SizeEntry::new(90, 7),
            ],
            ..BundleConfig::default()
        };

        let Err(BundleError::Config(msg)) = cfg.validate() else {
            panic!("expected config error");
        };
        assert!(msg.contains("grid size 150"), "{msg}");
        assert!(msg.contains("grid size 90"), "{msg}");
        assert!(msg.contains("size 64 listed more than once"), "{msg}");
    }

    #[test]
    fn step_out_of_range_is_rejected() {
        let cfg = BundleConfig {
            step: 3,
            ..BundleConfig::default()
        };
        assert!(matches!(
            cfg.grid_spec(&cfg.sizes[0]),
            Err(BundleError::Config(_))
        ));
        assert!(cfg.validate().is_err());
        assert!(matches!(cfg.check_step(), Err(BundleError::Config(_))));
        assert!(BundleConfig::default().check_step().is_ok());
    }
}
