use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use sprite_clipper::PipelineOptions;
use std::fs;
use std::path::{Component, Path, PathBuf};
use strum::{Display, EnumString, VariantNames};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error(transparent)]
    SerdeError(#[from] serde_json::Error),
    #[error(transparent)]
    TomlDeError(#[from] toml::de::Error),
    #[error(transparent)]
    TomlSerError(#[from] toml::ser::Error),
    #[error(transparent)]
    IoError(#[from] std::io::Error),
    #[error("Unsupported file format. Please use .toml or .json files")]
    UnsupportedFileFormat,
}

/// Encoding of the clip path document
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq,
    Serialize, Deserialize, JsonSchema,
    Display, EnumString, VariantNames,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum OutputFormat {
    /// `{ group, path, clipPaths }` document
    #[default]
    Json,
    /// FeatureCollection with one polygon per sprite
    Geojson,
}

/// Settings read from a config file; command-line flags take precedence
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(default)]
pub struct ClipperConfig {
    /// Group name written into the document; defaults to the image file stem
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(flatten)]
    pub pipeline: PipelineOptions,
    pub format: OutputFormat,
    /// Write the debug overlay PNG
    pub overlay: bool,
}

impl Default for ClipperConfig {
    fn default() -> Self {
        Self {
            group: None,
            pipeline: PipelineOptions::default(),
            format: OutputFormat::default(),
            overlay: true,
        }
    }
}

impl ClipperConfig {
    /// Load configuration from a TOML file
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Load configuration from TOML string
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from a JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Load configuration from JSON string
    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Auto-detect file format and load configuration
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path_ref = path.as_ref();
        match path_ref.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml_file(path),
            Some("json") => Self::from_json_file(path),
            _ => Err(ConfigError::UnsupportedFileFormat),
        }
    }

    /// Convert configuration to TOML string
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(&self)?)
    }

    /// Group name for `source`: the configured one or the file stem
    pub fn group_for(&self, source: &Path) -> String {
        self.group.clone().unwrap_or_else(|| file_stem(source))
    }
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "sprites".to_string())
}

/// `<source stem>.json` in the working directory
pub fn default_destination(source: &Path) -> PathBuf {
    PathBuf::from(format!("{}.json", file_stem(source)))
}

/// The destination with a `png` extension, unless that resolves to the
/// source image.
pub fn overlay_path(source: &Path, destination: &Path) -> PathBuf {
    let candidate = destination.with_extension("png");
    if same_file(source, &candidate) {
        destination.with_file_name(format!("{}.overlay.png", file_stem(destination)))
    } else {
        candidate
    }
}

fn same_file(a: &Path, b: &Path) -> bool {
    resolve(a) == resolve(b)
}

/// Canonical form of `path`, or of its parent when the file does not exist
/// yet, falling back to a lexically normalized absolute path.
fn resolve(path: &Path) -> PathBuf {
    if let Ok(canonical) = fs::canonicalize(path) {
        return canonical;
    }
    let absolute = absolute(path);
    if let (Some(parent), Some(name)) = (absolute.parent(), absolute.file_name()) {
        if let Ok(parent) = fs::canonicalize(parent) {
            return parent.join(name);
        }
    }
    absolute
}

fn absolute(path: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    };

    let mut normalized = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other),
        }
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;
    use sprite_clipper::{DegeneratePolicy, PixelSampling};

    #[test]
    fn test_toml_config_overrides_defaults() {
        let config = ClipperConfig::from_toml(
            r#"
            group = "hud"
            alpha_threshold = 12
            sampling = "corners"
            on_degenerate = "skip"
            format = "geojson"
            overlay = false
            "#,
        )
        .unwrap();

        assert_eq!(config.group.as_deref(), Some("hud"));
        assert_eq!(config.pipeline.alpha_threshold, 12);
        assert_eq!(config.pipeline.sampling, PixelSampling::Corners);
        assert_eq!(config.pipeline.on_degenerate, DegeneratePolicy::Skip);
        assert_eq!(config.pipeline.name_prefix, "sprite-");
        assert!(config.pipeline.boundary_only);
        assert_eq!(config.format, OutputFormat::Geojson);
        assert!(!config.overlay);
    }

    #[test]
    fn test_empty_config_is_default() {
        assert_eq!(ClipperConfig::from_json("{}").unwrap(), ClipperConfig::default());
        assert_eq!(ClipperConfig::from_toml("").unwrap(), ClipperConfig::default());
    }

    #[test]
    fn test_from_file_by_extension() {
        let dir = tempfile::tempdir().unwrap();

        let json = dir.path().join("clip.json");
        fs::write(&json, r#"{ "name_prefix": "icon-" }"#).unwrap();
        assert_eq!(ClipperConfig::from_file(&json).unwrap().pipeline.name_prefix, "icon-");

        let toml_path = dir.path().join("clip.toml");
        fs::write(&toml_path, ClipperConfig::default().to_toml().unwrap()).unwrap();
        assert_eq!(ClipperConfig::from_file(&toml_path).unwrap(), ClipperConfig::default());

        let yaml = dir.path().join("clip.yaml");
        fs::write(&yaml, "").unwrap();
        assert!(matches!(ClipperConfig::from_file(&yaml), Err(ConfigError::UnsupportedFileFormat)));
    }

    #[test]
    fn test_output_paths() {
        let source = Path::new("assets/sheet.png");
        assert_eq!(default_destination(source), PathBuf::from("sheet.json"));
        assert_eq!(overlay_path(source, Path::new("out/sheet.json")), PathBuf::from("out/sheet.png"));
        assert_eq!(
            overlay_path(source, Path::new("assets/sheet.json")),
            PathBuf::from("assets/sheet.overlay.png")
        );
        assert_eq!(ClipperConfig::default().group_for(source), "sheet");
    }

    #[test]
    fn test_overlay_never_resolves_to_source() {
        let dotted = Path::new("./sheet.png");
        assert_eq!(
            overlay_path(dotted, &default_destination(dotted)),
            PathBuf::from("sheet.overlay.png")
        );
        assert_eq!(
            overlay_path(Path::new("assets/../sheet.png"), Path::new("sheet.json")),
            PathBuf::from("sheet.overlay.png")
        );

        let cwd = std::env::current_dir().unwrap();
        assert_eq!(
            overlay_path(&cwd.join("sheet.png"), Path::new("sheet.json")),
            PathBuf::from("sheet.overlay.png")
        );
        assert_eq!(
            overlay_path(Path::new("sheet.png"), &cwd.join("sheet.json")),
            cwd.join("sheet.overlay.png")
        );

        let dir = tempfile::tempdir().unwrap();
        let sheet = dir.path().join("sheet.png");
        fs::write(&sheet, b"png").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        let destination = dir.path().join("nested").join("..").join("sheet.json");
        assert_eq!(
            overlay_path(&sheet, &destination),
            destination.with_file_name("sheet.overlay.png")
        );
        assert_eq!(
            overlay_path(&sheet, &dir.path().join("nested").join("sheet.json")),
            dir.path().join("nested").join("sheet.png")
        );
    }
}
