//! Icon set description: source image, size specs, JSON load/save

use std::fs;
use std::path::{Component, Path, PathBuf};

use anyhow::{Context, Result};

use crate::image::PngCompression;

/// One icon to produce: target edge length and where to write it
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct IconSpec {
    /// Edge length in pixels; `None` keeps the crop edge
    #[serde(default)]
    pub size: Option<u32>,
    pub output: PathBuf,
}

impl IconSpec {
    pub fn new(size: u32, output: impl Into<PathBuf>) -> Self {
        Self {
            size: Some(size),
            output: output.into(),
        }
    }
}

/// A source image and the icons generated from it
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct IconSet {
    pub input: PathBuf,
    pub icons: Vec<IconSpec>,
    #[serde(default)]
    pub compression: PngCompression,
}

impl Default for IconSet {
    fn default() -> Self {
        Self {
            input: PathBuf::from("app/icon.png"),
            icons: vec![
                // Next.js app icon
                IconSpec::new(512, "app/icon.png"),
                IconSpec::new(512, "public/favicon.png"),
                IconSpec::new(180, "public/apple-touch-icon.png"),
                IconSpec::new(32, "public/favicon-32x32.png"),
                IconSpec::new(16, "public/favicon-16x16.png"),
            ],
            compression: PngCompression::Default,
        }
    }
}

impl IconSet {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read icon set {}", path.display()))?;

        serde_json::from_str(&contents)
            .with_context(|| format!("Invalid icon set {}", path.display()))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))
    }

    /// Whether any icon overwrites the source or another icon's output.
    ///
    /// Such sets depend on running in order.
    pub fn has_aliased_outputs(&self) -> bool {
        let input = normalize(&self.input);
        let outputs: Vec<_> = self.icons.iter().map(|s| normalize(&s.output)).collect();

        outputs
            .iter()
            .enumerate()
            .any(|(i, out)| *out == input || outputs[i + 1..].contains(out))
    }
}

/// Absolute form of `path` with `.` and `..` resolved lexically
fn normalize(path: &Path) -> PathBuf {
    let path = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());

    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other),
        }
    }
    out
}
