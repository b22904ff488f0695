use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// A figure inside a panel, described by its attributes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Figure {
    pub name: String,
    pub shape: String,
    #[serde(default = "default_fill")]
    pub fill: String,
    #[serde(default = "default_size")]
    pub size: f64,
    /// Degrees, counter-clockwise from the positive x-axis
    #[serde(default)]
    pub angle: i32,
    #[serde(default)]
    pub alignment: Option<String>,
}

fn default_fill() -> String {
    "no".to_string()
}

fn default_size() -> f64 {
    1.0
}

impl Figure {
    pub fn new(name: String, shape: String) -> Self {
        Self {
            name,
            shape,
            fill: default_fill(),
            size: default_size(),
            angle: 0,
            alignment: None,
        }
    }

    pub fn with_fill(mut self, fill: &str) -> Self {
        self.fill = fill.to_string();
        self
    }

    pub fn with_size(mut self, size: f64) -> Self {
        self.size = size;
        self
    }

    pub fn with_angle(mut self, angle: i32) -> Self {
        self.angle = angle;
        self
    }

    pub fn with_alignment(mut self, alignment: &str) -> Self {
        self.alignment = Some(alignment.to_string());
        self
    }

    /// Angle folded into `0..360`
    pub fn normalized_angle(&self) -> i32 {
        self.angle.rem_euclid(360)
    }
}

/// Two corresponding figures. A missing side means the figure was created or deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FigurePair {
    pub name: String,
    #[serde(default)]
    pub source: Option<Figure>,
    #[serde(default)]
    pub target: Option<Figure>,
}

impl FigurePair {
    pub fn new(name: String, source: Option<Figure>, target: Option<Figure>) -> Self {
        Self { name, source, target }
    }
}

/// Input document of the `compare` command
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FigureDocument {
    #[serde(default)]
    pub pairs: Vec<FigurePair>,
}

impl FigureDocument {
    pub fn from_yaml_str(contents: &str) -> Result<Self, DocumentError> {
        Ok(serde_yaml::from_str(contents)?)
    }

    pub fn load(path: &Path) -> Result<Self, DocumentError> {
        let contents = fs::read_to_string(path)?;
        let document = Self::from_yaml_str(&contents)?;
        log::debug!("Loaded {} figure pairs from {}", document.pairs.len(), path.display());
        Ok(document)
    }
}

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Failed to read figure document: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
