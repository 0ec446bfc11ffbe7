//! Labeled image corpus: loading, counting and the built-in fallback sample.

use std::fs;
use std::path::Path;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::quiz_engine::{
    error::Result,
    models::{ImageRecord, Part},
};

/// Ordered list of image records, serialized as a bare JSON array.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Corpus {
    images: Vec<ImageRecord>,
}

impl Corpus {
    pub fn new(images: Vec<ImageRecord>) -> Self {
        Corpus { images }
    }

    /// Parse a corpus from JSON text.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Read and parse a corpus file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path.as_ref())?;
        Self::from_json(&text)
    }

    /// Load `path`, or fall back to [`Corpus::sample`] if it cannot be read or parsed.
    pub fn load_or_sample(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::from_path(path) {
            Ok(corpus) => {
                info!(
                    "loaded corpus from {}: {} images, {} parts",
                    path.display(),
                    corpus.image_count(),
                    corpus.part_count()
                );
                corpus
            }
            Err(e) => {
                warn!("could not load corpus from {}: {e}; using built-in sample", path.display());
                Self::sample()
            }
        }
    }

    /// Single-image sample used when no corpus can be loaded.
    pub fn sample() -> Self {
        Corpus {
            images: vec![ImageRecord {
                image: "images/sin_nombres/1.png".to_string(),
                system: Some("esqueletico".to_string()),
                region: Some("cabeza".to_string()),
                parts: vec![Part {
                    name: "Hueso Parietal".to_string(),
                    x: 468.0,
                    y: 375.0,
                    width: 100.0,
                    height: 100.0,
                    hint: Some("Hueso par del cráneo que forma los laterales y techo".to_string()),
                }],
            }],
        }
    }

    pub fn images(&self) -> &[ImageRecord] {
        &self.images
    }

    pub fn image_count(&self) -> usize {
        self.images.len()
    }

    pub fn part_count(&self) -> usize {
        self.images.iter().map(|i| i.parts.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.part_count() == 0
    }

    /// Every part name in corpus order (image by image).
    pub fn part_names(&self) -> impl Iterator<Item = &str> {
        self.images
            .iter()
            .flat_map(|i| i.parts.iter().map(|p| p.name.as_str()))
    }
}
