pub mod debounce;
pub mod display;
pub mod layout;
pub mod navigation;
pub mod noise;
pub mod zoom;

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// A single object in the field (a book, an artifact, a note)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    /// Unique key for this item (e.g., "broadway")
    pub key: String,
    /// Display title shown on the card
    pub title: String,
    /// Short meta line under the title
    pub meta: String,
    /// Declared importance in [0, 100]; heavier items sit closer to the center
    pub weight: f32,
    /// Longer description shown in the overlay header
    pub overlay_meta: String,
    /// Overlay body, rendered top to bottom
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub body: Vec<Block>,
}

impl Item {
    /// Fill fraction of the card's weight bar, in [0.18, 0.96].
    pub fn weight_fill(&self) -> f32 {
        self.weight.clamp(18.0, 96.0) / 100.0
    }

    /// Whether the body contains a zoomable artifact frame.
    pub fn has_artifact(&self) -> bool {
        self.body
            .iter()
            .any(|block| matches!(block, Block::Artifact { .. }))
    }
}

/// A piece of overlay content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Block {
    /// Small uppercase tag with a spark glyph
    Tag(String),
    /// Regular paragraph
    Paragraph(String),
    /// Emphasised paragraph set apart from its neighbours
    Emphasis(String),
    /// Fine print
    Small(String),
    /// Boxed callout with a heading and a list of lines
    Callout {
        heading: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        lines: Vec<String>,
    },
    /// Contact link; `label` precedes the address
    Mail { label: String, address: String },
    /// Zoomable image frame
    Artifact {
        /// Path of the image inside the embedded assets
        image_path: String,
        /// Alternative text shown while the image is unavailable
        alt: String,
    },
}

/// Root type for the catalog data file
pub type Catalog = Vec<Item>;

/// Errors found while validating a parsed catalog.
#[derive(Error, Debug, PartialEq)]
pub enum CatalogError {
    #[error("item '{key}' has weight {weight}, expected a value in [0, 100]")]
    WeightOutOfRange { key: String, weight: f32 },
    #[error("duplicate item key '{0}'")]
    DuplicateKey(String),
}

/// Checks the static content rules: weights in [0, 100] and unique keys.
pub fn validate_catalog(catalog: &[Item]) -> Result<(), CatalogError> {
    let mut seen = HashSet::new();
    for item in catalog {
        if !(0.0..=100.0).contains(&item.weight) {
            return Err(CatalogError::WeightOutOfRange {
                key: item.key.clone(),
                weight: item.weight,
            });
        }
        if !seen.insert(item.key.as_str()) {
            return Err(CatalogError::DuplicateKey(item.key.clone()));
        }
    }
    Ok(())
}

#[cfg(test)]
pub(crate) fn test_item(key: &str, weight: f32) -> Item {
    Item {
        key: key.to_owned(),
        title: key.to_owned(),
        meta: String::new(),
        weight,
        overlay_meta: String::new(),
        body: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weight_fill_is_clamped() {
        assert_eq!(test_item("a", 5.0).weight_fill(), 0.18);
        assert_eq!(test_item("b", 63.0).weight_fill(), 0.63);
        assert_eq!(test_item("c", 100.0).weight_fill(), 0.96);
    }

    #[test]
    fn test_validate_accepts_well_formed_catalog() {
        let catalog = vec![test_item("a", 0.0), test_item("b", 100.0)];
        assert_eq!(validate_catalog(&catalog), Ok(()));
    }

    #[test]
    fn test_validate_rejects_out_of_range_weight() {
        let catalog = vec![test_item("a", 101.0)];
        assert!(matches!(
            validate_catalog(&catalog),
            Err(CatalogError::WeightOutOfRange { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_duplicate_keys() {
        let catalog = vec![test_item("a", 10.0), test_item("a", 20.0)];
        assert_eq!(
            validate_catalog(&catalog),
            Err(CatalogError::DuplicateKey("a".to_owned()))
        );
    }

    #[test]
    fn test_has_artifact() {
        let mut item = test_item("a", 10.0);
        assert!(!item.has_artifact());
        item.body.push(Block::Artifact {
            image_path: "broadway.png".to_owned(),
            alt: String::new(),
        });
        assert!(item.has_artifact());
    }

    #[test]
    fn test_catalog_parses_from_ron() {
        let source = r#"[
            (
                key: "admin",
                title: "Administrative",
                meta: "correspondence",
                weight: 35.0,
                overlay_meta: "quiet",
                body: [
                    Tag("quiet operations"),
                    Mail(label: "Correspondence:", address: "a@b.c"),
                ],
            ),
        ]"#;
        let catalog: Catalog = ron::from_str(source).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog[0].weight, 35.0);
        assert_eq!(
            catalog[0].body[1],
            Block::Mail {
                label: "Correspondence:".to_owned(),
                address: "a@b.c".to_owned(),
            }
        );
    }
}
