//! Named reusable resources embedded in the print stream.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::Element;
use crate::parser::StructuredField;

/// A named resource from the stream's resource group.
///
/// Resource names are 8-character identifiers; a later resource with the
/// same name replaces the earlier one.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Resource {
    /// A reusable text overlay, included into pages at an offset
    TextOverlay {
        /// Decoded overlay elements, positioned relative to the
        /// overlay's own origin
        elements: Vec<Element>,
    },

    /// An embedded image, typically a compressed raster
    Image {
        /// Opaque image bytes
        #[serde(skip_serializing, default)]
        data: Vec<u8>,
    },

    /// Any other resource, kept as its unmodified field group
    RawBlock {
        /// The resource's fields, begin and end included
        fields: Vec<StructuredField>,
    },
}

impl Resource {
    /// Whether this resource is a text overlay.
    pub fn is_overlay(&self) -> bool {
        matches!(self, Resource::TextOverlay { .. })
    }

    /// Whether this resource is an image.
    pub fn is_image(&self) -> bool {
        matches!(self, Resource::Image { .. })
    }

    /// The overlay elements, if this resource is a text overlay.
    pub fn overlay_elements(&self) -> Option<&[Element]> {
        match self {
            Resource::TextOverlay { elements } => Some(elements),
            _ => None,
        }
    }

    /// Image bytes, if this resource is an image.
    pub fn image_data(&self) -> Option<&[u8]> {
        match self {
            Resource::Image { data } => Some(data),
            _ => None,
        }
    }

    /// File extension for an image resource, sniffed from magic bytes.
    ///
    /// Image segments in AFP archives are almost always JPEG, so that is
    /// the fallback when no signature matches.
    pub fn image_extension(data: &[u8]) -> &'static str {
        if data.starts_with(&[0xff, 0xd8, 0xff]) {
            return "jpg";
        }
        if data.starts_with(&[0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a]) {
            return "png";
        }
        if data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a") {
            return "gif";
        }
        if data.starts_with(&[0x49, 0x49, 0x2a, 0x00]) || data.starts_with(&[0x4d, 0x4d, 0x00, 0x2a])
        {
            return "tiff";
        }
        "jpg"
    }
}

/// Write every image resource to `dir` as `<name>.<ext>`.
///
/// The directory is created if absent. The returned count is the total
/// number of resources in the map, not the number of files written.
pub fn export_images(resources: &HashMap<String, Resource>, dir: &Path) -> Result<usize> {
    if resources.is_empty() {
        return Ok(0);
    }

    fs::create_dir_all(dir)?;

    for (name, resource) in resources {
        if let Resource::Image { data } = resource {
            let filename = format!("{}.{}", name, Resource::image_extension(data));
            fs::write(dir.join(filename), data)?;
        }
    }

    Ok(resources.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Orientation;

    #[test]
    fn test_resource_kinds() {
        let overlay = Resource::TextOverlay {
            elements: vec![Element::text(0, 0, 0, Orientation::Portrait, "x")],
        };
        assert!(overlay.is_overlay());
        assert!(!overlay.is_image());
        assert_eq!(overlay.overlay_elements().unwrap().len(), 1);

        let image = Resource::Image {
            data: vec![0xff, 0xd8, 0xff],
        };
        assert!(image.is_image());
        assert!(image.overlay_elements().is_none());
    }

    #[test]
    fn test_image_extension() {
        assert_eq!(Resource::image_extension(&[0xff, 0xd8, 0xff, 0xe0]), "jpg");
        assert_eq!(
            Resource::image_extension(&[0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a]),
            "png"
        );
        assert_eq!(Resource::image_extension(b"GIF89a..."), "gif");
        // Unknown payloads fall back to jpg.
        assert_eq!(Resource::image_extension(&[0x00, 0x01]), "jpg");
    }

    #[test]
    fn test_export_images_counts_all_resources() {
        let tmp = tempfile::tempdir().unwrap();
        let out = tmp.path().join("resources");

        let mut resources = HashMap::new();
        resources.insert(
            "IMGA0001".to_string(),
            Resource::Image {
                data: vec![0xff, 0xd8, 0xff, 0x01],
            },
        );
        resources.insert(
            "OVLY0001".to_string(),
            Resource::TextOverlay { elements: vec![] },
        );

        let count = export_images(&resources, &out).unwrap();
        // Total resource count, not files written.
        assert_eq!(count, 2);
        assert!(out.join("IMGA0001.jpg").exists());
        assert!(!out.join("OVLY0001.jpg").exists());
    }

    #[test]
    fn test_export_images_empty_map() {
        let tmp = tempfile::tempdir().unwrap();
        let out = tmp.path().join("never-created");
        let count = export_images(&HashMap::new(), &out).unwrap();
        assert_eq!(count, 0);
        assert!(!out.exists());
    }
}
