//! Resource resolution.
//!
//! Walks the stream's Begin Resource / End Resource groups and builds
//! the name-keyed resource map pages draw overlays from. A resource is
//! classified by content: a presentation-text field makes it a text
//! overlay, image picture data makes it an image, anything else is kept
//! as a raw block.

use std::collections::HashMap;

use crate::consts::{sf, IMAGE_DATA_TAG};
use crate::encoding::ebcdic_to_string;
use crate::error::Result;
use crate::model::Resource;
use crate::parser::grouper::fields_between;
use crate::parser::ptoca::PtocaDecoder;
use crate::parser::{ParseOptions, StructuredField};

/// Length of a resource name in the begin field's payload.
const NAME_LEN: usize = 8;

/// Build the resource map from the full field list.
///
/// Later resources sharing a name overwrite earlier ones. With resource
/// extraction disabled, only text overlays are kept; pages still need
/// those to honor overlay inclusions.
pub fn resolve_resources(
    fields: &[StructuredField],
    decoder: &mut PtocaDecoder,
    options: &ParseOptions,
) -> Result<HashMap<String, Resource>> {
    let mut resources = HashMap::new();

    for group in fields_between(fields, sf::BRS, sf::ERS)? {
        let begin = group.begin();
        let name = ebcdic_to_string(&begin.data[..NAME_LEN.min(begin.data.len())]);

        if let Some(ptx) = group.of_type(sf::PTX).next() {
            let elements = decoder.decode(&ptx.data)?;
            resources.insert(name, Resource::TextOverlay { elements });
            continue;
        }

        let image_fields: Vec<_> = group.of_type(sf::IPD).collect();
        if !image_fields.is_empty() {
            let mut data = Vec::new();
            for field in image_fields {
                data.extend_from_slice(image_segment(&field.data));
            }
            // Image fields with no tagged segments contribute nothing,
            // and the resource name stays unbound.
            if !data.is_empty() && options.extract_resources {
                resources.insert(name, Resource::Image { data });
            }
            continue;
        }

        if options.extract_resources {
            resources.insert(
                name,
                Resource::RawBlock {
                    fields: group.to_owned_fields(),
                },
            );
        }
    }

    log::debug!("resolved {} resources", resources.len());
    Ok(resources)
}

/// The tagged image bytes of one Image Picture Data payload.
///
/// The payload opens with a two-byte sub-header and a two-byte segment
/// length; only segments carrying the image-data tag contribute.
fn image_segment(payload: &[u8]) -> &[u8] {
    if payload.len() < 4 {
        return &[];
    }
    let tag = u16::from_be_bytes([payload[0], payload[1]]);
    if tag != IMAGE_DATA_TAG {
        return &[];
    }
    let len = u16::from_be_bytes([payload[2], payload[3]]) as usize;
    &payload[4..(4 + len).min(payload.len())]
}
