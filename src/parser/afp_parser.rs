//! AFP stream parser: orchestration and page assembly.

use std::collections::HashMap;
use std::fs;
use std::io::Read;
use std::path::Path;
use std::time::{Duration, Instant};

use chrono::Utc;

use crate::consts::sf;
use crate::detect::detect_format_from_path;
use crate::encoding::ebcdic_to_string;
use crate::error::{Error, Result};
use crate::model::{AfpModel, Diagnostics, Document, ModelContent, Page, Resource};

use super::grouper::{fields_between, FieldGroup};
use super::options::ParseOptions;
use super::ptoca::PtocaDecoder;
use super::reader::{FieldReader, StructuredField};
use super::resources::resolve_resources;
use super::triplet::parse_triplets;

/// AFP print-stream parser.
///
/// Construction reads the whole stream into a field list; [`parse`](Self::parse)
/// then resolves resources and assembles the model. Decoding is fully
/// synchronous and single-pass over data already resident in memory.
pub struct AfpParser {
    fields: Vec<StructuredField>,
    unknown_fields: u32,
    read_time: Duration,
    options: ParseOptions,
}

impl AfpParser {
    /// Open an AFP file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_options(path, ParseOptions::default())
    }

    /// Open an AFP file with custom options.
    pub fn open_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Self> {
        let path = path.as_ref();

        // Verify it's an AFP print stream
        detect_format_from_path(path)?;

        let data = fs::read(path)?;
        Self::from_bytes_with_options(&data, options)
    }

    /// Parse an AFP stream from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_bytes_with_options(data, ParseOptions::default())
    }

    /// Parse an AFP stream from bytes with custom options.
    pub fn from_bytes_with_options(data: &[u8], options: ParseOptions) -> Result<Self> {
        let start = Instant::now();
        let (fields, unknown_fields) = FieldReader::new(data, options.error_mode).read_all()?;
        Ok(Self {
            fields,
            unknown_fields,
            read_time: start.elapsed(),
            options,
        })
    }

    /// Parse an AFP stream from a reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Self::from_reader_with_options(reader, ParseOptions::default())
    }

    /// Parse an AFP stream from a reader with custom options.
    pub fn from_reader_with_options<R: Read>(mut reader: R, options: ParseOptions) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes_with_options(&data, options)
    }

    /// The structured fields of the stream, in read order.
    pub fn fields(&self) -> &[StructuredField] {
        &self.fields
    }

    /// Number of fields with the given type code.
    pub fn count_fields(&self, id: u32) -> usize {
        self.fields.iter().filter(|f| f.id == id).count()
    }

    /// Decode the stream into a model.
    ///
    /// Resources are resolved first, then the stream mode is chosen: a
    /// stream with more than one named page group becomes a document
    /// list, anything else a flat page list. A load either completes
    /// fully or fails; no partial model is ever returned.
    pub fn parse(&self) -> Result<AfpModel> {
        let start = Instant::now();
        let mut decoder = PtocaDecoder::new();

        let resources = resolve_resources(&self.fields, &mut decoder, &self.options)?;

        let content = if self.count_fields(sf::BNG) > 1 {
            let mut documents = Vec::new();
            for group in fields_between(&self.fields, sf::BNG, sf::ENG)? {
                let tags = parse_triplets(group.of_type(sf::TLE));
                let mut pages = Vec::new();
                for page_group in
                    fields_between(group.fields.iter().copied(), sf::BPG, sf::EPG)?
                {
                    pages.push(self.build_page(&page_group, &resources, &mut decoder)?);
                }
                documents.push(Document::new(pages, tags));
            }
            ModelContent::Documents { documents }
        } else {
            let mut pages = Vec::new();
            for page_group in fields_between(&self.fields, sf::BPG, sf::EPG)? {
                pages.push(self.build_page(&page_group, &resources, &mut decoder)?);
            }
            ModelContent::Pages { pages }
        };

        let (document_count, page_count) = match &content {
            ModelContent::Documents { documents } => (
                documents.len(),
                documents.iter().map(|d| d.pages.len()).sum(),
            ),
            ModelContent::Pages { pages } => (0, pages.len()),
        };

        let diagnostics = Diagnostics {
            field_count: self.fields.len(),
            unknown_field_count: self.unknown_fields,
            skipped_function_count: decoder.skipped_functions,
            resource_count: resources.len(),
            document_count,
            page_count,
            decode_time: self.read_time + start.elapsed(),
            loaded_at: Utc::now(),
        };

        Ok(AfpModel {
            content,
            resources,
            diagnostics,
        })
    }

    /// Assemble one page from its field group.
    ///
    /// Presentation-text fields contribute their decoded elements;
    /// overlay inclusions contribute the named overlay's elements
    /// shifted by the inclusion origin. Everything lands in
    /// field-encounter order.
    fn build_page(
        &self,
        group: &FieldGroup<'_>,
        resources: &HashMap<String, Resource>,
        decoder: &mut PtocaDecoder,
    ) -> Result<Page> {
        let mut elements = Vec::new();

        for field in &group.fields {
            match field.id {
                sf::PTX => elements.extend(decoder.decode(&field.data)?),
                sf::IPO if self.options.incorporate_overlays => {
                    let data = &field.data;
                    let name = ebcdic_to_string(&data[..8.min(data.len())]);
                    let x_origin = be_uint(data.get(8..11));
                    let y_origin = be_uint(data.get(11..14));
                    // Trailing orientation is optional and informational.
                    let orientation = data.get(14..16).map(|o| be_uint(Some(o)));
                    log::debug!(
                        "including overlay {:?} at ({}, {}), orientation {:?}",
                        name,
                        x_origin,
                        y_origin,
                        orientation
                    );

                    let overlay = resources
                        .get(&name)
                        .and_then(Resource::overlay_elements)
                        .ok_or_else(|| Error::BadOverlayReference(name.clone()))?;
                    elements.extend(overlay.iter().map(|e| e.offset_by(x_origin, y_origin)));
                }
                _ => {}
            }
        }

        Ok(Page::new(elements))
    }
}

/// Big-endian unsigned integer over an optional field slice.
fn be_uint(data: Option<&[u8]>) -> u32 {
    data.unwrap_or_default()
        .iter()
        .fold(0u32, |acc, &b| (acc << 8) | u32::from(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{ptoca, PTOCA_ESCAPE};
    use crate::model::FindOptions;

    /// Encode one structured-field record.
    fn record(id: u32, payload: &[u8]) -> Vec<u8> {
        let len = (payload.len() + 8) as u16;
        let mut out = vec![0x5a];
        out.extend_from_slice(&len.to_be_bytes());
        out.extend_from_slice(&id.to_be_bytes()[1..]);
        out.extend_from_slice(&[0, 0, 0]);
        out.extend_from_slice(payload);
        out
    }

    fn instr(chained_self: bool, code: u8, data: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        if !chained_self {
            out.extend_from_slice(&PTOCA_ESCAPE.to_be_bytes());
        }
        out.push((data.len() + 2) as u8);
        out.push(code);
        out.extend_from_slice(data);
        out
    }

    /// Text payload placing EBCDIC text at (inline, baseline).
    fn text_payload(inline: u16, baseline: u16, ebcdic: &[u8]) -> Vec<u8> {
        let mut out = instr(false, ptoca::AMI | 1, &inline.to_be_bytes());
        out.extend(instr(true, ptoca::AMB | 1, &baseline.to_be_bytes()));
        out.extend(instr(true, ptoca::TRN, ebcdic));
        out
    }

    /// EBCDIC "OVLY0001"
    const OVERLAY_NAME: &[u8] = &[0xd6, 0xe5, 0xd3, 0xe8, 0xf0, 0xf0, 0xf0, 0xf1];

    fn flat_stream() -> Vec<u8> {
        let mut data = record(sf::BDT, b"");
        data.extend(record(sf::BPG, b""));
        data.extend(record(sf::PTX, &text_payload(10, 20, &[0xc1, 0xc2])));
        data.extend(record(sf::EPG, b""));
        data.extend(record(sf::BPG, b""));
        data.extend(record(sf::PTX, &text_payload(30, 40, &[0xc3])));
        data.extend(record(sf::EPG, b""));
        data.extend(record(sf::EDT, b""));
        data
    }

    #[test]
    fn test_flat_page_stream() {
        let model = AfpParser::from_bytes(&flat_stream()).unwrap().parse().unwrap();
        assert!(!model.is_multi_document());
        assert_eq!(model.page_count(), 2);
        assert_eq!(model.diagnostics.page_count, 2);
        assert_eq!(model.diagnostics.document_count, 0);
        assert_eq!(model.diagnostics.field_count, 8);
        assert_eq!(model.get_text(), "AB\u{c}C");
    }

    #[test]
    fn test_single_page_group_stays_flat() {
        // One named page group is not enough for document mode.
        let mut data = record(sf::BDT, b"");
        data.extend(record(sf::BNG, b""));
        data.extend(record(sf::BPG, b""));
        data.extend(record(sf::PTX, &text_payload(0, 0, &[0xc1])));
        data.extend(record(sf::EPG, b""));
        data.extend(record(sf::ENG, b""));
        data.extend(record(sf::EDT, b""));

        let model = AfpParser::from_bytes(&data).unwrap().parse().unwrap();
        assert!(!model.is_multi_document());
        assert_eq!(model.page_count(), 1);
    }

    #[test]
    fn test_multi_document_stream() {
        let tle = b"\x11\x02\x0b\x00\xc3\xa4\xa2\xa3\x96\x94\x85\x99\xc9\x95\xd9\xa4\x95\
                    \x09\x36\x00\x00\xf0\xf0\xf1\xf2\xf2";
        let mut data = record(sf::BDT, b"");
        for text in [&[0xc1u8][..], &[0xc2u8][..]] {
            data.extend(record(sf::BNG, b""));
            data.extend(record(sf::TLE, tle));
            data.extend(record(sf::BPG, b""));
            data.extend(record(sf::PTX, &text_payload(0, 0, text)));
            data.extend(record(sf::EPG, b""));
            data.extend(record(sf::ENG, b""));
        }
        data.extend(record(sf::EDT, b""));

        let model = AfpParser::from_bytes(&data).unwrap().parse().unwrap();
        assert!(model.is_multi_document());
        assert_eq!(model.document_count(), 2);
        assert_eq!(model.page_count(), 2);
        assert_eq!(
            model.documents()[0].tags.get("CustomerInRun").map(String::as_str),
            Some("00122")
        );
        assert_eq!(model.get_text(), "A\u{c}B");
    }

    #[test]
    fn test_overlay_inclusion_offsets_elements() {
        let mut data = record(sf::BRS, OVERLAY_NAME);
        data.extend(record(sf::PTX, &text_payload(10, 20, &[0xc1])));
        data.extend(record(sf::ERS, b""));
        data.extend(record(sf::BPG, b""));
        let mut ipo = OVERLAY_NAME.to_vec();
        ipo.extend_from_slice(&[0x00, 0x00, 0x05]); // x origin 5
        ipo.extend_from_slice(&[0x00, 0x00, 0x07]); // y origin 7
        data.extend(record(sf::IPO, &ipo));
        data.extend(record(sf::EPG, b""));

        let model = AfpParser::from_bytes(&data).unwrap().parse().unwrap();
        let pages = model.pages();
        assert_eq!(pages[0].elements.len(), 1);
        assert_eq!(pages[0].elements[0].position(), (15, 27));
        assert_eq!(pages[0].elements[0].text_content(), Some("A"));
    }

    #[test]
    fn test_overlay_inclusion_with_orientation_suffix() {
        let mut data = record(sf::BRS, OVERLAY_NAME);
        data.extend(record(sf::PTX, &text_payload(0, 0, &[0xc1])));
        data.extend(record(sf::ERS, b""));
        data.extend(record(sf::BPG, b""));
        let mut ipo = OVERLAY_NAME.to_vec();
        ipo.extend_from_slice(&[0x00, 0x00, 0x01, 0x00, 0x00, 0x02, 0x2d, 0x00]);
        data.extend(record(sf::IPO, &ipo));
        data.extend(record(sf::EPG, b""));

        let model = AfpParser::from_bytes(&data).unwrap().parse().unwrap();
        assert_eq!(model.pages()[0].elements[0].position(), (1, 2));
    }

    #[test]
    fn test_overlay_reference_missing_resource() {
        let mut data = record(sf::BPG, b"");
        let mut ipo = OVERLAY_NAME.to_vec();
        ipo.extend_from_slice(&[0, 0, 0, 0, 0, 0]);
        data.extend(record(sf::IPO, &ipo));
        data.extend(record(sf::EPG, b""));

        let result = AfpParser::from_bytes(&data).unwrap().parse();
        assert!(
            matches!(result, Err(Error::BadOverlayReference(ref name)) if name == "OVLY0001")
        );
    }

    #[test]
    fn test_overlay_reference_to_non_overlay() {
        // The named resource exists but is an image, not a text overlay.
        let mut data = record(sf::BRS, OVERLAY_NAME);
        let mut ipd = 0xfe92u16.to_be_bytes().to_vec();
        ipd.extend_from_slice(&1u16.to_be_bytes());
        ipd.push(0xab);
        data.extend(record(sf::IPD, &ipd));
        data.extend(record(sf::ERS, b""));
        data.extend(record(sf::BPG, b""));
        let mut ipo = OVERLAY_NAME.to_vec();
        ipo.extend_from_slice(&[0, 0, 0, 0, 0, 0]);
        data.extend(record(sf::IPO, &ipo));
        data.extend(record(sf::EPG, b""));

        let result = AfpParser::from_bytes(&data).unwrap().parse();
        assert!(matches!(result, Err(Error::BadOverlayReference(_))));
    }

    #[test]
    fn test_overlays_disabled() {
        let mut data = record(sf::BRS, OVERLAY_NAME);
        data.extend(record(sf::PTX, &text_payload(10, 20, &[0xc1])));
        data.extend(record(sf::ERS, b""));
        data.extend(record(sf::BPG, b""));
        let mut ipo = OVERLAY_NAME.to_vec();
        ipo.extend_from_slice(&[0, 0, 0, 0, 0, 0]);
        data.extend(record(sf::IPO, &ipo));
        data.extend(record(sf::EPG, b""));

        let options = ParseOptions::new().without_overlays();
        let model = AfpParser::from_bytes_with_options(&data, options)
            .unwrap()
            .parse()
            .unwrap();
        assert!(model.pages()[0].is_empty());
    }

    #[test]
    fn test_unterminated_page_group() {
        let mut data = record(sf::BPG, b"");
        data.extend(record(sf::PTX, &text_payload(0, 0, &[0xc1])));

        let result = AfpParser::from_bytes(&data).unwrap().parse();
        assert!(matches!(result, Err(Error::UnterminatedGroup { .. })));
    }

    #[test]
    fn test_empty_stream() {
        let model = AfpParser::from_bytes(&[]).unwrap().parse().unwrap();
        assert_eq!(model.page_count(), 0);
        assert!(!model.is_multi_document());
        assert_eq!(model.diagnostics.field_count, 0);
    }

    #[test]
    fn test_count_fields() {
        let parser = AfpParser::from_bytes(&flat_stream()).unwrap();
        assert_eq!(parser.count_fields(sf::BPG), 2);
        assert_eq!(parser.count_fields(sf::BNG), 0);
        assert_eq!(parser.fields().len(), 8);
    }

    #[test]
    fn test_diagnostics_counts() {
        let mut data = record(sf::BRS, OVERLAY_NAME);
        data.extend(record(sf::PTX, &text_payload(0, 0, &[0xc1])));
        data.extend(record(sf::ERS, b""));
        data.extend(flat_stream());

        let model = AfpParser::from_bytes(&data).unwrap().parse().unwrap();
        assert_eq!(model.diagnostics.resource_count, 1);
        assert_eq!(model.diagnostics.unknown_field_count, 0);
        assert_eq!(model.diagnostics.skipped_function_count, 0);

        let results = model.find_text("AB", &FindOptions::new()).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].0, 0);
    }
}
