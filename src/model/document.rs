//! Documents, the top-level model and load diagnostics.

use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::resource::export_images;
use crate::model::{Element, FindOptions, Page, Resource, TextOptions};

/// Separator between pages in whole-model text extraction.
const PAGE_BREAK: &str = "\u{c}";

/// A named page group: an ordered run of pages with its own tag map.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Document {
    /// Pages in the document
    pub pages: Vec<Page>,

    /// Metadata from the group's Tag Logical Element fields
    pub tags: HashMap<String, String>,
}

impl Document {
    /// Create a document from its pages and tags.
    pub fn new(pages: Vec<Page>, tags: HashMap<String, String>) -> Self {
        Self { pages, tags }
    }

    /// Number of pages in the document.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// All page text, pages separated by a form feed.
    pub fn get_text(&self) -> String {
        self.get_text_with(&TextOptions::default())
    }

    /// All page text with custom text options, pages separated by a
    /// form feed.
    pub fn get_text_with(&self, options: &TextOptions) -> String {
        self.pages
            .iter()
            .map(|page| page.get_text(options))
            .collect::<Vec<_>>()
            .join(PAGE_BREAK)
    }

    /// Matching text elements across all pages, tagged with their page
    /// index.
    pub fn find_text(
        &self,
        pattern: &str,
        options: &FindOptions,
    ) -> Result<Vec<(usize, &Element)>> {
        let mut results = Vec::new();
        for (page_num, page) in self.pages.iter().enumerate() {
            for element in page.find_text(pattern, options)? {
                results.push((page_num, element));
            }
        }
        Ok(results)
    }
}

/// The decoded print stream.
///
/// A stream with more than one named page group decodes to documents;
/// anything else decodes to a flat page list. Either way the model is
/// read-only once loaded and safe to share across readers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AfpModel {
    /// Documents or flat pages, depending on the stream
    pub content: ModelContent,

    /// Named resources, text overlays already applied to pages
    pub resources: HashMap<String, Resource>,

    /// Decode statistics
    pub diagnostics: Diagnostics,
}

/// Top-level shape of a decoded stream.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ModelContent {
    /// One document per named page group
    Documents {
        /// The documents, in stream order
        documents: Vec<Document>,
    },
    /// Pages without a document wrapper
    Pages {
        /// The pages, in stream order
        pages: Vec<Page>,
    },
}

impl AfpModel {
    /// Whether the stream decoded to multiple documents.
    pub fn is_multi_document(&self) -> bool {
        matches!(self.content, ModelContent::Documents { .. })
    }

    /// The documents, empty for a flat-page stream.
    pub fn documents(&self) -> &[Document] {
        match &self.content {
            ModelContent::Documents { documents } => documents,
            ModelContent::Pages { .. } => &[],
        }
    }

    /// Every page in stream order, across documents where present.
    pub fn pages(&self) -> Vec<&Page> {
        match &self.content {
            ModelContent::Documents { documents } => {
                documents.iter().flat_map(|d| d.pages.iter()).collect()
            }
            ModelContent::Pages { pages } => pages.iter().collect(),
        }
    }

    /// Total number of pages.
    pub fn page_count(&self) -> usize {
        self.pages().len()
    }

    /// Number of documents; zero for a flat-page stream.
    pub fn document_count(&self) -> usize {
        self.documents().len()
    }

    /// A page by zero-based index across the whole model.
    pub fn get_page(&self, index: usize) -> Option<&Page> {
        self.pages().get(index).copied()
    }

    /// All text in the model, pages separated by a form feed.
    pub fn get_text(&self) -> String {
        self.get_text_with(&TextOptions::default())
    }

    /// All text in the model with custom text options.
    pub fn get_text_with(&self, options: &TextOptions) -> String {
        self.pages()
            .iter()
            .map(|page| page.get_text(options))
            .collect::<Vec<_>>()
            .join(PAGE_BREAK)
    }

    /// Matching text elements across every page, tagged with the global
    /// page index.
    pub fn find_text(
        &self,
        pattern: &str,
        options: &FindOptions,
    ) -> Result<Vec<(usize, &Element)>> {
        let mut results = Vec::new();
        for (page_num, page) in self.pages().into_iter().enumerate() {
            for element in page.find_text(pattern, options)? {
                results.push((page_num, element));
            }
        }
        Ok(results)
    }

    /// A resource by name.
    pub fn get_resource(&self, name: &str) -> Option<&Resource> {
        self.resources.get(name)
    }

    /// Resource names, sorted.
    pub fn resource_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.resources.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Write every image resource to `dir`; see
    /// [`export_images`](crate::model::resource::export_images) for the
    /// count semantics.
    pub fn export_images<P: AsRef<Path>>(&self, dir: P) -> Result<usize> {
        export_images(&self.resources, dir.as_ref())
    }
}

/// Statistics recorded while loading a stream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Diagnostics {
    /// Structured fields read
    pub field_count: usize,

    /// Unknown fields retained in permissive mode
    pub unknown_field_count: u32,

    /// Presentation-text functions outside the catalog, skipped
    pub skipped_function_count: u32,

    /// Resources resolved
    pub resource_count: usize,

    /// Documents built; zero for a flat-page stream
    pub document_count: usize,

    /// Pages built, across documents where present
    pub page_count: usize,

    /// Wall-clock time spent decoding
    pub decode_time: Duration,

    /// When the load finished
    pub loaded_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Orientation;

    fn page(text: &str, baseline: u32) -> Page {
        Page::new(vec![Element::text(
            0,
            baseline,
            0,
            Orientation::Portrait,
            text,
        )])
    }

    fn diagnostics() -> Diagnostics {
        Diagnostics {
            field_count: 0,
            unknown_field_count: 0,
            skipped_function_count: 0,
            resource_count: 0,
            document_count: 0,
            page_count: 0,
            decode_time: Duration::from_millis(1),
            loaded_at: Utc::now(),
        }
    }

    #[test]
    fn test_document_text_pagebreaks() {
        let doc = Document::new(vec![page("one", 10), page("two", 10)], HashMap::new());
        assert_eq!(doc.get_text(), "one\u{c}two");
    }

    #[test]
    fn test_document_find_text_page_indices() {
        let doc = Document::new(
            vec![page("alpha", 10), page("beta", 10), page("alpha", 10)],
            HashMap::new(),
        );
        let results = doc.find_text("alpha", &FindOptions::new()).unwrap();
        let pages: Vec<usize> = results.iter().map(|(n, _)| *n).collect();
        assert_eq!(pages, [0, 2]);
    }

    #[test]
    fn test_model_flat_pages() {
        let model = AfpModel {
            content: ModelContent::Pages {
                pages: vec![page("one", 10), page("two", 10)],
            },
            resources: HashMap::new(),
            diagnostics: diagnostics(),
        };
        assert!(!model.is_multi_document());
        assert_eq!(model.page_count(), 2);
        assert_eq!(model.document_count(), 0);
        assert_eq!(model.get_text(), "one\u{c}two");
        assert!(model.get_page(1).is_some());
        assert!(model.get_page(2).is_none());
    }

    #[test]
    fn test_model_documents_flatten_pages() {
        let model = AfpModel {
            content: ModelContent::Documents {
                documents: vec![
                    Document::new(vec![page("a", 10)], HashMap::new()),
                    Document::new(vec![page("b", 10), page("c", 10)], HashMap::new()),
                ],
            },
            resources: HashMap::new(),
            diagnostics: diagnostics(),
        };
        assert!(model.is_multi_document());
        assert_eq!(model.page_count(), 3);
        assert_eq!(model.document_count(), 2);

        let results = model.find_text("c", &FindOptions::new()).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].0, 2);
    }

    #[test]
    fn test_resource_names_sorted() {
        let mut resources = HashMap::new();
        resources.insert("ZZZ".to_string(), Resource::TextOverlay { elements: vec![] });
        resources.insert("AAA".to_string(), Resource::TextOverlay { elements: vec![] });
        let model = AfpModel {
            content: ModelContent::Pages { pages: vec![] },
            resources,
            diagnostics: diagnostics(),
        };
        assert_eq!(model.resource_names(), ["AAA", "ZZZ"]);
    }
}
