//! Pages and the element query surface.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::{Area, Element};

/// A single page: an ordered list of positioned elements.
///
/// Elements appear in field-encounter order; queries sort on demand.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Page {
    /// Elements on the page
    pub elements: Vec<Element>,
}

impl Page {
    /// Create a page from its elements.
    pub fn new(elements: Vec<Element>) -> Self {
        Self { elements }
    }

    /// Whether the page has no elements.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Number of elements on the page.
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// Text elements on the page, rules excluded.
    ///
    /// Filters and ordering follow the query: an optional inclusive
    /// area, an optional exact color, and position sorting by
    /// `(baseline, inline)` unless disabled.
    pub fn get_text_elements(&self, query: &ElementQuery) -> Vec<&Element> {
        let mut items: Vec<&Element> = self
            .elements
            .iter()
            .filter(|e| e.is_text())
            .filter(|e| query.area.map_or(true, |a| a.contains(e)))
            .filter(|e| query.color.map_or(true, |c| e.color == c))
            .collect();

        if query.sort {
            items.sort_by_key(|e| (e.baseline, e.inline));
        }

        items
    }

    /// Page text, joined by a delimiter.
    ///
    /// Takes the same filters as [`get_text_elements`](Self::get_text_elements);
    /// with `strip` enabled each element's text is trimmed and elements
    /// left empty are dropped.
    pub fn get_text(&self, options: &TextOptions) -> String {
        let elements = self.get_text_elements(&options.query);

        let mut parts: Vec<&str> = Vec::with_capacity(elements.len());
        for element in elements {
            let text = element.text_content().unwrap_or_default();
            if options.strip {
                let trimmed = text.trim();
                if !trimmed.is_empty() {
                    parts.push(trimmed);
                }
            } else {
                parts.push(text);
            }
        }

        parts.join(&options.delimiter)
    }

    /// Rule elements on the page, text excluded. Never sorted.
    pub fn get_rules(&self, area: Option<Area>, color: Option<u32>) -> Vec<&Element> {
        self.elements
            .iter()
            .filter(|e| e.is_rule())
            .filter(|e| area.map_or(true, |a| a.contains(e)))
            .filter(|e| color.map_or(true, |c| e.color == c))
            .collect()
    }

    /// Text elements matching a pattern, in element order.
    pub fn find_text(&self, pattern: &str, options: &FindOptions) -> Result<Vec<&Element>> {
        let regex = if options.regex {
            Some(Regex::new(pattern)?)
        } else {
            None
        };

        let mut items = Vec::new();
        for element in &self.elements {
            let Some(text) = element.text_content() else {
                continue;
            };

            let matched = match &regex {
                Some(re) => match re.find(text) {
                    Some(m) => !options.exact_match || m.as_str() == text,
                    None => false,
                },
                None => {
                    if options.exact_match {
                        text == pattern
                    } else {
                        text.contains(pattern)
                    }
                }
            };

            if matched && options.color.map_or(true, |c| element.color == c) {
                items.push(element);
            }
        }

        Ok(items)
    }

    /// Position of the first element matching a pattern.
    pub fn find_text_pos(
        &self,
        pattern: &str,
        options: &FindOptions,
    ) -> Result<Option<(u32, u32)>> {
        let matches = self.find_text(pattern, options)?;
        Ok(matches.first().map(|e| e.position()))
    }
}

/// Filters shared by element queries.
#[derive(Debug, Clone, Copy)]
pub struct ElementQuery {
    /// Restrict to an inclusive area
    pub area: Option<Area>,
    /// Sort ascending by `(baseline, inline)`
    pub sort: bool,
    /// Restrict to an exact 24-bit color
    pub color: Option<u32>,
}

impl ElementQuery {
    /// Create a query with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to an area.
    pub fn in_area(mut self, area: Area) -> Self {
        self.area = Some(area);
        self
    }

    /// Keep element order instead of sorting by position.
    pub fn unsorted(mut self) -> Self {
        self.sort = false;
        self
    }

    /// Restrict to an exact color.
    pub fn with_color(mut self, color: u32) -> Self {
        self.color = Some(color);
        self
    }
}

impl Default for ElementQuery {
    fn default() -> Self {
        Self {
            area: None,
            sort: true,
            color: None,
        }
    }
}

/// Options for [`Page::get_text`].
#[derive(Debug, Clone)]
pub struct TextOptions {
    /// Element filters and ordering
    pub query: ElementQuery,
    /// Separator between element texts
    pub delimiter: String,
    /// Trim element text, dropping elements left empty
    pub strip: bool,
}

impl TextOptions {
    /// Create text options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to an area.
    pub fn in_area(mut self, area: Area) -> Self {
        self.query.area = Some(area);
        self
    }

    /// Keep element order instead of sorting by position.
    pub fn unsorted(mut self) -> Self {
        self.query.sort = false;
        self
    }

    /// Restrict to an exact color.
    pub fn with_color(mut self, color: u32) -> Self {
        self.query.color = Some(color);
        self
    }

    /// Set the separator between element texts.
    pub fn with_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = delimiter.into();
        self
    }

    /// Keep element text verbatim, empty runs included.
    pub fn no_strip(mut self) -> Self {
        self.strip = false;
        self
    }
}

impl Default for TextOptions {
    fn default() -> Self {
        Self {
            query: ElementQuery::default(),
            delimiter: "\n".to_string(),
            strip: true,
        }
    }
}

/// Options for [`Page::find_text`].
#[derive(Debug, Clone, Copy)]
pub struct FindOptions {
    /// Treat the pattern as a regular expression
    pub regex: bool,
    /// Require the whole element text to match
    pub exact_match: bool,
    /// Restrict to an exact 24-bit color
    pub color: Option<u32>,
}

impl FindOptions {
    /// Create find options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Treat the pattern as a plain substring.
    pub fn substring(mut self) -> Self {
        self.regex = false;
        self
    }

    /// Require the whole element text to match.
    pub fn exact(mut self) -> Self {
        self.exact_match = true;
        self
    }

    /// Restrict to an exact color.
    pub fn with_color(mut self, color: u32) -> Self {
        self.color = Some(color);
        self
    }
}

impl Default for FindOptions {
    fn default() -> Self {
        Self {
            regex: true,
            exact_match: false,
            color: None,
        }
    }
}
