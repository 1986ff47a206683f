//! Document model types for decoded AFP content.
//!
//! This module defines the read-only model produced by a load: pages of
//! positioned elements, optional document grouping, named resources and
//! the query surface over them.

mod document;
mod element;
mod page;
pub mod resource;

pub use document::{AfpModel, Diagnostics, Document, ModelContent};
pub use element::{Area, Element, ElementKind, Orientation, RuleAxis, DEVICE_DEFAULT_COLOR};
pub use page::{ElementQuery, FindOptions, Page, TextOptions};
pub use resource::Resource;
