//! Begin/end field grouping.
//!
//! Partitions a flat field sequence into blocks bounded by a matching
//! begin/end field-type pair. Grouping is a single forward pass with one
//! open-group slot: fields outside any begin/end pair are not part of
//! the grouping view, and a begin field encountered while a group is
//! already open discards the unfinished group.

use crate::error::{Error, Result};
use crate::parser::StructuredField;

/// An ordered run of fields from a begin field to its matching end
/// field, both inclusive.
#[derive(Debug, Clone)]
pub struct FieldGroup<'a> {
    /// The grouped fields; first is the begin field, last the end field.
    pub fields: Vec<&'a StructuredField>,
}

impl<'a> FieldGroup<'a> {
    /// The begin field that opened this group.
    pub fn begin(&self) -> &'a StructuredField {
        self.fields[0]
    }

    /// Whether the group contains a field of the given type.
    pub fn contains(&self, id: u32) -> bool {
        self.fields.iter().any(|f| f.id == id)
    }

    /// All fields of the given type, in group order.
    pub fn of_type(&self, id: u32) -> impl Iterator<Item = &'a StructuredField> + '_ {
        self.fields.iter().copied().filter(move |f| f.id == id)
    }

    /// Clone the grouped fields into an owned list.
    pub fn to_owned_fields(&self) -> Vec<StructuredField> {
        self.fields.iter().map(|f| (*f).clone()).collect()
    }
}

/// Collect every group delimited by the `begin`/`end` type pair.
///
/// Fails with [`Error::UnterminatedGroup`] if a group is still open when
/// the field sequence ends.
pub fn fields_between<'a, I>(fields: I, begin: u32, end: u32) -> Result<Vec<FieldGroup<'a>>>
where
    I: IntoIterator<Item = &'a StructuredField>,
{
    let mut groups = Vec::new();
    let mut open: Option<Vec<&StructuredField>> = None;

    for field in fields {
        if field.id == begin {
            if open.is_some() {
                log::debug!("group 0x{:06x} reopened before 0x{:06x}; discarding", begin, end);
            }
            open = Some(vec![field]);
        } else if field.id == end {
            // An end field with no open group is outside any pair.
            if let Some(mut fields) = open.take() {
                fields.push(field);
                groups.push(FieldGroup { fields });
            }
        } else if let Some(fields) = open.as_mut() {
            fields.push(field);
        }
    }

    if open.is_some() {
        return Err(Error::UnterminatedGroup { begin, end });
    }

    Ok(groups)
}
