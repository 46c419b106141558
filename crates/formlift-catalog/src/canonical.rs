//! Merging a matched catalog entry into an extracted field.
//!
//! The entry's key, title, type, and control defaults replace the field's,
//! with two carve-outs: non-empty extracted options always win over the
//! entry's defaults (the document knows its own option list), and a field
//! carrying a conditional link keeps its original key so the link target
//! stays resolvable.

use log::debug;

use formlift_core::Field;

use crate::Catalog;

/// Canonicalize one field in place. Returns `true` when a catalog entry
/// matched; an unmatched field passes through untouched with its locally
/// derived key.
pub fn canonicalize(field: &mut Field, catalog: &Catalog) -> bool {
    let Some(entry) = catalog.find(&field.key, &field.title) else {
        return false;
    };
    debug!("canonicalized `{}` -> `{}`", field.key, entry.key);

    let keep_key = field.control.condition.is_some();
    if !keep_key {
        field.key = entry.key.clone();
    }
    field.title = entry.title.clone();
    field.field_type = entry.field_type;
    if entry.section.is_some() {
        field.section = entry.section.clone();
    }

    field.control.kind = entry.control.kind.or(field.control.kind);
    if field.control.options.is_empty() && !entry.control.options.is_empty() {
        field.control.options = entry.control.options.clone();
        field.control.multi = entry.control.multi;
    }
    // Extracted options stay, and so does the multi flag that came with
    // them; condition and condition_list are always the field's own.
    true
}

/// Canonicalize every field in a list.
pub fn canonicalize_all(fields: &mut [Field], catalog: &Catalog) {
    for field in fields {
        canonicalize(field, catalog);
    }
}
