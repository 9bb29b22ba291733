//! CSS reconciliation and sanitization.
//!
//! The reconciler keeps a style's CSS buffer synchronized with its slug,
//! replacing untouched boilerplate and preserving authored content. The
//! sanitizer strips disallowed markup before persisting or publishing.

mod reconcile;
mod sanitize;

pub use reconcile::{boilerplate, looks_like_boilerplate, reconcile};
pub use sanitize::strip_disallowed_markup;
