//! Watch core: pure listing extraction and diffing, no IO.
mod diff;
mod extract;

pub use diff::{delivery_order, new_items};
pub use extract::{LinkExtractor, LinkFilter, DEFAULT_SITE_MARKER, DEFAULT_THUMBNAIL_MARKER};

/// One listed item on the source page, identified by its URL.
pub type Link = String;
