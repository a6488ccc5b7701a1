//! Icon gallery: catalog, glyph providers and the gallery widget.

pub mod catalog;
pub mod gallery;
pub mod glyphs;

pub use catalog::{format_name, CategoryFilter, IconCatalog, IconCategory, IconEntry};
pub use gallery::{GalleryOptions, IconGallery};
pub use glyphs::{svg_snippet, GlyphSet, Glyphs, IconSet};
