#![warn(missing_docs)]
//! Core decomposition logic for percentage-based UI layouts.
//!
//! A layout export is a flat array of boxes, each placed on the root canvas
//! in percent units and optionally pointing at a parent box. This crate
//! splits such an export into one document per parent, with every child
//! re-expressed relative to its own container, and provides the lookup used
//! to resolve a box inside one document. No I/O happens here; callers feed
//! in parsed boxes and write out the resulting documents.

pub mod decompose;
pub mod model;
pub mod reproject;
pub mod resolve;
pub mod slug;

// Re-export commonly used types
pub use decompose::{decompose, DecomposeError, DecomposeOptions, Decomposition, OrphanPolicy};
pub use model::{BoxNode, EntryGeometry, LayoutDocument, NormalizedEntry, RelativeGeometry};
pub use reproject::{reproject, round2};
pub use resolve::{resolve, Selector};
pub use slug::{document_key, file_stem, root_document_key, slugify};
