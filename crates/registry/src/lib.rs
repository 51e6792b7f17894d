#![warn(missing_docs)]
//! Runtime consumption of layout documents.
//!
//! The split tool leaves one JSON array per hierarchy level on disk. At
//! runtime a presentation layer loads those into a [`LayoutRegistry`], picks
//! one document by key, and maps each of its elements' declared box
//! references to an absolute rectangle inside the current container. The
//! registry is an explicitly passed value; there is no ambient global store.

pub mod place;
pub mod registry;

pub use place::{place, AbsoluteRect, BoxRef, IndexedDocument, Placement};
pub use registry::{LayoutRegistry, RegistryError};
