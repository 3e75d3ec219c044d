//! Core domain entities for the lakes catalog.
//!
//! A [`Lake`] is what the catalog stores; a [`LakeDraft`] is what a user fills in before
//! it is validated and normalised into a record.

mod draft;
mod lake;

pub use draft::{LakeDraft, NO_INFORMATION, PictureChoice};
pub use lake::Lake;
