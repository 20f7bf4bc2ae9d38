//! Node descriptor types.
//!
//! The markup parser produces a tree of [`node::Node`] values which the
//! realization engine projects into a page. [`render`] serializes the same
//! tree straight to HTML without a page.

pub mod node;
mod render;
pub(crate) mod util;

pub use util::{css_property_name, html_escape, is_void_element};
