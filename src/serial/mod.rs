//! HTML5 serialization.
//!
//! Turns a `Document` tree back into HTML5 markup. See [`html`] for the
//! rendering rules.

pub mod html;

pub use html::{serialize_document, serialize_html5, serialize_node, SerializeOptions};
