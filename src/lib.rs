//! # html5out
//!
//! An HTML5 serializer for arena document trees, with a processing
//! instruction hook for rewriting the tree while it is built.
//!
//! The serializer knows the HTML5 writing rules that a generic XML
//! serializer gets wrong: void elements, raw text elements, SVG and MathML
//! name casing, and HTML escaping. The hook protocol lets a
//! `<?namespace prefix = uri ?>` instruction bind a prefix for the rest of the
//! build.
//!
//! ## Quick Start
//!
//! ```
//! use html5out::tree::builder::TreeBuilder;
//! use html5out::{serialize_html5, SerializeOptions};
//!
//! let mut builder = TreeBuilder::new().with_namespace_instructions();
//! builder.start_element("html", &[]);
//! builder
//!     .processing_instruction("namespace", "ui = urn:example:ui")
//!     .unwrap();
//! builder.start_element("ui:panel", &[]);
//! builder.text("a < b");
//! builder.end_element("ui:panel");
//! builder.start_element("br", &[]);
//! builder.end_element("html");
//! let doc = builder.finish();
//!
//! let html = serialize_html5(&doc, &SerializeOptions::default()).unwrap();
//! assert_eq!(
//!     html,
//!     "<!DOCTYPE html>\n<html><ui:panel>a &lt; b</ui:panel><br></html>\n"
//! );
//! ```

pub mod error;
pub mod html;
pub mod instruction;
pub mod namespace;
pub mod serial;
pub mod tree;
pub mod util;

// Re-export primary types at the crate root for convenience.
pub use error::{BuildError, InstructionError, SerializeError};
pub use instruction::{InstructionProcessor, NamespaceInstructionProcessor};
pub use serial::{serialize_document, serialize_html5, serialize_node, SerializeOptions};
pub use tree::{Attribute, Document, NodeId, NodeKind};
