//! Node type definitions.
//!
//! The `NodeKind` enum represents the node types an HTML5 document tree can
//! hold. Each variant carries the node-type-specific payload (e.g., element
//! name and attributes, text content).

use super::Attribute;

/// The kind of a node and its associated data.
///
/// This enum carries the payload for each node type. Navigation links
/// (parent, children, siblings) are stored in `NodeData`, not here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// The document node. There is exactly one per `Document`.
    Document,

    /// An element node, e.g., `<div class="x">`.
    Element {
        /// The element's local name.
        name: String,
        /// Namespace prefix (e.g., `"foo"` in `foo:widget`), if any.
        prefix: Option<String>,
        /// Namespace URI, if the element belongs to one.
        namespace: Option<String>,
        /// Attributes on this element, in document order.
        attributes: Vec<Attribute>,
    },

    /// A text node containing character data.
    Text {
        /// The text content, with character references already resolved.
        content: String,
    },

    /// A CDATA section, e.g., `<![CDATA[...]]>`.
    CData {
        /// The CDATA content (no escaping applied).
        content: String,
    },

    /// A comment node, e.g., `<!-- ... -->`.
    Comment {
        /// The comment text (without the `<!--` and `-->` delimiters).
        content: String,
    },

    /// A processing instruction, e.g., `<?php echo 1; ?>`.
    ProcessingInstruction {
        /// The instruction name (e.g., `"php"`).
        target: String,
        /// Everything between the name and the closing marker, unparsed.
        data: String,
    },
}
