//! Event-driven tree construction.
//!
//! [`TreeBuilder`] receives already-tokenized events (start tag, end tag,
//! text, comment, CDATA, processing instruction) and assembles a
//! [`Document`]. It keeps a stack of open elements like an HTML parser
//! would, but none of the HTML5 insertion-mode rules: there is no implied
//! `<html>`/`<head>`/`<body>` and no auto-closing beyond void elements.
//!
//! Processing instructions go through the installed
//! [`InstructionProcessor`] first. A processor that returns
//! `Ok(Some(id))` with an `id` other than the current node moves the
//! insertion point to `id` until the enclosing element closes.
//!
//! # Examples
//!
//! ```
//! use html5out::tree::builder::TreeBuilder;
//!
//! let mut builder = TreeBuilder::new().with_namespace_instructions();
//! builder.start_element("html", &[]);
//! builder
//!     .processing_instruction("namespace", "foo = urn:foo")
//!     .unwrap();
//! let widget = builder.start_element("foo:widget", &[("size", "3")]);
//! builder.end_element("foo:widget");
//! builder.end_element("html");
//!
//! let doc = builder.finish();
//! assert_eq!(doc.node_namespace(widget), Some("urn:foo"));
//! ```

use crate::error::BuildError;
use crate::html::{is_void_element, MATHML_ROOT, SVG_ROOT};
use crate::instruction::{InstructionProcessor, NamespaceInstructionProcessor};
use crate::namespace::{
    NamespaceTable, SharedNamespaces, HTML_NAMESPACE, MATHML_NAMESPACE, SVG_NAMESPACE,
};
use crate::tree::{Attribute, Document, NodeId, NodeKind};
use crate::util::qname::split_qname;

/// Builds a [`Document`] from a stream of markup events.
pub struct TreeBuilder {
    doc: Document,
    /// Open elements with the lowercase name their end tag must match.
    open_elements: Vec<(NodeId, String)>,
    namespaces: SharedNamespaces,
    processor: Option<Box<dyn InstructionProcessor>>,
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeBuilder {
    /// Creates a builder with a fresh namespace table pre-bound with the
    /// well-known prefixes and no instruction processor.
    #[must_use]
    pub fn new() -> Self {
        Self::with_namespaces(NamespaceTable::with_defaults().into_shared())
    }

    /// Creates a builder that resolves prefixes through `namespaces`.
    #[must_use]
    pub fn with_namespaces(namespaces: SharedNamespaces) -> Self {
        Self {
            doc: Document::new(),
            open_elements: Vec::new(),
            namespaces,
            processor: None,
        }
    }

    /// Installs a [`NamespaceInstructionProcessor`] writing into this
    /// builder's own table.
    #[must_use]
    pub fn with_namespace_instructions(mut self) -> Self {
        let processor = NamespaceInstructionProcessor::new(self.namespaces());
        self.set_instruction_processor(Box::new(processor));
        self
    }

    /// Installs the processor consulted for every processing instruction,
    /// replacing any previous one.
    pub fn set_instruction_processor(&mut self, processor: Box<dyn InstructionProcessor>) {
        self.processor = Some(processor);
    }

    /// Returns a handle to the namespace table used for prefix resolution.
    #[must_use]
    pub fn namespaces(&self) -> SharedNamespaces {
        SharedNamespaces::clone(&self.namespaces)
    }

    /// Returns the document built so far.
    #[must_use]
    pub fn document(&self) -> &Document {
        &self.doc
    }

    /// Returns the current insertion point (the innermost open element, or
    /// the document node).
    #[must_use]
    pub fn current_node(&self) -> NodeId {
        self.open_elements
            .last()
            .map_or_else(|| self.doc.root(), |&(id, _)| id)
    }

    /// Opens an element under the current node and returns its id.
    ///
    /// Void elements are closed again immediately.
    pub fn start_element(&mut self, name: &str, attributes: &[(&str, &str)]) -> NodeId {
        let parent = self.current_node();
        let lower = name.to_ascii_lowercase();

        let (name, prefix, namespace) = match split_qname(name) {
            (Some(prefix), local) => match self.namespaces.borrow().resolve(prefix) {
                Some(uri) => (
                    local.to_string(),
                    Some(prefix.to_string()),
                    Some(uri.to_string()),
                ),
                None => {
                    log::debug!(
                        target: "html5out.builder",
                        "unbound prefix {prefix:?} on <{name}>, keeping qualified name"
                    );
                    (name.to_string(), None, None)
                }
            },
            (None, local) => {
                let namespace = if lower == SVG_ROOT {
                    SVG_NAMESPACE
                } else if lower == MATHML_ROOT {
                    MATHML_NAMESPACE
                } else {
                    match self.doc.node_namespace(parent) {
                        Some(ns @ (SVG_NAMESPACE | MATHML_NAMESPACE)) => ns,
                        _ => HTML_NAMESPACE,
                    }
                };
                let local = if namespace == HTML_NAMESPACE {
                    lower.clone()
                } else {
                    local.to_string()
                };
                (local, None, Some(namespace.to_string()))
            }
        };

        let attributes: Vec<Attribute> = attributes
            .iter()
            .map(|&(name, value)| self.make_attribute(name, value))
            .collect();
        let is_html = namespace.as_deref() == Some(HTML_NAMESPACE);

        let id = self.doc.create_node(NodeKind::Element {
            name,
            prefix,
            namespace,
            attributes,
        });
        self.doc.append_child(parent, id);

        if !(is_html && is_void_element(&lower)) {
            self.open_elements.push((id, lower));
        }
        id
    }

    /// Closes the innermost open element named `name` and everything opened
    /// after it. An end tag with no matching open element is ignored.
    pub fn end_element(&mut self, name: &str) {
        let lower = name.to_ascii_lowercase();
        let found = self.open_elements.iter().rposition(|(_, open)| *open == lower);
        match found {
            Some(idx) => {
                for (_, implied) in &self.open_elements[idx + 1..] {
                    log::debug!(
                        target: "html5out.builder",
                        "implicitly closing <{implied}> before </{lower}>"
                    );
                }
                self.open_elements.truncate(idx);
            }
            None => log::debug!(target: "html5out.builder", "ignoring stray end tag </{lower}>"),
        }
    }

    /// Appends text to the current node, merging with a preceding text node.
    pub fn text(&mut self, content: &str) {
        if content.is_empty() {
            return;
        }
        let parent = self.current_node();
        if let Some(last) = self.doc.last_child(parent) {
            if let NodeKind::Text { content: existing } = &mut self.doc.node_mut(last).kind {
                existing.push_str(content);
                return;
            }
        }
        let id = self.doc.create_text(content);
        self.doc.append_child(parent, id);
    }

    /// Appends a comment to the current node.
    pub fn comment(&mut self, content: &str) {
        self.append(NodeKind::Comment {
            content: content.to_string(),
        });
    }

    /// Appends a CDATA section to the current node.
    pub fn cdata(&mut self, content: &str) {
        self.append(NodeKind::CData {
            content: content.to_string(),
        });
    }

    /// Handles `<?name data?>`.
    ///
    /// An `xml` declaration before the first element is skipped. Otherwise
    /// the installed processor decides what happens (see
    /// [`crate::instruction`]); without one, the instruction is appended to
    /// the current node. The stored data is trimmed.
    ///
    /// # Errors
    ///
    /// `BuildError::Instruction` if the processor rejects the instruction,
    /// `BuildError::InvalidInsertionPoint` if it returns a node that is not
    /// an element (or the document) attached to this document. The tree is
    /// left as the processor left it.
    pub fn processing_instruction(&mut self, name: &str, data: &str) -> Result<(), BuildError> {
        if name.eq_ignore_ascii_case("xml") && self.doc.root_element().is_none() {
            log::trace!(target: "html5out.builder", "skipping leading <?xml ...?> declaration");
            return Ok(());
        }

        let parent = self.current_node();
        let target = match self.processor.as_mut() {
            None => parent,
            Some(processor) => match processor.process(&mut self.doc, parent, name, data) {
                Ok(Some(id)) => id,
                Ok(None) => return Ok(()),
                Err(source) => {
                    return Err(BuildError::Instruction {
                        name: name.to_string(),
                        source,
                    })
                }
            },
        };

        if target != parent {
            if !self.accepts_children(target) {
                log::warn!(
                    target: "html5out.builder",
                    "<?{name}?> returned {:?}, which cannot hold children",
                    self.doc.node(target).kind
                );
                return Err(BuildError::InvalidInsertionPoint {
                    name: name.to_string(),
                });
            }
            let key = self
                .doc
                .node_name(target)
                .unwrap_or_default()
                .to_ascii_lowercase();
            log::debug!(
                target: "html5out.builder",
                "<?{name}?> moved insertion point to <{key}>"
            );
            self.open_elements.push((target, key));
        }

        let pi = self.doc.create_node(NodeKind::ProcessingInstruction {
            target: name.to_string(),
            data: data.trim().to_string(),
        });
        self.doc.append_child(target, pi);
        Ok(())
    }

    /// Consumes the builder and returns the document. Elements still open
    /// are left where they are.
    #[must_use]
    pub fn finish(self) -> Document {
        self.doc
    }

    /// An element or the document node, reachable from the document node.
    fn accepts_children(&self, id: NodeId) -> bool {
        let root = self.doc.root();
        let kind_ok = match self.doc.node(id).kind {
            NodeKind::Element { .. } => true,
            NodeKind::Document => id == root,
            _ => false,
        };
        kind_ok && self.doc.ancestors(id).any(|a| a == root)
    }

    fn append(&mut self, kind: NodeKind) {
        let parent = self.current_node();
        let id = self.doc.create_node(kind);
        self.doc.append_child(parent, id);
    }

    fn make_attribute(&self, name: &str, value: &str) -> Attribute {
        if let (Some(prefix), local) = split_qname(name) {
            if let Some(uri) = self.namespaces.borrow().resolve(prefix) {
                return Attribute {
                    name: local.to_string(),
                    value: value.to_string(),
                    prefix: Some(prefix.to_string()),
                    namespace: Some(uri.to_string()),
                };
            }
        }
        Attribute::new(name, value)
    }
}
