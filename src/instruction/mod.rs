//! Processing-instruction hooks.
//!
//! The tree builder hands every processing instruction it meets to an
//! [`InstructionProcessor`] before the instruction becomes a node. The
//! processor may inspect the name and raw data, mutate the tree, and decide
//! what the builder does next:
//!
//! - `Ok(Some(id))`: `id` is the new insertion point. It is usually the
//!   `parent` that was passed in, but a processor that inserted wrapper
//!   elements may return one of them. The builder keeps the instruction node.
//! - `Ok(None)`: the instruction is consumed. The builder adds no node and
//!   keeps its previous insertion point.
//! - `Err(_)`: the build step fails. Side effects already performed (such as
//!   a namespace registration) are not rolled back.
//!
//! # Examples
//!
//! ```
//! use html5out::instruction::{InstructionProcessor, NamespaceInstructionProcessor};
//! use html5out::namespace::NamespaceTable;
//! use html5out::Document;
//!
//! let namespaces = NamespaceTable::new().into_shared();
//! let mut processor = NamespaceInstructionProcessor::new(namespaces.clone());
//!
//! let mut doc = Document::new();
//! let body = doc.create_element("body");
//! let next = processor
//!     .process(&mut doc, body, "namespace", "foo = http://example.com/ns")
//!     .unwrap();
//!
//! assert_eq!(next, None);
//! assert_eq!(namespaces.borrow().resolve("foo"), Some("http://example.com/ns"));
//! ```

use crate::error::InstructionError;
use crate::namespace::SharedNamespaces;
use crate::tree::{Document, NodeId};

/// The instruction name handled by [`NamespaceInstructionProcessor`].
pub const NAMESPACE_INSTRUCTION: &str = "namespace";

/// A hook invoked for every processing instruction during tree construction.
pub trait InstructionProcessor {
    /// Handles one instruction whose insertion point is `parent`.
    ///
    /// `name` is the token right after `<?`; `data` is everything up to the
    /// closing marker, unparsed.
    ///
    /// # Errors
    ///
    /// Returns `InstructionError` when the instruction is addressed to this
    /// processor but its data cannot be interpreted.
    fn process(
        &mut self,
        doc: &mut Document,
        parent: NodeId,
        name: &str,
        data: &str,
    ) -> Result<Option<NodeId>, InstructionError>;
}

impl<F> InstructionProcessor for F
where
    F: FnMut(&mut Document, NodeId, &str, &str) -> Result<Option<NodeId>, InstructionError>,
{
    fn process(
        &mut self,
        doc: &mut Document,
        parent: NodeId,
        name: &str,
        data: &str,
    ) -> Result<Option<NodeId>, InstructionError> {
        self(doc, parent, name, data)
    }
}

/// A processor that leaves every instruction to the builder's default policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassThroughProcessor;

impl InstructionProcessor for PassThroughProcessor {
    fn process(
        &mut self,
        _doc: &mut Document,
        parent: NodeId,
        name: &str,
        _data: &str,
    ) -> Result<Option<NodeId>, InstructionError> {
        log::trace!(target: "html5out.instruction", "passing through <?{name} ...?>");
        Ok(Some(parent))
    }
}

/// Registers `<?namespace prefix = uri ?>` declarations in a shared
/// [`NamespaceTable`](crate::namespace::NamespaceTable).
///
/// Only the first `=` splits prefix from URI, so one instruction declares
/// exactly one binding. Newline- or semicolon-separated lists are not
/// recognized; everything after the first `=` is the URI.
#[derive(Debug, Clone)]
pub struct NamespaceInstructionProcessor {
    namespaces: SharedNamespaces,
}

impl NamespaceInstructionProcessor {
    /// Creates a processor that writes into `namespaces`.
    #[must_use]
    pub fn new(namespaces: SharedNamespaces) -> Self {
        Self { namespaces }
    }

    /// Returns the table this processor writes into.
    #[must_use]
    pub fn namespaces(&self) -> &SharedNamespaces {
        &self.namespaces
    }
}

impl InstructionProcessor for NamespaceInstructionProcessor {
    fn process(
        &mut self,
        _doc: &mut Document,
        parent: NodeId,
        name: &str,
        data: &str,
    ) -> Result<Option<NodeId>, InstructionError> {
        if name != NAMESPACE_INSTRUCTION {
            return Ok(Some(parent));
        }

        let (prefix, uri) = parse_namespace_declaration(data)?;
        self.namespaces.borrow_mut().register(prefix, uri);
        log::debug!(
            target: "html5out.instruction",
            "dropping <?namespace?> after binding {prefix:?} -> {uri:?}"
        );
        Ok(None)
    }
}

/// Splits `prefix = uri` on the first `=` and trims both halves.
///
/// # Errors
///
/// `MissingSeparator` when there is no `=`, `EmptyPrefix` when nothing but
/// whitespace precedes it. An empty URI is accepted.
pub fn parse_namespace_declaration(data: &str) -> Result<(&str, &str), InstructionError> {
    let Some((prefix, uri)) = data.split_once('=') else {
        return Err(InstructionError::MissingSeparator {
            data: data.to_string(),
        });
    };
    let prefix = prefix.trim();
    if prefix.is_empty() {
        return Err(InstructionError::EmptyPrefix {
            data: data.to_string(),
        });
    }
    Ok((prefix, uri.trim()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::namespace::NamespaceTable;

    fn setup() -> (Document, NodeId, SharedNamespaces) {
        let mut doc = Document::new();
        let body = doc.create_element("body");
        doc.append_child(doc.root(), body);
        (doc, body, NamespaceTable::new().into_shared())
    }

    #[test]
    fn test_namespace_instruction_registers_and_drops() {
        let (mut doc, body, namespaces) = setup();
        let mut processor = NamespaceInstructionProcessor::new(namespaces.clone());

        let result = processor
            .process(&mut doc, body, "namespace", "foo = http://example.com/ns")
            .unwrap();

        assert_eq!(result, None);
        assert_eq!(
            namespaces.borrow().resolve("foo"),
            Some("http://example.com/ns")
        );
    }

    #[test]
    fn test_other_instruction_passes_through() {
        let (mut doc, body, namespaces) = setup();
        let mut processor = NamespaceInstructionProcessor::new(namespaces.clone());

        let result = processor.process(&mut doc, body, "php", "echo 1;").unwrap();

        assert_eq!(result, Some(body));
        assert!(namespaces.borrow().is_empty());
    }

    #[test]
    fn test_name_match_is_case_sensitive() {
        let (mut doc, body, namespaces) = setup();
        let mut processor = NamespaceInstructionProcessor::new(namespaces.clone());

        let result = processor
            .process(&mut doc, body, "Namespace", "foo=urn:foo")
            .unwrap();

        assert_eq!(result, Some(body));
        assert!(namespaces.borrow().is_empty());
    }

    #[test]
    fn test_missing_separator_fails_without_registering() {
        let (mut doc, body, namespaces) = setup();
        let mut processor = NamespaceInstructionProcessor::new(namespaces.clone());

        let err = processor
            .process(&mut doc, body, "namespace", "foo")
            .unwrap_err();

        assert_eq!(
            err,
            InstructionError::MissingSeparator {
                data: "foo".to_string()
            }
        );
        assert!(namespaces.borrow().is_empty());
    }

    #[test]
    fn test_empty_prefix_rejected() {
        assert!(matches!(
            parse_namespace_declaration("  = urn:x"),
            Err(InstructionError::EmptyPrefix { .. })
        ));
    }

    #[test]
    fn test_only_first_separator_splits() {
        assert_eq!(
            parse_namespace_declaration("q = http://example.com/?a=b").unwrap(),
            ("q", "http://example.com/?a=b")
        );
        // A second declaration on another line ends up in the URI.
        assert_eq!(
            parse_namespace_declaration("a=urn:a\nb=urn:b").unwrap(),
            ("a", "urn:a\nb=urn:b")
        );
    }

    #[test]
    fn test_empty_uri_accepted() {
        assert_eq!(parse_namespace_declaration("foo =  ").unwrap(), ("foo", ""));
    }

    #[test]
    fn test_redeclaration_overwrites() {
        let (mut doc, body, namespaces) = setup();
        let mut processor = NamespaceInstructionProcessor::new(namespaces.clone());

        processor
            .process(&mut doc, body, "namespace", "foo=urn:one")
            .unwrap();
        processor
            .process(&mut doc, body, "namespace", "foo=urn:two")
            .unwrap();

        assert_eq!(namespaces.borrow().resolve("foo"), Some("urn:two"));
        assert_eq!(namespaces.borrow().len(), 1);
    }

    #[test]
    fn test_pass_through_processor() {
        let (mut doc, body, _) = setup();
        let result = PassThroughProcessor
            .process(&mut doc, body, "namespace", "foo=urn:foo")
            .unwrap();
        assert_eq!(result, Some(body));
    }

    #[test]
    fn test_closure_processor_can_insert_wrapper() {
        let (mut doc, body, _) = setup();
        let mut wrap = |doc: &mut Document,
                        parent: NodeId,
                        name: &str,
                        _data: &str|
         -> Result<Option<NodeId>, InstructionError> {
            if name != "wrap" {
                return Ok(Some(parent));
            }
            let section = doc.create_element("section");
            doc.append_child(parent, section);
            Ok(Some(section))
        };

        let next = wrap.process(&mut doc, body, "wrap", "").unwrap().unwrap();

        assert_ne!(next, body);
        assert_eq!(doc.parent(next), Some(body));
        assert_eq!(doc.node_name(next), Some("section"));
    }
}
