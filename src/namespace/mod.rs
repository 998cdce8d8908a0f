//! Namespace URIs and the prefix binding table.
//!
//! The [`NamespaceTable`] is owned by tree construction and written to by
//! instruction processors (see [`crate::instruction`]). It is shared through
//! an explicit [`SharedNamespaces`] handle rather than a global, so every
//! writer has to be handed the table at construction time. There is no
//! locking: one tree build per table at a time.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// The HTML namespace.
pub const HTML_NAMESPACE: &str = "http://www.w3.org/1999/xhtml";
/// The SVG namespace.
pub const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";
/// The MathML namespace.
pub const MATHML_NAMESPACE: &str = "http://www.w3.org/1998/Math/MathML";
/// The XLink namespace.
pub const XLINK_NAMESPACE: &str = "http://www.w3.org/1999/xlink";
/// The XML namespace.
pub const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";
/// The XMLNS namespace.
pub const XMLNS_NAMESPACE: &str = "http://www.w3.org/2000/xmlns/";

/// Returns true if `uri` is one of the three namespaces whose elements are
/// written with their local name (HTML, SVG, MathML).
#[must_use]
pub fn is_builtin_namespace(uri: &str) -> bool {
    matches!(uri, HTML_NAMESPACE | SVG_NAMESPACE | MATHML_NAMESPACE)
}

/// Shared, single-writer handle to a [`NamespaceTable`].
pub type SharedNamespaces = Rc<RefCell<NamespaceTable>>;

/// A mapping from declared prefix to namespace URI.
///
/// Registering a prefix that is already bound replaces the old URI. The
/// replaced URI is handed back to the caller and logged, but it is not an
/// error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamespaceTable {
    bindings: HashMap<String, String>,
}

impl NamespaceTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a table with the well-known prefixes pre-bound
    /// (`xml`, `xmlns`, `xlink`, `svg`, `math`).
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut table = Self::new();
        table.register("xml", XML_NAMESPACE);
        table.register("xmlns", XMLNS_NAMESPACE);
        table.register("xlink", XLINK_NAMESPACE);
        table.register("svg", SVG_NAMESPACE);
        table.register("math", MATHML_NAMESPACE);
        table
    }

    /// Wraps this table in a [`SharedNamespaces`] handle.
    #[must_use]
    pub fn into_shared(self) -> SharedNamespaces {
        Rc::new(RefCell::new(self))
    }

    /// Binds `prefix` to `uri`. Returns the URI previously bound to `prefix`.
    pub fn register(&mut self, prefix: &str, uri: &str) -> Option<String> {
        let previous = self.bindings.insert(prefix.to_string(), uri.to_string());
        match &previous {
            Some(old) if old != uri => log::warn!(
                target: "html5out.namespace",
                "prefix {prefix:?} rebound from {old:?} to {uri:?}"
            ),
            Some(_) => {}
            None => log::debug!(
                target: "html5out.namespace",
                "registered prefix {prefix:?} -> {uri:?}"
            ),
        }
        previous
    }

    /// Returns the URI bound to `prefix`, if any.
    #[must_use]
    pub fn resolve(&self, prefix: &str) -> Option<&str> {
        self.bindings.get(prefix).map(String::as_str)
    }

    /// Returns the number of bound prefixes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Returns true if no prefix is bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Iterates over `(prefix, uri)` pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.bindings
            .iter()
            .map(|(prefix, uri)| (prefix.as_str(), uri.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_resolve() {
        let mut table = NamespaceTable::new();
        assert!(table.is_empty());
        assert_eq!(table.register("foo", "urn:foo"), None);
        assert_eq!(table.resolve("foo"), Some("urn:foo"));
        assert_eq!(table.resolve("bar"), None);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_last_registration_wins() {
        let mut table = NamespaceTable::new();
        table.register("foo", "urn:first");
        let previous = table.register("foo", "urn:second");
        assert_eq!(previous.as_deref(), Some("urn:first"));
        assert_eq!(table.resolve("foo"), Some("urn:second"));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_with_defaults() {
        let table = NamespaceTable::with_defaults();
        assert_eq!(table.resolve("svg"), Some(SVG_NAMESPACE));
        assert_eq!(table.resolve("math"), Some(MATHML_NAMESPACE));
        assert_eq!(table.resolve("xlink"), Some(XLINK_NAMESPACE));
        assert_eq!(table.len(), 5);
    }

    #[test]
    fn test_shared_handle_sees_writes() {
        let shared = NamespaceTable::new().into_shared();
        let writer = Rc::clone(&shared);
        writer.borrow_mut().register("p", "urn:p");
        assert_eq!(shared.borrow().resolve("p"), Some("urn:p"));
    }

    #[test]
    fn test_builtin_namespaces() {
        assert!(is_builtin_namespace(HTML_NAMESPACE));
        assert!(is_builtin_namespace(SVG_NAMESPACE));
        assert!(is_builtin_namespace(MATHML_NAMESPACE));
        assert!(!is_builtin_namespace(XLINK_NAMESPACE));
        assert!(!is_builtin_namespace("urn:example"));
    }
}
