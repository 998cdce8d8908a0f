//! HTML5 serializer.
//!
//! Writes a `Document` tree as HTML5 text. The output is meant to parse back
//! into an equivalent tree; it does not reproduce the parsed input byte
//! for byte.
//!
//! - A fixed `<!DOCTYPE html>` line, the document element, a trailing newline
//! - Void elements (`<br>`, `<img>`, ...) never get a closing tag
//! - Raw text elements (`<script>`, `<style>`, ...) keep their text verbatim
//! - HTML, SVG and MathML elements use their local name, other elements their
//!   qualified name
//! - Inside `<svg>` element and attribute names get their SVG casing, inside
//!   `<math>` attribute names get their MathML casing
//! - Attributes are always written as `name="value"`, in document order
//!
//! # Examples
//!
//! ```
//! use html5out::serial::html::{serialize_html5, SerializeOptions};
//! use html5out::Document;
//!
//! let mut doc = Document::new();
//! let root = doc.create_element("root");
//! doc.append_child(doc.root(), root);
//! let br = doc.create_element("br");
//! doc.append_child(root, br);
//! let text = doc.create_text("a&b");
//! doc.append_child(root, text);
//!
//! let html = serialize_html5(&doc, &SerializeOptions::default()).unwrap();
//! assert_eq!(html, "<!DOCTYPE html>\n<root><br>a&amp;b</root>\n");
//! ```

use std::borrow::Cow;
use std::io::{self, Write};
use std::ops::{Deref, DerefMut};

use encoding_rs::Encoding;

use crate::error::SerializeError;
use crate::html::entities::reverse_lookup_entity;
use crate::html::{
    canonical_svg_element, is_raw_text_element, is_void_element, normalize_mathml_attribute,
    normalize_svg_attribute, MATHML_ROOT, SVG_ROOT,
};
use crate::tree::{Attribute, Document, NodeId, NodeKind};

/// The doctype written at the top of every serialized document.
pub const DOCTYPE: &str = "<!DOCTYPE html>";

/// Default maximum element nesting depth.
pub const DEFAULT_MAX_DEPTH: u32 = 256;

/// Options controlling HTML5 serialization.
///
/// ```
/// use html5out::serial::html::SerializeOptions;
///
/// let opts = SerializeOptions::default()
///     .encode_entities(true)
///     .encoding("windows-1252");
/// assert!(opts.encode_entities);
/// ```
#[derive(Debug, Clone)]
pub struct SerializeOptions {
    /// If true, every character with a named reference in
    /// [`entities`](crate::html::entities) is written as `&name;`. If false,
    /// only `&`, `<`, `>`, `"` and `'` are escaped.
    pub encode_entities: bool,
    /// Output encoding label, resolved with `encoding_rs`.
    ///
    /// In escaped text, attribute values and names, characters the encoding
    /// cannot represent become decimal character references. Raw text
    /// elements, comments, CDATA sections and processing instructions never
    /// decode references, so an unrepresentable character there fails with
    /// [`SerializeError::Unencodable`].
    pub encoding: String,
    /// Maximum element nesting depth. Deeper trees fail with
    /// [`SerializeError::DepthLimitExceeded`].
    pub max_depth: u32,
}

impl Default for SerializeOptions {
    fn default() -> Self {
        Self {
            encode_entities: false,
            encoding: "UTF-8".to_string(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl SerializeOptions {
    /// Enables or disables full named-entity encoding.
    #[must_use]
    pub fn encode_entities(mut self, yes: bool) -> Self {
        self.encode_entities = yes;
        self
    }

    /// Sets the output encoding label (e.g. `"UTF-8"`, `"windows-1252"`).
    #[must_use]
    pub fn encoding(mut self, label: impl Into<String>) -> Self {
        self.encoding = label.into();
        self
    }

    /// Sets the maximum element nesting depth.
    #[must_use]
    pub fn max_depth(mut self, max: u32) -> Self {
        self.max_depth = max;
        self
    }
}

/// Serializes a whole document into `sink`: doctype, document element,
/// trailing newline.
///
/// # Errors
///
/// `NoDocumentElement` if the document has no element child,
/// `UnsupportedEncoding` for an unknown encoding label (both before anything
/// is written). `Io` if the sink fails, `DepthLimitExceeded` for a tree nested
/// deeper than `options.max_depth`, `Unencodable` for raw content the output
/// encoding cannot represent.
pub fn serialize_document<W: Write>(
    doc: &Document,
    sink: W,
    options: &SerializeOptions,
) -> Result<(), SerializeError> {
    let mut rules = OutputRules::new(doc, sink, options)?;
    rules.document()?;
    rules.flush()
}

/// Serializes the subtree rooted at `id`.
///
/// The document node is written as a full document. Any other node is written
/// on its own, without a doctype or trailing newline.
///
/// # Errors
///
/// Same as [`serialize_document`].
pub fn serialize_node<W: Write>(
    doc: &Document,
    id: NodeId,
    sink: W,
    options: &SerializeOptions,
) -> Result<(), SerializeError> {
    let mut rules = OutputRules::new(doc, sink, options)?;
    if id == doc.root() {
        rules.document()?;
    } else {
        rules.node(id)?;
    }
    rules.flush()
}

/// Serializes a document to a `String`.
///
/// The result is always UTF-8; `options.encoding` is ignored.
///
/// # Errors
///
/// `NoDocumentElement` if the document has no element child,
/// `DepthLimitExceeded` for a tree nested deeper than `options.max_depth`.
pub fn serialize_html5(doc: &Document, options: &SerializeOptions) -> Result<String, SerializeError> {
    let mut out = Vec::new();
    let mut rules = OutputRules::with_encoder(doc, &mut out, options, None);
    rules.document()?;
    String::from_utf8(out).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e).into())
}

/// Escapes `text` for use in element content or a double-quoted attribute.
///
/// Returns the input unchanged (borrowed) when nothing needs escaping.
#[must_use]
pub fn escape(text: &str, encode_entities: bool) -> Cow<'_, str> {
    let needs_work = |c: char| {
        matches!(c, '&' | '<' | '>' | '"' | '\'')
            || (encode_entities && reverse_lookup_entity(c).is_some())
    };
    let Some(first) = text.find(needs_work) else {
        return Cow::Borrowed(text);
    };

    let mut out = String::with_capacity(text.len() + 16);
    out.push_str(&text[..first]);
    for c in text[first..].chars() {
        if encode_entities {
            if let Some(name) = reverse_lookup_entity(c) {
                out.push('&');
                out.push_str(name);
                out.push(';');
                continue;
            }
        }
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Which embedded dialect the serializer is currently inside.
///
/// A single value rather than one flag per dialect: an element is never in
/// SVG and MathML scope at the same time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DialectScope {
    /// Plain HTML (or foreign XML) content.
    #[default]
    Html,
    /// Inside an `<svg>` subtree.
    Svg,
    /// Inside a `<math>` subtree.
    MathMl,
}

/// Per-node rendering rules, plus the walk that drives them.
///
/// Holds the output sink, the current [`DialectScope`] and the element
/// depth; nothing else survives between nodes.
pub struct OutputRules<'a, W: Write> {
    doc: &'a Document,
    out: W,
    encode: bool,
    /// `None` writes UTF-8 straight through.
    encoder: Option<&'static Encoding>,
    scope: DialectScope,
    depth: u32,
    max_depth: u32,
}

impl<'a, W: Write> OutputRules<'a, W> {
    /// Creates rules writing `doc` into `out`.
    ///
    /// # Errors
    ///
    /// `UnsupportedEncoding` if `options.encoding` is not a known label.
    pub fn new(doc: &'a Document, out: W, options: &SerializeOptions) -> Result<Self, SerializeError> {
        let encoding = Encoding::for_label(options.encoding.as_bytes())
            .ok_or_else(|| SerializeError::UnsupportedEncoding(options.encoding.clone()))?;
        // UTF-16 labels serialize as UTF-8, as encoding_rs does for output.
        let encoding = encoding.output_encoding();
        let encoder = (encoding != encoding_rs::UTF_8).then_some(encoding);
        Ok(Self::with_encoder(doc, out, options, encoder))
    }

    fn with_encoder(
        doc: &'a Document,
        out: W,
        options: &SerializeOptions,
        encoder: Option<&'static Encoding>,
    ) -> Self {
        Self {
            doc,
            out,
            encode: options.encode_entities,
            encoder,
            scope: DialectScope::Html,
            depth: 0,
            max_depth: options.max_depth,
        }
    }

    /// Returns the dialect scope the next node would be rendered in.
    #[must_use]
    pub fn scope(&self) -> DialectScope {
        self.scope
    }

    /// Writes the doctype, the document element and a trailing newline.
    ///
    /// # Errors
    ///
    /// `NoDocumentElement` before writing anything if there is no document
    /// element; `Io` if the sink fails.
    pub fn document(&mut self) -> Result<(), SerializeError> {
        let root = self
            .doc
            .root_element()
            .ok_or(SerializeError::NoDocumentElement)?;
        log::debug!(
            target: "html5out.serial",
            "serializing document ({} nodes, encode_entities={})",
            self.doc.node_count(),
            self.encode
        );
        self.wr(DOCTYPE)?;
        self.nl()?;
        self.node(root)?;
        self.nl()
    }

    /// Renders one node of any kind.
    ///
    /// # Errors
    ///
    /// `Io` if the sink fails.
    pub fn node(&mut self, id: NodeId) -> Result<(), SerializeError> {
        let doc = self.doc;
        match &doc.node(id).kind {
            NodeKind::Element { .. } => self.element(id),
            NodeKind::Text { .. } => self.text(id),
            NodeKind::CData { content } => self.cdata(content),
            NodeKind::Comment { content } => self.comment(content),
            NodeKind::ProcessingInstruction { target, data } => {
                self.processing_instruction(target, data)
            }
            NodeKind::Document => self.children(id),
        }
    }

    /// Renders the children of `id` in document order.
    ///
    /// # Errors
    ///
    /// `Io` if the sink fails.
    pub fn children(&mut self, id: NodeId) -> Result<(), SerializeError> {
        let doc = self.doc;
        for child in doc.children(id) {
            self.node(child)?;
        }
        Ok(())
    }

    /// Renders an element and its subtree.
    ///
    /// # Errors
    ///
    /// `Io` if the sink fails, `DepthLimitExceeded` if the element sits deeper
    /// than the configured limit. The dialect scope is restored either way.
    pub fn element(&mut self, id: NodeId) -> Result<(), SerializeError> {
        let doc = self.doc;
        let NodeKind::Element { attributes, .. } = &doc.node(id).kind else {
            return Ok(());
        };

        let resolved = resolved_name(doc, id);
        let (scope, name) = if resolved.eq_ignore_ascii_case(SVG_ROOT) {
            (DialectScope::Svg, Cow::Borrowed(SVG_ROOT))
        } else if resolved == MATHML_ROOT {
            (DialectScope::MathMl, resolved)
        } else if self.scope == DialectScope::Svg {
            match canonical_svg_element(&resolved) {
                Some(canonical) => (DialectScope::Svg, Cow::Borrowed(canonical)),
                None => (DialectScope::Svg, resolved),
            }
        } else {
            (self.scope, resolved)
        };

        let mut rules = self.enter_element(scope)?;
        rules.open_tag(&name, attributes)?;
        if doc.first_child(id).is_some() {
            rules.children(id)?;
        }
        drop(rules);

        if is_void_element(&name) {
            return Ok(());
        }
        self.close_tag(&name)
    }

    /// Renders a text node, escaped unless its parent is a raw text element.
    ///
    /// # Errors
    ///
    /// `Io` if the sink fails.
    pub fn text(&mut self, id: NodeId) -> Result<(), SerializeError> {
        let doc = self.doc;
        let NodeKind::Text { content } = &doc.node(id).kind else {
            return Ok(());
        };
        let raw = doc
            .parent(id)
            .is_some_and(|parent| is_raw_text_element(&resolved_name(doc, parent)));
        if raw {
            self.wr_raw(content, "raw text element")
        } else {
            self.enc(content)
        }
    }

    /// Writes `<![CDATA[content]]>`.
    ///
    /// # Errors
    ///
    /// `Io` if the sink fails.
    pub fn cdata(&mut self, content: &str) -> Result<(), SerializeError> {
        self.wr("<![CDATA[")?;
        self.wr_raw(content, "CDATA section")?;
        self.wr("]]>")
    }

    /// Writes `<!--content-->`.
    ///
    /// # Errors
    ///
    /// `Io` if the sink fails.
    pub fn comment(&mut self, content: &str) -> Result<(), SerializeError> {
        self.wr("<!--")?;
        self.wr_raw(content, "comment")?;
        self.wr("-->")
    }

    /// Writes `<?target data ?>`.
    ///
    /// # Errors
    ///
    /// `Io` if the sink fails.
    pub fn processing_instruction(&mut self, target: &str, data: &str) -> Result<(), SerializeError> {
        self.wr("<?")?;
        self.wr_raw(target, "processing instruction")?;
        self.wr(" ")?;
        self.wr_raw(data, "processing instruction")?;
        self.wr(" ?>")
    }

    /// Flushes the underlying sink.
    ///
    /// # Errors
    ///
    /// `Io` if the sink fails.
    pub fn flush(&mut self) -> Result<(), SerializeError> {
        self.out.flush()?;
        Ok(())
    }

    fn enter_element(
        &mut self,
        scope: DialectScope,
    ) -> Result<ScopeGuard<'_, 'a, W>, SerializeError> {
        if self.depth >= self.max_depth {
            return Err(SerializeError::DepthLimitExceeded(self.max_depth));
        }
        self.depth += 1;
        let saved = self.scope;
        if scope != saved {
            log::trace!(target: "html5out.serial", "dialect scope {saved:?} -> {scope:?}");
        }
        self.scope = scope;
        Ok(ScopeGuard { rules: self, saved })
    }

    fn open_tag(&mut self, name: &str, attributes: &[Attribute]) -> Result<(), SerializeError> {
        self.wr("<")?;
        self.wr(name)?;
        self.attrs(attributes)?;
        self.wr(">")
    }

    fn attrs(&mut self, attributes: &[Attribute]) -> Result<(), SerializeError> {
        for attr in attributes {
            let qualified = attr.qualified_name();
            let name = match self.scope {
                DialectScope::Svg => normalize_svg_attribute(&qualified),
                DialectScope::MathMl => normalize_mathml_attribute(&qualified),
                DialectScope::Html => qualified.as_ref(),
            };
            self.wr(" ")?;
            self.wr(name)?;
            self.wr("=\"")?;
            self.enc(&attr.value)?;
            self.wr("\"")?;
        }
        Ok(())
    }

    fn close_tag(&mut self, name: &str) -> Result<(), SerializeError> {
        self.wr("</")?;
        self.wr(name)?;
        self.wr(">")
    }

    fn enc(&mut self, text: &str) -> Result<(), SerializeError> {
        let escaped = escape(text, self.encode);
        self.wr(&escaped)
    }

    fn nl(&mut self) -> Result<(), SerializeError> {
        self.wr("\n")
    }

    fn wr(&mut self, text: &str) -> Result<(), SerializeError> {
        match self.encoder {
            None => self.out.write_all(text.as_bytes())?,
            Some(encoding) => {
                let (bytes, _, _) = encoding.encode(text);
                self.out.write_all(&bytes)?;
            }
        }
        Ok(())
    }

    /// Like `wr`, for content that is never reference-decoded.
    fn wr_raw(&mut self, text: &str, context: &'static str) -> Result<(), SerializeError> {
        match self.encoder {
            None => self.out.write_all(text.as_bytes())?,
            Some(encoding) => {
                let (bytes, _, unmappable) = encoding.encode(text);
                if unmappable {
                    return Err(SerializeError::Unencodable {
                        context,
                        encoding: encoding.name(),
                    });
                }
                self.out.write_all(&bytes)?;
            }
        }
        Ok(())
    }
}

/// Restores the dialect scope and depth saved by
/// [`OutputRules::enter_element`] when dropped, on every exit path of the
/// element that entered it.
struct ScopeGuard<'r, 'a, W: Write> {
    rules: &'r mut OutputRules<'a, W>,
    saved: DialectScope,
}

impl<'a, W: Write> Deref for ScopeGuard<'_, 'a, W> {
    type Target = OutputRules<'a, W>;

    fn deref(&self) -> &Self::Target {
        self.rules
    }
}

impl<W: Write> DerefMut for ScopeGuard<'_, '_, W> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.rules
    }
}

impl<W: Write> Drop for ScopeGuard<'_, '_, W> {
    fn drop(&mut self) {
        self.rules.scope = self.saved;
        self.rules.depth -= 1;
    }
}

/// Local name for HTML, SVG and MathML elements, qualified name otherwise.
/// Non-element nodes resolve to `""`.
fn resolved_name(doc: &Document, id: NodeId) -> Cow<'_, str> {
    match &doc.node(id).kind {
        NodeKind::Element { name, .. } if doc.is_local_element(id) => Cow::Borrowed(name),
        NodeKind::Element { .. } => doc.qualified_name(id).unwrap_or_default(),
        _ => Cow::Borrowed(""),
    }
}
