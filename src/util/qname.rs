//! `QName` (qualified name) splitting.
//!
//! The tree builder receives tag and attribute names like `ui:panel` or
//! `xlink:href` and resolves the part before the colon through the
//! namespace table.

/// Splits a `QName` into its prefix and local name parts.
///
/// Returns `(Some(prefix), localname)` if the name contains a colon,
/// or `(None, localname)` if it does not.
///
/// # Examples
///
/// ```
/// use html5out::util::qname::split_qname;
///
/// assert_eq!(split_qname("xlink:href"), (Some("xlink"), "href"));
/// assert_eq!(split_qname("div"), (None, "div"));
/// ```
#[must_use]
pub fn split_qname(qname: &str) -> (Option<&str>, &str) {
    match qname.find(':') {
        Some(pos) => (Some(&qname[..pos]), &qname[pos + 1..]),
        None => (None, qname),
    }
}
