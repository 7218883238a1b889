//! The tree-query capability converters are written against.

/// Minimal read-only view of a parsed XML node.
///
/// `find_first` and `find_all` search descendants (not the node itself) in
/// document order, depth first.
pub trait XmlNode {
    /// Local tag name of this node.
    fn tag(&self) -> &str;

    /// First descendant with the given tag.
    fn find_first(&self, tag: &str) -> Option<&Self>;

    /// All descendants with the given tag.
    fn find_all(&self, tag: &str) -> Vec<&Self>;

    /// Value of an attribute on this node.
    fn attribute(&self, name: &str) -> Option<&str>;

    /// Concatenated text of this node and all its descendants.
    fn text(&self) -> String;

    /// First descendant with the given tag whose attribute `attr` equals `value`.
    fn find_first_where(&self, tag: &str, attr: &str, value: &str) -> Option<&Self> {
        self.find_all(tag)
            .into_iter()
            .find(|node| node.attribute(attr) == Some(value))
    }
}
