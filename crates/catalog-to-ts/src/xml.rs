//! Small roxmltree helpers shared by the catalog parsers.

use roxmltree::Node;

use crate::error::{CatalogError, Result};

/// First child element with the given tag.
pub(crate) fn child<'a, 'input>(node: Node<'a, 'input>, tag: &str) -> Option<Node<'a, 'input>> {
    node.children()
        .find(|n| n.is_element() && n.tag_name().name() == tag)
}

/// Text of the first child element with the given tag. Missing elements
/// and elements without text count as absent.
pub(crate) fn child_text<'a>(node: Node<'a, '_>, tag: &str) -> Option<&'a str> {
    child(node, tag)
        .and_then(|n| n.text())
        .filter(|s| !s.is_empty())
}

/// Text of the `<name>` child, required on the catalog's named elements.
pub(crate) fn name_text<'a>(node: Node<'a, '_>) -> Result<&'a str> {
    child_text(node, "name").ok_or_else(|| CatalogError::MissingName {
        tag: node.tag_name().name().to_string(),
    })
}
