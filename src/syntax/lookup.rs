//! Position lookup in file trees.
//!
//! Both lookups walk the direct children of a node in order, subtracting
//! each child's length from the offset until the offset falls inside a
//! child, then descend into that child. The walk ends at a leaf.

use rowan::{GreenNodeData, NodeOrToken};
use smol_str::SmolStr;
use text_size::{TextRange, TextSize};

use super::FileElement;
use crate::parser::SyntaxKind;

/// A leaf of a file tree, located in file coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeElement {
    pub kind: SyntaxKind,
    pub range: TextRange,
    pub text: SmolStr,
}

/// A reference carried by a leaf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    element: TreeElement,
}

impl Reference {
    pub fn new(element: TreeElement) -> Self {
        Self { element }
    }

    pub fn element(&self) -> &TreeElement {
        &self.element
    }

    /// The referenced name, as written.
    pub fn canonical_text(&self) -> &str {
        &self.element.text
    }

    /// Range of the reference relative to its element.
    pub fn range_in_element(&self) -> TextRange {
        TextRange::up_to(self.element.range.len())
    }

    /// Range of the reference in the file.
    pub fn range(&self) -> TextRange {
        self.element.range
    }
}

/// The leaf containing `offset`, if any.
pub fn element_at(root: Option<&FileElement>, offset: TextSize) -> Option<TreeElement> {
    let root = root?;
    let green = root.green();
    find_in_node(&green, TextSize::new(0), offset)
}

/// The reference at `offset`: the leaf there, when `is_reference` accepts its kind.
pub fn reference_at(
    root: Option<&FileElement>,
    offset: TextSize,
    is_reference: impl Fn(SyntaxKind) -> bool,
) -> Option<Reference> {
    let element = element_at(root, offset)?;
    is_reference(element.kind).then(|| Reference::new(element))
}

fn find_in_node(
    node: &GreenNodeData,
    mut start: TextSize,
    mut offset: TextSize,
) -> Option<TreeElement> {
    for child in node.children() {
        match child {
            NodeOrToken::Node(node) => {
                let len = node.text_len();
                if offset < len {
                    return find_in_node(node, start, offset);
                }
                offset -= len;
                start += len;
            }
            NodeOrToken::Token(token) => {
                let len = token.text_len();
                if offset < len {
                    return Some(TreeElement {
                        kind: token.kind().into(),
                        range: TextRange::at(start, len),
                        text: SmolStr::new(token.text()),
                    });
                }
                offset -= len;
                start += len;
            }
        }
    }
    None
}
