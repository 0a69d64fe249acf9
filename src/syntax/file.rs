//! Root tree elements of parsed files.

use std::fmt;

use parking_lot::RwLock;
use rowan::GreenNode;
use text_size::TextSize;

use crate::parser::{SyntaxKind, SyntaxNode};

/// The root of a parsed file's tree.
///
/// The green tree is immutable; edits install a new one through
/// [`replace_green`](Self::replace_green). Holding an `Arc<FileElement>` keeps
/// the tree alive.
pub struct FileElement {
    green: RwLock<GreenNode>,
}

impl FileElement {
    pub fn new(green: GreenNode) -> Self {
        Self {
            green: RwLock::new(green),
        }
    }

    /// Kind of the root node.
    pub fn element_type(&self) -> SyntaxKind {
        self.green.read().kind().into()
    }

    /// Snapshot of the current green tree, cheap to clone.
    pub fn green(&self) -> GreenNode {
        self.green.read().clone()
    }

    pub fn text_len(&self) -> TextSize {
        self.green.read().text_len()
    }

    pub fn text(&self) -> String {
        self.syntax().text().to_string()
    }

    /// Install an edited tree.
    pub fn replace_green(&self, green: GreenNode) {
        *self.green.write() = green;
    }

    pub fn syntax(&self) -> SyntaxNode {
        SyntaxNode::new_root(self.green())
    }
}

impl fmt::Debug for FileElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileElement")
            .field("kind", &self.element_type())
            .field("len", &self.text_len())
            .finish()
    }
}
