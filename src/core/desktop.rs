use crate::identify::Index;
use crate::identify::NodeId;
use crate::tree::Tree;

pub struct Desktop {
    name: String,
    index: Index,
    tree: Tree,
    focus: Option<NodeId>,
}

impl Desktop {
    pub fn new(
        name: impl Into<String>,
        index: Index,
    ) -> Self {
        Self {
            name: name.into(),
            index,
            tree: Tree::new(),
            focus: None,
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn index(&self) -> Index {
        self.index
    }

    #[inline]
    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    #[inline]
    pub fn tree_mut(&mut self) -> &mut Tree {
        &mut self.tree
    }

    #[inline]
    pub fn focus(&self) -> Option<NodeId> {
        self.focus.filter(|&id| self.tree.contains(id))
    }

    #[inline]
    pub fn set_focus(
        &mut self,
        focus: Option<NodeId>,
    ) {
        self.focus = focus;
    }

    #[inline]
    pub fn is_occupied(&self) -> bool {
        !self.tree.is_empty()
    }

    #[inline]
    pub fn is_urgent(&self) -> bool {
        self.tree.clients().any(|client| client.is_urgent())
    }
}

impl std::fmt::Debug for Desktop {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.debug_struct("Desktop")
            .field("name", &self.name)
            .field("index", &self.index)
            .field("focus", &self.focus)
            .finish()
    }
}
