use crate::client::Client;
use crate::identify::next_id;
use crate::identify::NodeId;

use winsys::geometry::Dim;
use winsys::geometry::Pos;
use winsys::geometry::Region;
use winsys::window::Window;

use std::collections::HashMap;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SplitType {
    Vertical,
    Horizontal,
}

#[derive(Debug)]
pub enum NodeKind {
    Leaf(Client),
    Split {
        split_type: SplitType,
        ratio: f64,
        first: NodeId,
        second: NodeId,
    },
}

#[derive(Debug)]
pub struct Node {
    id: NodeId,
    parent: Option<NodeId>,
    kind: NodeKind,
    region: Region,
}

impl Node {
    #[inline]
    pub fn id(&self) -> NodeId {
        self.id
    }

    #[inline]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    #[inline]
    pub fn region(&self) -> Region {
        self.region
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, NodeKind::Leaf(_))
    }

    #[inline]
    pub fn client(&self) -> Option<&Client> {
        match &self.kind {
            NodeKind::Leaf(client) => Some(client),
            _ => None,
        }
    }

    #[inline]
    pub fn split_type(&self) -> Option<SplitType> {
        match self.kind {
            NodeKind::Split {
                split_type, ..
            } => Some(split_type),
            _ => None,
        }
    }

    #[inline]
    pub fn ratio(&self) -> Option<f64> {
        match self.kind {
            NodeKind::Split {
                ratio, ..
            } => Some(ratio),
            _ => None,
        }
    }

    #[inline]
    pub fn children(&self) -> Option<(NodeId, NodeId)> {
        match self.kind {
            NodeKind::Split {
                first,
                second,
                ..
            } => Some((first, second)),
            _ => None,
        }
    }

    /// The position of the split line along the split's primary axis.
    fn fence(&self) -> Option<i32> {
        match self.kind {
            NodeKind::Split {
                split_type: SplitType::Vertical,
                ratio,
                ..
            } => Some(self.region.pos.x + (self.region.dim.w as f64 * ratio) as i32),
            NodeKind::Split {
                split_type: SplitType::Horizontal,
                ratio,
                ..
            } => Some(self.region.pos.y + (self.region.dim.h as f64 * ratio) as i32),
            _ => None,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Placement {
    pub window: Window,
    pub region: Region,
    pub border_width: u32,
}

/// A binary space partition of a desktop. Leaves own exactly one client,
/// internal nodes own exactly two children.
#[derive(Debug, Default)]
pub struct Tree {
    root: Option<NodeId>,
    nodes: HashMap<NodeId, Node>,
    client_nodes: HashMap<Window, NodeId>,
}

impl Tree {
    pub fn new() -> Self {
        Default::default()
    }

    #[inline]
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    #[inline]
    pub fn contains(
        &self,
        id: NodeId,
    ) -> bool {
        self.nodes.contains_key(&id)
    }

    #[inline]
    pub fn node(
        &self,
        id: NodeId,
    ) -> Option<&Node> {
        self.nodes.get(&id)
    }

    #[inline]
    pub fn client(
        &self,
        id: NodeId,
    ) -> Option<&Client> {
        self.nodes.get(&id).and_then(Node::client)
    }

    #[inline]
    pub fn client_node(
        &self,
        window: Window,
    ) -> Option<NodeId> {
        self.client_nodes.get(&window).copied()
    }

    /// Leaves in left-to-right order.
    pub fn leaves(&self) -> Vec<NodeId> {
        let mut leaves = Vec::with_capacity(self.client_nodes.len());
        let mut pending: Vec<NodeId> = self.root.into_iter().collect();

        while let Some(id) = pending.pop() {
            match self.nodes.get(&id).map(Node::children) {
                Some(Some((first, second))) => {
                    pending.push(second);
                    pending.push(first);
                },
                Some(None) => leaves.push(id),
                None => {},
            }
        }

        leaves
    }

    pub fn clients(&self) -> impl Iterator<Item = &Client> {
        self.leaves()
            .into_iter()
            .filter_map(move |id| self.client(id))
    }

    fn first_leaf(
        &self,
        mut id: NodeId,
    ) -> Option<NodeId> {
        loop {
            match self.nodes.get(&id)?.children() {
                Some((first, _)) => id = first,
                None => return Some(id),
            }
        }
    }

    fn replace_child(
        &mut self,
        parent: NodeId,
        old: NodeId,
        new: NodeId,
    ) {
        if let Some(Node {
            kind: NodeKind::Split {
                first,
                second,
                ..
            },
            ..
        }) = self.nodes.get_mut(&parent)
        {
            if *first == old {
                *first = new;
            } else if *second == old {
                *second = new;
            }
        }
    }

    /// Inserts `client` by splitting the leaf `at` (or the first leaf if
    /// `at` is not a leaf of this tree). The new client goes second; the
    /// split runs across the longer side of the split leaf.
    pub fn insert(
        &mut self,
        client: Client,
        at: Option<NodeId>,
        ratio: f64,
    ) -> NodeId {
        let window = client.window();
        let leaf = next_id();

        let target = at
            .filter(|id| self.nodes.get(id).map_or(false, Node::is_leaf))
            .or_else(|| self.root.and_then(|root| self.first_leaf(root)));

        let (target, region) = match target.and_then(|id| self.nodes.get(&id)) {
            Some(node) => (Some(node.id), node.region),
            None => (None, Region::default()),
        };

        match target {
            None => {
                self.nodes.insert(leaf, Node {
                    id: leaf,
                    parent: None,
                    kind: NodeKind::Leaf(client),
                    region,
                });

                self.root = Some(leaf);
            },
            Some(target) => {
                let split = next_id();
                let grandparent = self.nodes.get(&target).and_then(Node::parent);

                let split_type = if region.dim.w >= region.dim.h {
                    SplitType::Vertical
                } else {
                    SplitType::Horizontal
                };

                self.nodes.insert(split, Node {
                    id: split,
                    parent: grandparent,
                    kind: NodeKind::Split {
                        split_type,
                        ratio,
                        first: target,
                        second: leaf,
                    },
                    region,
                });

                self.nodes.insert(leaf, Node {
                    id: leaf,
                    parent: Some(split),
                    kind: NodeKind::Leaf(client),
                    region,
                });

                if let Some(node) = self.nodes.get_mut(&target) {
                    node.parent = Some(split);
                }

                match grandparent {
                    Some(grandparent) => self.replace_child(grandparent, target, split),
                    None => self.root = Some(split),
                }
            },
        }

        self.client_nodes.insert(window, leaf);
        leaf
    }

    /// Removes the leaf `id`; its sibling takes the place of their parent.
    pub fn remove(
        &mut self,
        id: NodeId,
    ) -> Option<Client> {
        if !self.nodes.get(&id)?.is_leaf() {
            return None;
        }

        let leaf = self.nodes.remove(&id)?;

        match leaf.parent.and_then(|parent| self.nodes.remove(&parent)) {
            None => self.root = None,
            Some(parent) => {
                if let Some((first, second)) = parent.children() {
                    let sibling = if first == id {
                        second
                    } else {
                        first
                    };

                    if let Some(node) = self.nodes.get_mut(&sibling) {
                        node.parent = parent.parent;
                        node.region = parent.region;
                    }

                    match parent.parent {
                        Some(grandparent) => self.replace_child(grandparent, parent.id, sibling),
                        None => self.root = Some(sibling),
                    }
                }
            },
        }

        match leaf.kind {
            NodeKind::Leaf(client) => {
                self.client_nodes.remove(&client.window());
                Some(client)
            },
            _ => None,
        }
    }

    /// Exchanges the clients of two distinct leaves.
    pub fn swap(
        &mut self,
        a: NodeId,
        b: NodeId,
    ) -> bool {
        let both_leaves = a != b
            && self.nodes.get(&a).map_or(false, Node::is_leaf)
            && self.nodes.get(&b).map_or(false, Node::is_leaf);

        if !both_leaves {
            return false;
        }

        let (mut node_a, mut node_b) = match (self.nodes.remove(&a), self.nodes.remove(&b)) {
            (Some(node_a), Some(node_b)) => (node_a, node_b),
            _ => return false,
        };

        std::mem::swap(&mut node_a.kind, &mut node_b.kind);

        for node in &[&node_a, &node_b] {
            if let Some(client) = node.client() {
                self.client_nodes.insert(client.window(), node.id);
            }
        }

        self.nodes.insert(a, node_a);
        self.nodes.insert(b, node_b);

        true
    }

    pub fn set_ratio(
        &mut self,
        id: NodeId,
        new_ratio: f64,
    ) -> bool {
        match self.nodes.get_mut(&id) {
            Some(Node {
                kind: NodeKind::Split {
                    ratio, ..
                },
                ..
            }) => {
                *ratio = new_ratio.max(0f64).min(1f64);
                true
            },
            _ => false,
        }
    }

    /// A subtree is vacant when none of its clients are tiled.
    pub fn is_vacant(
        &self,
        id: NodeId,
    ) -> bool {
        match self.nodes.get(&id).map(|node| &node.kind) {
            Some(NodeKind::Leaf(client)) => !client.is_tiled(),
            Some(NodeKind::Split {
                first,
                second,
                ..
            }) => self.is_vacant(*first) && self.is_vacant(*second),
            None => true,
        }
    }

    /// The split node whose fence lies closest to `pos`, among the splits
    /// whose region contains `pos` and whose children are both occupied.
    pub fn nearest_fence(
        &self,
        pos: Pos,
    ) -> Option<(NodeId, i32)> {
        self.nodes
            .values()
            .filter(|node| node.region.encompasses(pos))
            .filter(|node| {
                node.children()
                    .map_or(false, |(first, second)| {
                        !self.is_vacant(first) && !self.is_vacant(second)
                    })
            })
            .filter_map(|node| {
                let fence = node.fence()?;
                let distance = match node.split_type()? {
                    SplitType::Vertical => (pos.x - fence).abs(),
                    SplitType::Horizontal => (pos.y - fence).abs(),
                };

                Some((node.id, distance))
            })
            .min_by_key(|&(_, distance)| distance)
    }

    /// Recomputes every node's region inside `screen` and returns where
    /// each client's window must go.
    pub fn arrange(
        &mut self,
        screen: Region,
        gap: i32,
        border_width: u32,
    ) -> Vec<Placement> {
        let mut placements = Vec::with_capacity(self.client_nodes.len());

        if let Some(root) = self.root {
            let region = Region::new(
                screen.pos.x + gap,
                screen.pos.y + gap,
                screen.dim.w - gap,
                screen.dim.h - gap,
            );

            self.arrange_node(root, region, screen, gap, border_width, &mut placements);
        }

        placements
    }

    fn arrange_node(
        &mut self,
        id: NodeId,
        region: Region,
        screen: Region,
        gap: i32,
        border_width: u32,
        placements: &mut Vec<Placement>,
    ) {
        let split = match self.nodes.get_mut(&id) {
            Some(node) => {
                node.region = region;

                match &node.kind {
                    NodeKind::Leaf(client) => {
                        let inset = gap + 2 * border_width as i32;
                        let tiled_region = Region {
                            pos: region.pos,
                            dim: Dim {
                                w: std::cmp::max(1, region.dim.w - inset),
                                h: std::cmp::max(1, region.dim.h - inset),
                            },
                        };

                        client.set_tiled_region(tiled_region);

                        let (region, border_width) = if client.is_fullscreen() {
                            (screen, 0)
                        } else if client.is_floating() {
                            (client.floating_region(), border_width)
                        } else {
                            (tiled_region, border_width)
                        };

                        placements.push(Placement {
                            window: client.window(),
                            region,
                            border_width,
                        });

                        None
                    },
                    NodeKind::Split {
                        split_type,
                        ratio,
                        first,
                        second,
                    } => Some((*split_type, *ratio, *first, *second)),
                }
            },
            None => None,
        };

        if let Some((split_type, ratio, first, second)) = split {
            let (first_region, second_region) =
                if self.is_vacant(first) || self.is_vacant(second) {
                    (region, region)
                } else {
                    match split_type {
                        SplitType::Vertical => {
                            region.split_at_width((region.dim.w as f64 * ratio) as i32)
                        },
                        SplitType::Horizontal => {
                            region.split_at_height((region.dim.h as f64 * ratio) as i32)
                        },
                    }
                };

            self.arrange_node(first, first_region, screen, gap, border_width, placements);
            self.arrange_node(second, second_region, screen, gap, border_width, placements);
        }
    }
}
