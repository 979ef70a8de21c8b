use crate::identify::Index;
use crate::identify::NodeId;

/// Where a managed window lives. Only valid until the next mutation of
/// the arrangement; resolve again afterwards.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Location {
    pub monitor: Index,
    pub desktop: Index,
    pub node: NodeId,
}
