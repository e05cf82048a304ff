// scene_core/src/scene/node.rs
use crate::scene::node_proxy::NodeProxy;

/// Stable identity of a host node. Never reused inside one tree.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Ord, PartialOrd)]
pub struct NodeId(pub usize);

impl std::ops::Deref for NodeId {
    type Target = usize;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// A host tree node.
pub struct Node {
    pub name: String,
    pub parent: Option<NodeId>,
    /// Ordered. Insertion order is preserved.
    pub children: Vec<NodeId>,
    pub inside_tree: bool,
    /// `ready` fires once per node lifetime.
    pub ready_fired: bool,
    pub proxy: NodeProxy,
}

impl Node {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            parent: None,
            children: Vec::new(),
            inside_tree: false,
            ready_fired: false,
            proxy: NodeProxy::default(),
        }
    }
}
