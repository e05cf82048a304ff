// scene_core/src/scene/proxy_db.rs
use crate::scene::element::ElementId;
use crate::scene::node::NodeId;
use std::collections::HashMap;

/// Lookup from host node to the element attached to it.
/// Entries are added on attach and removed on detach or node destruction.
#[derive(Default, Debug)]
pub struct ProxyDb {
    elements: HashMap<NodeId, ElementId>,
}

impl ProxyDb {
    /// Registers `node -> element`, returning the element it replaced.
    pub fn add_element(&mut self, node: NodeId, element: ElementId) -> Option<ElementId> {
        self.elements.insert(node, element)
    }

    pub fn get_element(&self, node: NodeId) -> Option<ElementId> {
        self.elements.get(&node).copied()
    }

    pub fn remove_node(&mut self, node: NodeId) -> Option<ElementId> {
        self.elements.remove(&node)
    }

    /// Drops every entry that points at `element`. Returns how many went.
    pub fn remove_element(&mut self, element: ElementId) -> usize {
        let before = self.elements.len();
        self.elements.retain(|_, e| *e != element);
        before - self.elements.len()
    }

    pub fn node_for(&self, element: ElementId) -> Option<NodeId> {
        self.elements
            .iter()
            .find(|(_, e)| **e == element)
            .map(|(node, _)| *node)
    }

    pub fn contains_node(&self, node: NodeId) -> bool {
        self.elements.contains_key(&node)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}
