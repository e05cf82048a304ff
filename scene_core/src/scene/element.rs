// scene_core/src/scene/element.rs
use crate::scene::node_proxy::ElementLink;
use crate::scene::lifecycle::SharedHooks;
use crate::scene::node::NodeId;
use std::collections::HashMap;

/// Stable identity of an element. Never reused inside one store.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Ord, PartialOrd)]
pub struct ElementId(pub usize);

impl std::ops::Deref for ElementId {
    type Target = usize;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// User-facing wrapper that can be attached to one host node.
/// The element never owns the node; parent and children are read
/// from the host tree through the proxy db.
pub struct Element {
    pub id: ElementId,
    pub name: String,
    pub node: Option<NodeId>,
    hooks: SharedHooks,
    link: ElementLink,
}

impl Element {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_attached(&self) -> bool {
        self.node.is_some()
    }

    pub fn hooks(&self) -> &SharedHooks {
        &self.hooks
    }

    /// Every proxy bound to this element shares this link.
    pub fn link(&self) -> ElementLink {
        self.link.clone()
    }
}

/// Owns every element. Ids start at 1.
#[derive(Default)]
pub struct ElementStore {
    elements: HashMap<ElementId, Element>,
    next_id: usize,
}

impl ElementStore {
    pub fn create(&mut self, name: &str, hooks: SharedHooks) -> ElementId {
        self.next_id += 1;
        let id = ElementId(self.next_id);
        self.elements.insert(id, Element {
            id,
            name: name.to_string(),
            node: None,
            link: ElementLink::new(id, &hooks),
            hooks,
        });
        id
    }

    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(&id)
    }

    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.get_mut(&id)
    }

    pub fn remove(&mut self, id: ElementId) -> Option<Element> {
        self.elements.remove(&id)
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.elements.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}
