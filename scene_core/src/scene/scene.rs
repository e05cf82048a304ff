// scene_core/src/scene/scene.rs
use crate::scene::notifications::Notifications;
use crate::scene::scene_error::SceneError;
use crate::scene::scene_tree::*;
use crate::scene::node_proxy::NodeProxy;
use crate::scene::proxy_db::ProxyDb;
use crate::scene::lifecycle::*;
use crate::scene::element::*;
use crate::scene::node::NodeId;

/// Everything the element API works on: the host tree, the elements
/// and the proxy db pairing them. Passed explicitly to every call site.
pub struct Scene {
    pub tree: SceneTree,
    pub elements: ElementStore,
    pub proxy_db: ProxyDb,
    root_element: ElementId,
}

impl Scene {
    /// Creates a scene whose root node already carries an element
    /// named `root_name`.
    pub fn new(root_name: &str) -> Self {
        let tree = SceneTree::new(root_name);
        let mut elements = ElementStore::default();
        let root_element = elements.create(root_name, shared_hooks(NoHooks));

        let mut scene = Self {
            tree,
            elements,
            proxy_db: ProxyDb::default(),
            root_element,
        };
        let root = scene.tree.root();
        scene.link(root_element, root);
        scene
    }

    pub fn root(&self) -> NodeId {
        self.tree.root()
    }

    pub fn root_element(&self) -> ElementId {
        self.root_element
    }

    /// Creates an element that is not attached to any node.
    pub fn create_element(&mut self, name: &str, hooks: SharedHooks) -> ElementId {
        self.elements.create(name, hooks)
    }

    /// Creates a node named `name`, an element for it, and attaches the two.
    pub fn spawn_element(&mut self, name: &str, hooks: SharedHooks) -> ElementId {
        let node = self.tree.create_node(name);
        let element = self.elements.create(name, hooks);
        self.link(element, node);
        element
    }

    /// Records that `element` wraps `node` and registers the pairing in the
    /// proxy db. `None` is accepted and does nothing. The node's proxy is
    /// left alone, see `attach`.
    pub fn set_proxy_db(&mut self, element: ElementId, node: Option<NodeId>) -> Result<(), SceneError> {
        let Some(node) = node else {
            return Ok(());
        };

        let current = self.elements
            .get(element)
            .ok_or(SceneError::UnknownElement(element))?
            .node;
        if !self.tree.contains(node) {
            return Err(SceneError::UnknownNode(node));
        }
        if let Some(existing) = current {
            if existing != node {
                return Err(SceneError::AlreadyAttached { element, node: existing });
            }
        }
        if let Some(owner) = self.proxy_db.get_element(node) {
            if owner != element {
                return Err(SceneError::NodeTaken { node, element: owner });
            }
        }

        if let Some(e) = self.elements.get_mut(element) {
            e.node = Some(node);
        }
        self.proxy_db.add_element(node, element);
        Ok(())
    }

    /// `set_proxy_db` plus binding the node's proxy to the element.
    pub fn attach(&mut self, element: ElementId, node: NodeId) -> Result<(), SceneError> {
        self.set_proxy_db(element, Some(node))?;
        self.bind_proxy(element, node);
        Ok(())
    }

    /// Unpairs an element from its node. Returns the node it had.
    pub fn detach(&mut self, element: ElementId) -> Result<Option<NodeId>, SceneError> {
        let e = self.elements
            .get_mut(element)
            .ok_or(SceneError::UnknownElement(element))?;
        let Some(node) = e.node.take() else {
            return Ok(None);
        };

        self.proxy_db.remove_node(node);
        if let Some(n) = self.tree.get_mut(node) {
            n.proxy.unbind();
        }
        Ok(Some(node))
    }

    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id)
    }

    pub fn element_for_node(&self, node: NodeId) -> Option<ElementId> {
        self.proxy_db.get_element(node)
    }

    pub fn node_of(&self, element: ElementId) -> Result<NodeId, SceneError> {
        self.elements
            .get(element)
            .ok_or(SceneError::UnknownElement(element))?
            .node
            .ok_or(SceneError::NotAttached(element))
    }

    pub fn element_name(&self, id: ElementId) -> Option<&str> {
        self.elements.get(id).map(Element::name)
    }

    /// Sets the element name, and the attached node's name to the same value.
    pub fn set_element_name(&mut self, id: ElementId, name: &str) -> Result<(), SceneError> {
        let element = self.elements
            .get_mut(id)
            .ok_or(SceneError::UnknownElement(id))?;
        element.name = name.to_string();

        if let Some(node) = element.node {
            self.tree.set_name(node, name)?;
        }
        Ok(())
    }

    /// Element on the first descendant node whose name matches `pattern`.
    pub fn find(&self, id: ElementId, pattern: &str) -> Option<ElementId> {
        let node = self.node_of(id).ok()?;
        let found = self.tree.find_child(node, pattern, true)?;
        self.proxy_db.get_element(found)
    }

    pub fn get_parent(&self, id: ElementId) -> Option<ElementId> {
        let node = self.node_of(id).ok()?;
        let parent = self.tree.parent(node)?;
        self.proxy_db.get_element(parent)
    }

    /// Child elements in insertion order. Nodes without an element are skipped.
    pub fn get_children(&self, id: ElementId) -> Vec<ElementId> {
        let Ok(node) = self.node_of(id) else {
            return Vec::new();
        };
        self.tree
            .children(node)
            .iter()
            .filter_map(|child| self.proxy_db.get_element(*child))
            .collect()
    }

    pub fn add_child(&mut self, id: ElementId, child: ElementId) -> Result<Notifications, SceneError> {
        let parent_node = self.node_of(id)?;
        let child_node = self.node_of(child)?;
        let changes = self.tree.add_child(parent_node, child_node)?;
        Ok(self.notifications(changes))
    }

    pub fn remove_child(&mut self, id: ElementId, child: ElementId) -> Result<Notifications, SceneError> {
        let parent_node = self.node_of(id)?;
        let child_node = self.node_of(child)?;
        let changes = self.tree.remove_child(parent_node, child_node)?;
        Ok(self.notifications(changes))
    }

    pub fn is_inside_tree(&self, id: ElementId) -> bool {
        self.node_of(id).is_ok_and(|node| self.tree.is_inside_tree(node))
    }

    /// Makes the tree live.
    pub fn start(&mut self) -> Notifications {
        let changes = self.tree.start();
        self.notifications(changes)
    }

    /// Destroys `node` and its subtree. Every destroyed node leaves the
    /// proxy db and its element is detached.
    pub fn free_node(&mut self, node: NodeId) -> Result<Notifications, SceneError> {
        if node == self.tree.root() {
            return Err(SceneError::RootNode);
        }
        if !self.tree.contains(node) {
            return Err(SceneError::UnknownNode(node));
        }

        let changes = match self.tree.parent(node) {
            Some(parent) => self.tree.remove_child(parent, node)?,
            None => Vec::new(),
        };
        let notes = self.notifications(changes);

        for removed in self.tree.remove_subtree(node) {
            if let Some(element) = self.proxy_db.remove_node(removed) {
                if let Some(e) = self.elements.get_mut(element) {
                    e.node = None;
                }
            }
        }
        Ok(notes)
    }

    /// Frees the element's node, if any, then drops the element.
    pub fn free_element(&mut self, id: ElementId) -> Result<Notifications, SceneError> {
        if id == self.root_element {
            return Err(SceneError::RootNode);
        }
        let node = self.elements
            .get(id)
            .ok_or(SceneError::UnknownElement(id))?
            .node;

        let mut notes = match node {
            Some(node) => self.free_node(node)?,
            None => Notifications::default(),
        };
        if let Some(element) = self.elements.remove(id) {
            self.proxy_db.remove_element(id);
            notes.keep_alive(element.hooks().clone());
        }
        Ok(notes)
    }

    /// Proxies of every live, bound node in pre-order, with their node.
    pub fn live_proxies(&self) -> Vec<(NodeId, NodeProxy)> {
        self.tree
            .live_preorder()
            .into_iter()
            .filter_map(|id| self.tree.get(id).map(|node| (id, node)))
            .filter(|(_, node)| node.proxy.is_bound())
            .map(|(id, node)| (id, node.proxy.clone()))
            .collect()
    }

    fn notifications(&self, changes: TreeChanges) -> Notifications {
        let mut notes = Notifications::default();
        for (id, notification) in changes {
            if let Some(node) = self.tree.get(id) {
                if node.proxy.is_bound() {
                    notes.push(node.proxy.clone(), notification);
                }
            }
        }
        notes
    }

    fn link(&mut self, element: ElementId, node: NodeId) {
        if let Some(e) = self.elements.get_mut(element) {
            e.node = Some(node);
        }
        self.proxy_db.add_element(node, element);
        self.bind_proxy(element, node);
    }

    fn bind_proxy(&mut self, element: ElementId, node: NodeId) {
        let Some(link) = self.elements.get(element).map(Element::link) else {
            return;
        };
        if let Some(n) = self.tree.get_mut(node) {
            n.proxy.bind(link);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::test_hooks::*;

    fn recorder(tag: &str, journal: &Journal) -> SharedHooks {
        shared_hooks(Recorder::new(tag, journal))
    }

    #[test]
    fn setting_name_without_a_node_only_touches_the_element() {
        let mut scene = Scene::new("root");
        let e = scene.create_element("before", shared_hooks(NoHooks));
        let nodes_before = scene.tree.len();

        scene.set_element_name(e, "after").expect("rename");

        assert_eq!(scene.element_name(e), Some("after"));
        assert_eq!(scene.tree.len(), nodes_before);
        assert!(scene.tree.find_child(scene.root(), "after", true).is_none());
    }

    #[test]
    fn setting_name_with_a_node_updates_both() {
        let mut scene = Scene::new("root");
        let e = scene.spawn_element("before", shared_hooks(NoHooks));
        let node = scene.node_of(e).expect("attached");

        scene.set_element_name(e, "after").expect("rename");

        assert_eq!(scene.element_name(e), Some("after"));
        assert_eq!(scene.tree.name(node), Some("after"));
    }

    #[test]
    fn set_proxy_db_with_no_node_is_a_no_op() {
        let mut scene = Scene::new("root");
        let e = scene.create_element("e", shared_hooks(NoHooks));
        let entries = scene.proxy_db.len();

        for _ in 0..3 {
            assert_eq!(scene.set_proxy_db(e, None), Ok(()));
        }
        assert_eq!(scene.proxy_db.len(), entries);
        assert!(scene.element(e).is_some_and(|el| !el.is_attached()));
    }

    #[test]
    fn lookup_after_set_proxy_db_returns_the_same_element() {
        let mut scene = Scene::new("root");
        let node = scene.tree.create_node("n");
        let e = scene.create_element("e", shared_hooks(NoHooks));

        scene.set_proxy_db(e, Some(node)).expect("register");
        scene.set_proxy_db(e, Some(node)).expect("idempotent");

        assert_eq!(scene.element_for_node(node), Some(e));
        assert_eq!(scene.node_of(e), Ok(node));
        // Registration alone leaves the proxy unbound.
        assert!(scene.tree.get(node).is_some_and(|n| !n.proxy.is_bound()));
    }

    #[test]
    fn attachment_conflicts_are_errors() {
        let mut scene = Scene::new("root");
        let first = scene.tree.create_node("first");
        let second = scene.tree.create_node("second");
        let a = scene.create_element("a", shared_hooks(NoHooks));
        let b = scene.create_element("b", shared_hooks(NoHooks));

        scene.attach(a, first).expect("attach");
        assert_eq!(scene.attach(a, second), Err(SceneError::AlreadyAttached { element: a, node: first }));
        assert_eq!(scene.attach(b, first), Err(SceneError::NodeTaken { node: first, element: a }));
        assert_eq!(scene.attach(b, NodeId(404)), Err(SceneError::UnknownNode(NodeId(404))));
        assert_eq!(scene.set_proxy_db(ElementId(404), Some(first)), Err(SceneError::UnknownElement(ElementId(404))));
    }

    #[test]
    fn detach_clears_both_sides() {
        let mut scene = Scene::new("root");
        let e = scene.spawn_element("e", shared_hooks(NoHooks));
        let node = scene.node_of(e).expect("attached");

        assert_eq!(scene.detach(e), Ok(Some(node)));
        assert_eq!(scene.element_for_node(node), None);
        assert!(scene.tree.get(node).is_some_and(|n| !n.proxy.is_bound()));
        assert_eq!(scene.detach(e), Ok(None));
    }

    #[test]
    fn hierarchy_navigation() {
        let mut scene = Scene::new("root");
        let root = scene.root_element();
        let player = scene.spawn_element("Player", shared_hooks(NoHooks));
        let sword = scene.spawn_element("Sword", shared_hooks(NoHooks));
        let shield = scene.spawn_element("Shield", shared_hooks(NoHooks));

        scene.add_child(root, player).expect("add").dispatch();
        scene.add_child(player, sword).expect("add").dispatch();
        scene.add_child(player, shield).expect("add").dispatch();

        assert_eq!(scene.get_children(player), vec![sword, shield]);
        assert_eq!(scene.get_parent(sword), Some(player));
        assert_eq!(scene.get_parent(root), None);
        assert_eq!(scene.find(root, "Sh*"), Some(shield));
        assert_eq!(scene.find(sword, "Player"), None);

        scene.remove_child(player, sword).expect("remove").dispatch();
        assert_eq!(scene.get_children(player), vec![shield]);
        assert_eq!(scene.get_parent(sword), None);
        assert!(matches!(scene.remove_child(player, sword), Err(SceneError::NotAChild { .. })));
    }

    #[test]
    fn unattached_elements_cannot_join_the_hierarchy() {
        let mut scene = Scene::new("root");
        let loose = scene.create_element("loose", shared_hooks(NoHooks));

        assert!(matches!(
            scene.add_child(scene.root_element(), loose),
            Err(SceneError::NotAttached(e)) if e == loose
        ));
        assert!(scene.get_children(loose).is_empty());
        assert_eq!(scene.get_parent(loose), None);
        assert_eq!(scene.find(loose, "*"), None);
    }

    #[test]
    fn lifecycle_reaches_elements_through_their_proxies() {
        let journal = Journal::default();
        let mut scene = Scene::new("root");
        let root = scene.root_element();
        let parent = scene.spawn_element("parent", recorder("parent", &journal));
        let child = scene.spawn_element("child", recorder("child", &journal));

        scene.add_child(parent, child).expect("add").dispatch();
        scene.add_child(root, parent).expect("add").dispatch();
        assert!(journal.borrow().is_empty());

        scene.start().dispatch();
        assert_eq!(tags_for(&journal, LifecycleHook::EnterTree), vec!["parent", "child"]);
        assert_eq!(tags_for(&journal, LifecycleHook::Ready), vec!["child", "parent"]);

        scene.remove_child(root, parent).expect("remove").dispatch();
        assert_eq!(tags_for(&journal, LifecycleHook::ExitTree), vec!["child", "parent"]);

        scene.add_child(root, parent).expect("re-add").dispatch();
        assert_eq!(tags_for(&journal, LifecycleHook::Ready).len(), 2);
        assert_eq!(tags_for(&journal, LifecycleHook::EnterTree).len(), 4);
    }

    #[test]
    fn freeing_purges_the_proxy_db_and_still_delivers_exit() {
        let journal = Journal::default();
        let mut scene = Scene::new("root");
        let root = scene.root_element();
        let parent = scene.spawn_element("parent", recorder("parent", &journal));
        let child = scene.spawn_element("child", recorder("child", &journal));
        scene.add_child(parent, child).expect("add").dispatch();
        scene.add_child(root, parent).expect("add").dispatch();
        scene.start().dispatch();
        let child_node = scene.node_of(child).expect("attached");
        let entries = scene.proxy_db.len();

        scene.free_element(parent).expect("free").dispatch();

        assert_eq!(tags_for(&journal, LifecycleHook::ExitTree), vec!["child", "parent"]);
        assert_eq!(scene.proxy_db.len(), entries - 2);
        assert_eq!(scene.element_for_node(child_node), None);
        assert!(scene.element(parent).is_none());
        // The child element outlives its node, detached.
        assert!(scene.element(child).is_some_and(|e| !e.is_attached()));
        assert!(scene.get_children(root).is_empty());
    }

    #[test]
    fn the_root_cannot_be_freed() {
        let mut scene = Scene::new("root");
        assert!(matches!(scene.free_element(scene.root_element()), Err(SceneError::RootNode)));
        assert!(matches!(scene.free_node(scene.root()), Err(SceneError::RootNode)));
    }
}
