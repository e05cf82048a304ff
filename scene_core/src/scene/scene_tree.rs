// scene_core/src/scene/scene_tree.rs
use crate::scene::scene_error::SceneError;
use crate::scene::lifecycle::Notification;
use crate::scene::node::*;
use std::collections::HashMap;

/// Node ids paired with the lifecycle call each one is due.
pub type TreeChanges = Vec<(NodeId, Notification)>;

/// The host hierarchy: node names, parent/child structure and
/// membership of the live tree. It decides when lifecycle calls fire
/// but never makes them itself.
pub struct SceneTree {
    nodes: HashMap<NodeId, Node>,
    root: NodeId,
    next_id: usize,
}

impl SceneTree {
    /// Creates a tree whose root is not live until `start`.
    pub fn new(root_name: &str) -> Self {
        let mut tree = Self {
            nodes: HashMap::new(),
            root: NodeId(0),
            next_id: 0,
        };
        tree.root = tree.create_node(root_name);
        tree
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Creates a detached node.
    pub fn create_node(&mut self, name: &str) -> NodeId {
        self.next_id += 1;
        let id = NodeId(self.next_id);
        self.nodes.insert(id, Node::new(name));
        id
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn name(&self, id: NodeId) -> Option<&str> {
        self.nodes.get(&id).map(|n| n.name.as_str())
    }

    pub fn set_name(&mut self, id: NodeId, name: &str) -> Result<(), SceneError> {
        let node = self.nodes.get_mut(&id).ok_or(SceneError::UnknownNode(id))?;
        node.name = name.to_string();
        Ok(())
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(&id).and_then(|n| n.parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes
            .get(&id)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    pub fn is_inside_tree(&self, id: NodeId) -> bool {
        self.nodes.get(&id).is_some_and(|n| n.inside_tree)
    }

    /// True when `ancestor` is a strict ancestor of `node`.
    pub fn is_ancestor_of(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = self.parent(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    /// Appends `child` under `parent`. If `parent` is live, the child's
    /// subtree enters the tree.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> Result<TreeChanges, SceneError> {
        if !self.contains(parent) {
            return Err(SceneError::UnknownNode(parent));
        }
        if !self.contains(child) {
            return Err(SceneError::UnknownNode(child));
        }
        if child == self.root {
            return Err(SceneError::RootNode);
        }
        if let Some(existing) = self.parent(child) {
            return Err(SceneError::AlreadyParented { child, parent: existing });
        }
        if child == parent || self.is_ancestor_of(child, parent) {
            return Err(SceneError::Cycle { parent, child });
        }

        if let Some(node) = self.nodes.get_mut(&parent) {
            node.children.push(child);
        }
        if let Some(node) = self.nodes.get_mut(&child) {
            node.parent = Some(parent);
        }

        if self.is_inside_tree(parent) {
            Ok(self.propagate_enter(child))
        } else {
            Ok(Vec::new())
        }
    }

    /// Detaches `child` from `parent`. A live subtree exits the tree.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<TreeChanges, SceneError> {
        if !self.contains(parent) {
            return Err(SceneError::UnknownNode(parent));
        }
        if self.parent(child) != Some(parent) {
            return Err(SceneError::NotAChild { parent, child });
        }

        let changes = if self.is_inside_tree(child) {
            self.propagate_exit(child)
        } else {
            Vec::new()
        };

        if let Some(node) = self.nodes.get_mut(&parent) {
            node.children.retain(|c| *c != child);
        }
        if let Some(node) = self.nodes.get_mut(&child) {
            node.parent = None;
        }
        Ok(changes)
    }

    /// Destroys `node` and its descendants without lifecycle calls.
    /// Returns the removed ids, children first.
    pub fn remove_subtree(&mut self, node: NodeId) -> Vec<NodeId> {
        if let Some(parent) = self.parent(node) {
            if let Some(p) = self.nodes.get_mut(&parent) {
                p.children.retain(|c| *c != node);
            }
        }
        let removed = self.postorder(node);
        for id in &removed {
            self.nodes.remove(id);
        }
        removed
    }

    /// Makes the root live. Does nothing the second time.
    pub fn start(&mut self) -> TreeChanges {
        if self.is_inside_tree(self.root) {
            return Vec::new();
        }
        self.propagate_enter(self.root)
    }

    /// First descendant of `node` whose name matches `pattern`.
    /// `*` matches any run of characters and `?` a single one.
    pub fn find_child(&self, node: NodeId, pattern: &str, recursive: bool) -> Option<NodeId> {
        let candidates = if recursive {
            self.preorder(node).into_iter().skip(1).collect()
        } else {
            self.children(node).to_vec()
        };

        candidates
            .into_iter()
            .find(|id| self.name(*id).is_some_and(|name| matches_pattern(pattern, name)))
    }

    /// `from` and its descendants, parents before children.
    pub fn preorder(&self, from: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![from];
        while let Some(id) = stack.pop() {
            if let Some(node) = self.nodes.get(&id) {
                out.push(id);
                stack.extend(node.children.iter().rev());
            }
        }
        out
    }

    /// `from` and its descendants, children before parents.
    pub fn postorder(&self, from: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.visit_postorder(from, &mut out);
        out
    }

    /// Every live node in pre-order.
    pub fn live_preorder(&self) -> Vec<NodeId> {
        if self.is_inside_tree(self.root) {
            self.preorder(self.root)
        } else {
            Vec::new()
        }
    }

    fn visit_postorder(&self, id: NodeId, out: &mut Vec<NodeId>) {
        if let Some(node) = self.nodes.get(&id) {
            for child in &node.children {
                self.visit_postorder(*child, out);
            }
            out.push(id);
        }
    }

    fn propagate_enter(&mut self, from: NodeId) -> TreeChanges {
        let mut changes = Vec::new();
        for id in self.preorder(from) {
            if let Some(node) = self.nodes.get_mut(&id) {
                node.inside_tree = true;
                changes.push((id, Notification::EnterTree));
            }
        }
        for id in self.postorder(from) {
            if let Some(node) = self.nodes.get_mut(&id) {
                if !node.ready_fired {
                    node.ready_fired = true;
                    changes.push((id, Notification::Ready));
                }
            }
        }
        changes
    }

    fn propagate_exit(&mut self, from: NodeId) -> TreeChanges {
        let mut changes = Vec::new();
        for id in self.postorder(from) {
            if let Some(node) = self.nodes.get_mut(&id) {
                node.inside_tree = false;
                changes.push((id, Notification::ExitTree));
            }
        }
        changes
    }
}

/// Glob match over the whole name.
pub fn matches_pattern(pattern: &str, name: &str) -> bool {
    let p: Vec<char> = pattern.chars().collect();
    let n: Vec<char> = name.chars().collect();
    let (mut pi, mut ni) = (0, 0);
    let mut star: Option<usize> = None;
    let mut mark = 0;

    while ni < n.len() {
        if pi < p.len() && (p[pi] == '?' || p[pi] == n[ni]) {
            pi += 1;
            ni += 1;
        } else if pi < p.len() && p[pi] == '*' {
            star = Some(pi);
            mark = ni;
            pi += 1;
        } else if let Some(s) = star {
            pi = s + 1;
            mark += 1;
            ni = mark;
        } else {
            return false;
        }
    }

    while pi < p.len() && p[pi] == '*' {
        pi += 1;
    }
    pi == p.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hook_names(changes: &TreeChanges, tree: &SceneTree) -> Vec<String> {
        changes
            .iter()
            .map(|(id, n)| format!("{}:{}", tree.name(*id).unwrap_or("?"), n.hook()))
            .collect()
    }

    /// root -> a -> (b, c)
    fn small_tree() -> (SceneTree, NodeId, NodeId, NodeId) {
        let mut tree = SceneTree::new("root");
        let a = tree.create_node("a");
        let b = tree.create_node("b");
        let c = tree.create_node("c");
        tree.add_child(a, b).expect("a-b");
        tree.add_child(a, c).expect("a-c");
        tree.add_child(tree.root(), a).expect("root-a");
        (tree, a, b, c)
    }

    #[test]
    fn nothing_fires_before_start() {
        let mut tree = SceneTree::new("root");
        let a = tree.create_node("a");
        assert!(tree.add_child(tree.root(), a).expect("add").is_empty());
        assert!(!tree.is_inside_tree(a));
    }

    #[test]
    fn start_enters_preorder_and_readies_postorder() {
        let (mut tree, ..) = small_tree();
        let changes = tree.start();
        assert_eq!(hook_names(&changes, &tree), vec![
            "root:enterTree", "a:enterTree", "b:enterTree", "c:enterTree",
            "b:ready", "c:ready", "a:ready", "root:ready",
        ]);
        assert!(tree.start().is_empty());
    }

    #[test]
    fn exit_is_postorder_and_ready_fires_once() {
        let (mut tree, a, ..) = small_tree();
        let _ = tree.start();
        let root = tree.root();

        let exits = tree.remove_child(root, a).expect("remove");
        assert_eq!(hook_names(&exits, &tree), vec!["b:exitTree", "c:exitTree", "a:exitTree"]);
        assert!(!tree.is_inside_tree(a));

        let again = tree.add_child(root, a).expect("re-add");
        assert_eq!(hook_names(&again, &tree), vec!["a:enterTree", "b:enterTree", "c:enterTree"]);
    }

    #[test]
    fn structural_errors() {
        let (mut tree, a, b, c) = small_tree();
        let root = tree.root();

        assert_eq!(tree.add_child(c, a), Err(SceneError::AlreadyParented { child: a, parent: root }));
        assert_eq!(tree.add_child(c, b), Err(SceneError::AlreadyParented { child: b, parent: a }));

        // Cycles only show up for detached subtrees.
        let x = tree.create_node("x");
        let y = tree.create_node("y");
        tree.add_child(x, y).expect("x-y");
        assert_eq!(tree.add_child(y, x), Err(SceneError::Cycle { parent: y, child: x }));
        assert_eq!(tree.add_child(x, x), Err(SceneError::Cycle { parent: x, child: x }));
        assert_eq!(tree.add_child(a, root), Err(SceneError::RootNode));
        assert_eq!(tree.remove_child(root, b), Err(SceneError::NotAChild { parent: root, child: b }));
        assert_eq!(tree.add_child(a, NodeId(99)), Err(SceneError::UnknownNode(NodeId(99))));
    }

    #[test]
    fn find_child_searches_preorder() {
        let (mut tree, a, b, c) = small_tree();
        let deep = tree.create_node("button_ok");
        tree.add_child(b, deep).expect("add");
        let root = tree.root();

        assert_eq!(tree.find_child(root, "c", true), Some(c));
        assert_eq!(tree.find_child(root, "c", false), None);
        assert_eq!(tree.find_child(root, "button_*", true), Some(deep));
        assert_eq!(tree.find_child(root, "?", true), Some(a));
        assert_eq!(tree.find_child(root, "root", true), None);
    }

    #[test]
    fn remove_subtree_drops_descendants() {
        let (mut tree, a, b, c) = small_tree();
        let removed = tree.remove_subtree(a);
        assert_eq!(removed, vec![b, c, a]);
        assert!(tree.children(tree.root()).is_empty());
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn glob_patterns() {
        assert!(matches_pattern("*", ""));
        assert!(matches_pattern("pl*er", "player"));
        assert!(matches_pattern("p?ayer", "player"));
        assert!(matches_pattern("*yer", "player"));
        assert!(!matches_pattern("pl*z", "player"));
        assert!(!matches_pattern("player", "player2"));
    }
}
