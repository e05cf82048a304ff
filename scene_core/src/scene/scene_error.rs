// scene_core/src/scene/scene_error.rs
use crate::scene::element::ElementId;
use crate::scene::node::NodeId;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SceneError {
    #[error("unknown node {0:?}")]
    UnknownNode(NodeId),
    #[error("unknown element {0:?}")]
    UnknownElement(ElementId),
    #[error("element {0:?} is not attached to a node")]
    NotAttached(ElementId),
    #[error("element {element:?} is already attached to node {node:?}")]
    AlreadyAttached { element: ElementId, node: NodeId },
    #[error("node {node:?} already belongs to element {element:?}")]
    NodeTaken { node: NodeId, element: ElementId },
    #[error("node {child:?} already has parent {parent:?}")]
    AlreadyParented { child: NodeId, parent: NodeId },
    #[error("node {child:?} is not a child of {parent:?}")]
    NotAChild { parent: NodeId, child: NodeId },
    #[error("adding {child:?} under {parent:?} would create a cycle")]
    Cycle { parent: NodeId, child: NodeId },
    #[error("the tree root cannot be freed or reparented")]
    RootNode,
}
