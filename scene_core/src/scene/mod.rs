pub mod dispatch;
pub mod element;
pub mod input_event;
pub mod lifecycle;
pub mod node;
pub mod node_proxy;
pub mod notifications;
pub mod proxy_db;
pub mod scene;
pub mod scene_error;
pub mod scene_tree;

#[cfg(test)]
pub(crate) mod test_hooks;
