// scene_core/src/scene/notifications.rs
use crate::scene::lifecycle::{Notification, SharedHooks};
use crate::scene::node_proxy::NodeProxy;

/// Lifecycle calls produced by a structural change, in delivery order.
/// Dispatch them after releasing the scene borrow so hooks can touch the scene.
#[must_use = "notifications do nothing until dispatched"]
#[derive(Default)]
pub struct Notifications {
    pending: Vec<(NodeProxy, Notification)>,
    // Elements freed by the change stay alive until their exit_tree ran.
    keep_alive: Vec<SharedHooks>,
}

impl Notifications {
    pub fn push(&mut self, proxy: NodeProxy, notification: Notification) {
        self.pending.push((proxy, notification));
    }

    pub fn keep_alive(&mut self, hooks: SharedHooks) {
        self.keep_alive.push(hooks);
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn dispatch(self) {
        for (proxy, notification) in &self.pending {
            proxy.notify(notification);
        }
    }
}
