// scene_core/src/scene/node_proxy.rs
use crate::scene::lifecycle::*;
use crate::scene::input_event::InputEventRef;
use crate::scene::element::ElementId;
use std::collections::VecDeque;
use std::cell::RefCell;
use std::rc::Weak;
use std::rc::Rc;
use std::fmt;

/// Non-owning link from a proxy to an element's hooks.
/// Clones share one queue of calls that arrived while a hook was running.
#[derive(Clone)]
pub struct ElementLink {
    pub id: ElementId,
    hooks: Weak<RefCell<dyn ElementHooks>>,
    deferred: Rc<RefCell<VecDeque<Notification>>>,
}

impl ElementLink {
    pub fn new(id: ElementId, hooks: &SharedHooks) -> Self {
        Self {
            id,
            hooks: Rc::downgrade(hooks),
            deferred: Rc::default(),
        }
    }

    /// False once the element has been dropped.
    pub fn is_alive(&self) -> bool {
        self.hooks.strong_count() > 0
    }
}

/// Sits on a host node and forwards its lifecycle callbacks to at most
/// one element. Unbound, or bound to a dropped element, every call is a no-op.
#[derive(Clone, Default)]
pub struct NodeProxy {
    element: Option<ElementLink>,
}

impl fmt::Debug for NodeProxy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeProxy")
            .field("element", &self.element())
            .finish()
    }
}

impl NodeProxy {
    pub fn bind(&mut self, link: ElementLink) {
        self.element = Some(link);
    }

    pub fn unbind(&mut self) -> Option<ElementLink> {
        self.element.take()
    }

    pub fn element(&self) -> Option<ElementId> {
        self.element.as_ref().map(|link| link.id)
    }

    pub fn is_bound(&self) -> bool {
        self.element.is_some()
    }

    pub fn enter_tree(&self) {
        self.forward(Notification::EnterTree);
    }

    pub fn exit_tree(&self) {
        self.forward(Notification::ExitTree);
    }

    pub fn ready(&self) {
        self.forward(Notification::Ready);
    }

    pub fn process(&self, delta: f64) {
        self.forward(Notification::Process(delta));
    }

    pub fn physics_process(&self, delta: f64) {
        self.forward(Notification::PhysicsProcess(delta));
    }

    pub fn input(&self, event: &InputEventRef) {
        self.forward(Notification::Input(event.clone()));
    }

    pub fn unhandled_input(&self, event: &InputEventRef) {
        self.forward(Notification::UnhandledInput(event.clone()));
    }

    pub fn unhandled_key_input(&self, event: &InputEventRef) {
        self.forward(Notification::UnhandledKeyInput(event.clone()));
    }

    pub fn shortcut_input(&self, event: &InputEventRef) {
        self.forward(Notification::ShortcutInput(event.clone()));
    }

    /// Routes a queued notification to the matching callback.
    pub fn notify(&self, notification: &Notification) {
        self.forward(notification.clone());
    }

    fn forward(&self, notification: Notification) {
        let Some(link) = &self.element else {
            return;
        };
        let Some(hooks) = link.hooks.upgrade() else {
            return;
        };

        // The element is inside one of its own hooks: run this call once it returns.
        let Ok(mut borrowed) = hooks.try_borrow_mut() else {
            log::debug!("Deferred re-entrant '{}' on element {:?}.", notification.hook(), link.id);
            link.deferred.borrow_mut().push_back(notification);
            return;
        };
        deliver(&mut *borrowed, &notification);
        drop(borrowed);

        loop {
            let Some(next) = link.deferred.borrow_mut().pop_front() else {
                break;
            };
            match hooks.try_borrow_mut() {
                Ok(mut borrowed) => deliver(&mut *borrowed, &next),
                Err(_) => {
                    link.deferred.borrow_mut().push_front(next);
                    break;
                }
            }
        }
    }
}

fn deliver(hooks: &mut dyn ElementHooks, notification: &Notification) {
    match notification {
        Notification::EnterTree => hooks.enter_tree(),
        Notification::ExitTree => hooks.exit_tree(),
        Notification::Ready => hooks.ready(),
        Notification::Process(delta) => hooks.process(*delta),
        Notification::PhysicsProcess(delta) => hooks.physics_process(*delta),
        Notification::Input(event) => hooks.input(event),
        Notification::UnhandledInput(event) => hooks.unhandled_input(event),
        Notification::UnhandledKeyInput(event) => hooks.unhandled_key_input(event),
        Notification::ShortcutInput(event) => hooks.shortcut_input(event),
    }
}
