// scene_core/src/scene/lifecycle.rs
use crate::scene::input_event::InputEventRef;
use strum_macros::{Display, EnumIter, IntoStaticStr};
use std::cell::RefCell;
use std::rc::Rc;

/// The lifecycle callbacks a node forwards, by their script-facing names.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter, IntoStaticStr)]
pub enum LifecycleHook {
    #[strum(serialize = "enterTree")]
    EnterTree,
    #[strum(serialize = "exitTree")]
    ExitTree,
    #[strum(serialize = "ready")]
    Ready,
    #[strum(serialize = "process")]
    Process,
    #[strum(serialize = "physicsProcess")]
    PhysicsProcess,
    #[strum(serialize = "input")]
    Input,
    #[strum(serialize = "unhandledInput")]
    UnhandledInput,
    #[strum(serialize = "unhandledKeyInput")]
    UnhandledKeyInput,
    #[strum(serialize = "shortcutInput")]
    ShortcutInput,
}

impl LifecycleHook {
    pub fn script_name(self) -> &'static str {
        self.into()
    }
}

/// User behaviour attached to an element. Every hook defaults to a no-op.
pub trait ElementHooks {
    fn enter_tree(&mut self) {}
    fn exit_tree(&mut self) {}
    fn ready(&mut self) {}
    fn process(&mut self, _delta: f64) {}
    fn physics_process(&mut self, _delta: f64) {}
    fn input(&mut self, _event: &InputEventRef) {}
    fn unhandled_input(&mut self, _event: &InputEventRef) {}
    fn unhandled_key_input(&mut self, _event: &InputEventRef) {}
    fn shortcut_input(&mut self, _event: &InputEventRef) {}
}

/// Hooks for elements that only exist to carry structure.
pub struct NoHooks;

impl ElementHooks for NoHooks {}

pub type SharedHooks = Rc<RefCell<dyn ElementHooks>>;

pub fn shared_hooks<H: ElementHooks + 'static>(hooks: H) -> SharedHooks {
    Rc::new(RefCell::new(hooks))
}

/// One lifecycle delivery bound for a proxy.
#[derive(Clone, Debug, PartialEq)]
pub enum Notification {
    EnterTree,
    ExitTree,
    Ready,
    Process(f64),
    PhysicsProcess(f64),
    Input(InputEventRef),
    UnhandledInput(InputEventRef),
    UnhandledKeyInput(InputEventRef),
    ShortcutInput(InputEventRef),
}

impl Notification {
    pub fn hook(&self) -> LifecycleHook {
        match self {
            Notification::EnterTree => LifecycleHook::EnterTree,
            Notification::ExitTree => LifecycleHook::ExitTree,
            Notification::Ready => LifecycleHook::Ready,
            Notification::Process(_) => LifecycleHook::Process,
            Notification::PhysicsProcess(_) => LifecycleHook::PhysicsProcess,
            Notification::Input(_) => LifecycleHook::Input,
            Notification::UnhandledInput(_) => LifecycleHook::UnhandledInput,
            Notification::UnhandledKeyInput(_) => LifecycleHook::UnhandledKeyInput,
            Notification::ShortcutInput(_) => LifecycleHook::ShortcutInput,
        }
    }
}
