// scene_core/src/scene/test_hooks.rs
use crate::scene::lifecycle::*;
use crate::scene::input_event::InputEventRef;
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    Hook(LifecycleHook),
    Delta(LifecycleHook, f64),
    Event(LifecycleHook, InputEventRef),
}

impl Call {
    pub fn hook(&self) -> LifecycleHook {
        match self {
            Call::Hook(hook) | Call::Delta(hook, _) | Call::Event(hook, _) => *hook,
        }
    }
}

/// Calls received by every recorder sharing it, tagged by recorder.
pub type Journal = Rc<RefCell<Vec<(String, Call)>>>;

pub struct Recorder {
    tag: String,
    journal: Journal,
}

impl Recorder {
    pub fn new(tag: &str, journal: &Journal) -> Self {
        Self { tag: tag.to_string(), journal: journal.clone() }
    }

    fn push(&self, call: Call) {
        self.journal.borrow_mut().push((self.tag.clone(), call));
    }
}

impl ElementHooks for Recorder {
    fn enter_tree(&mut self) { self.push(Call::Hook(LifecycleHook::EnterTree)); }
    fn exit_tree(&mut self) { self.push(Call::Hook(LifecycleHook::ExitTree)); }
    fn ready(&mut self) { self.push(Call::Hook(LifecycleHook::Ready)); }
    fn process(&mut self, delta: f64) { self.push(Call::Delta(LifecycleHook::Process, delta)); }
    fn physics_process(&mut self, delta: f64) { self.push(Call::Delta(LifecycleHook::PhysicsProcess, delta)); }
    fn input(&mut self, event: &InputEventRef) { self.push(Call::Event(LifecycleHook::Input, event.clone())); }
    fn unhandled_input(&mut self, event: &InputEventRef) { self.push(Call::Event(LifecycleHook::UnhandledInput, event.clone())); }
    fn unhandled_key_input(&mut self, event: &InputEventRef) { self.push(Call::Event(LifecycleHook::UnhandledKeyInput, event.clone())); }
    fn shortcut_input(&mut self, event: &InputEventRef) { self.push(Call::Event(LifecycleHook::ShortcutInput, event.clone())); }
}

/// Tags that received `hook`, in delivery order.
pub fn tags_for(journal: &Journal, hook: LifecycleHook) -> Vec<String> {
    journal.borrow()
        .iter()
        .filter(|(_, call)| call.hook() == hook)
        .map(|(tag, _)| tag.clone())
        .collect()
}
