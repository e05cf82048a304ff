// scene_core/src/scene/dispatch.rs
use crate::scene::input_event::InputEventRef;
use crate::scene::node_proxy::NodeProxy;
use crate::scene::scene::Scene;
use crate::scene::node::NodeId;
use std::cell::RefCell;
use std::rc::Rc;

/// Scene handle shared by the host loop and script handles.
pub type SharedScene = Rc<RefCell<Scene>>;

pub fn shared(scene: Scene) -> SharedScene {
    Rc::new(RefCell::new(scene))
}

// Every function below snapshots the proxies under a short borrow and
// calls them after it is released, so hooks may borrow the scene again.
// A node that left the tree earlier in the same pass is skipped.

/// Makes the tree live, firing enter and ready for everything under the root.
pub fn start(scene: &SharedScene) {
    let notes = scene.borrow_mut().start();
    notes.dispatch();
}

fn still_inside(scene: &SharedScene, node: NodeId) -> bool {
    scene.borrow().tree.is_inside_tree(node)
}

fn each_live(scene: &SharedScene, proxies: &[(NodeId, NodeProxy)], call: impl Fn(&NodeProxy)) {
    for (node, proxy) in proxies {
        if still_inside(scene, *node) {
            call(proxy);
        }
    }
}

/// One idle frame: `process(delta)` on every live node, parents first.
pub fn process_frame(scene: &SharedScene, delta: f64) {
    let proxies = scene.borrow().live_proxies();
    each_live(scene, &proxies, |proxy| proxy.process(delta));
}

/// One fixed step: `physics_process(delta)` on every live node, parents first.
pub fn physics_frame(scene: &SharedScene, delta: f64) {
    let proxies = scene.borrow().live_proxies();
    each_live(scene, &proxies, |proxy| proxy.physics_process(delta));
}

/// Delivers an input event, last node first, through the input phases.
/// Stops as soon as a receiver marks the event handled.
pub fn push_input(scene: &SharedScene, event: &InputEventRef) {
    let mut proxies = scene.borrow().live_proxies();
    proxies.reverse();

    let phase = |call: &dyn Fn(&NodeProxy)| {
        for (node, proxy) in &proxies {
            if event.is_handled() {
                return;
            }
            if still_inside(scene, *node) {
                call(proxy);
            }
        }
    };

    phase(&|proxy| proxy.input(event));
    if event.is_key() {
        phase(&|proxy| proxy.shortcut_input(event));
        phase(&|proxy| proxy.unhandled_key_input(event));
    }
    phase(&|proxy| proxy.unhandled_input(event));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::test_hooks::*;
    use crate::scene::input_event::*;
    use crate::scene::lifecycle::*;
    use crate::scene::element::ElementId;

    /// root -> (a -> b, c), started.
    fn live_scene(journal: &Journal) -> (SharedScene, [ElementId; 3]) {
        let scene = shared(Scene::new("root"));
        let ids = {
            let mut s = scene.borrow_mut();
            let root = s.root_element();
            let a = s.spawn_element("a", shared_hooks(Recorder::new("a", journal)));
            let b = s.spawn_element("b", shared_hooks(Recorder::new("b", journal)));
            let c = s.spawn_element("c", shared_hooks(Recorder::new("c", journal)));
            s.add_child(a, b).expect("add").dispatch();
            s.add_child(root, a).expect("add").dispatch();
            s.add_child(root, c).expect("add").dispatch();
            [a, b, c]
        };
        start(&scene);
        journal.borrow_mut().clear();
        (scene, ids)
    }

    struct Swallow {
        journal: Journal,
        phase: LifecycleHook,
    }

    impl ElementHooks for Swallow {
        fn input(&mut self, event: &InputEventRef) {
            self.journal.borrow_mut().push(("swallow".into(), Call::Event(LifecycleHook::Input, event.clone())));
            if self.phase == LifecycleHook::Input {
                event.set_handled();
            }
        }

        fn unhandled_key_input(&mut self, event: &InputEventRef) {
            self.journal.borrow_mut().push(("swallow".into(), Call::Event(LifecycleHook::UnhandledKeyInput, event.clone())));
            if self.phase == LifecycleHook::UnhandledKeyInput {
                event.set_handled();
            }
        }
    }

    #[test]
    fn frames_run_parents_first() {
        let journal = Journal::default();
        let (scene, _) = live_scene(&journal);

        process_frame(&scene, 0.5);
        physics_frame(&scene, 0.25);

        assert_eq!(tags_for(&journal, LifecycleHook::Process), vec!["a", "b", "c"]);
        assert_eq!(tags_for(&journal, LifecycleHook::PhysicsProcess), vec!["a", "b", "c"]);
        assert!(journal.borrow().iter().any(|(_, call)| *call == Call::Delta(LifecycleHook::Process, 0.5)));
    }

    #[test]
    fn nothing_runs_before_start() {
        let journal = Journal::default();
        let scene = shared(Scene::new("root"));
        {
            let mut s = scene.borrow_mut();
            let root = s.root_element();
            let a = s.spawn_element("a", shared_hooks(Recorder::new("a", &journal)));
            s.add_child(root, a).expect("add").dispatch();
        }

        process_frame(&scene, 1.0);
        push_input(&scene, &InputEvent::key("A", true));
        assert!(journal.borrow().is_empty());
    }

    #[test]
    fn detached_subtrees_do_not_process() {
        let journal = Journal::default();
        let (scene, [a, ..]) = live_scene(&journal);
        let root = scene.borrow().root_element();
        let notes = scene.borrow_mut().remove_child(root, a).expect("remove");
        notes.dispatch();
        journal.borrow_mut().clear();

        process_frame(&scene, 1.0);
        assert_eq!(tags_for(&journal, LifecycleHook::Process), vec!["c"]);
    }

    #[test]
    fn key_events_walk_every_phase_in_reverse_order() {
        let journal = Journal::default();
        let (scene, _) = live_scene(&journal);
        let event = InputEvent::key("Space", true);

        push_input(&scene, &event);

        assert_eq!(tags_for(&journal, LifecycleHook::Input), vec!["c", "b", "a"]);
        assert_eq!(tags_for(&journal, LifecycleHook::ShortcutInput), vec!["c", "b", "a"]);
        assert_eq!(tags_for(&journal, LifecycleHook::UnhandledKeyInput), vec!["c", "b", "a"]);
        assert_eq!(tags_for(&journal, LifecycleHook::UnhandledInput), vec!["c", "b", "a"]);
        let phases: Vec<LifecycleHook> = journal.borrow().iter().map(|(_, call)| call.hook()).collect();
        assert_eq!(phases[0], LifecycleHook::Input);
        assert_eq!(phases[3], LifecycleHook::ShortcutInput);
        assert_eq!(phases[6], LifecycleHook::UnhandledKeyInput);
        assert_eq!(phases[9], LifecycleHook::UnhandledInput);
    }

    #[test]
    fn non_key_events_skip_the_key_phases() {
        let journal = Journal::default();
        let (scene, _) = live_scene(&journal);

        push_input(&scene, &InputEvent::action("jump", true));

        assert!(tags_for(&journal, LifecycleHook::ShortcutInput).is_empty());
        assert!(tags_for(&journal, LifecycleHook::UnhandledKeyInput).is_empty());
        assert_eq!(tags_for(&journal, LifecycleHook::UnhandledInput).len(), 3);
    }

    #[test]
    fn handled_events_stop_propagating() {
        for (phase, expected_unhandled_key) in [
            (LifecycleHook::Input, 0),
            (LifecycleHook::UnhandledKeyInput, 0),
        ] {
            let journal = Journal::default();
            let (scene, _) = live_scene(&journal);
            {
                let mut s = scene.borrow_mut();
                let root = s.root_element();
                let hooks = shared_hooks(Swallow { journal: journal.clone(), phase });
                let swallow = s.spawn_element("swallow", hooks);
                s.add_child(root, swallow).expect("add").dispatch();
            }
            journal.borrow_mut().clear();
            let event = InputEvent::key("Escape", true);

            push_input(&scene, &event);

            assert!(event.is_handled());
            assert!(tags_for(&journal, LifecycleHook::UnhandledInput).is_empty());
            let recorded_unhandled_key = tags_for(&journal, LifecycleHook::UnhandledKeyInput)
                .iter()
                .filter(|tag| tag.as_str() != "swallow")
                .count();
            assert_eq!(recorded_unhandled_key, expected_unhandled_key);
            if phase == LifecycleHook::Input {
                // The swallowing node is last in the tree, so it sees input first.
                assert_eq!(tags_for(&journal, LifecycleHook::Input), vec!["swallow"]);
            }
        }
    }

    /// Takes `victim` out of the tree from inside its own hooks.
    struct Pruner {
        scene: std::rc::Weak<RefCell<Scene>>,
        victim: ElementId,
    }

    impl Pruner {
        fn prune(&self) {
            let Some(scene) = self.scene.upgrade() else {
                return;
            };
            let notes = {
                let mut s = scene.borrow_mut();
                let root = s.root_element();
                s.remove_child(root, self.victim)
            };
            if let Ok(notes) = notes {
                notes.dispatch();
            }
        }
    }

    impl ElementHooks for Pruner {
        fn process(&mut self, _delta: f64) {
            self.prune();
        }

        fn input(&mut self, _event: &InputEventRef) {
            self.prune();
        }
    }

    /// root -> (pruner, victim) or root -> (victim, pruner), started.
    fn pruned_scene(journal: &Journal, pruner_first: bool) -> SharedScene {
        let scene = shared(Scene::new("root"));
        {
            let mut s = scene.borrow_mut();
            let root = s.root_element();
            let victim = s.spawn_element("victim", shared_hooks(Recorder::new("victim", journal)));
            let pruner = s.spawn_element("pruner", shared_hooks(Pruner {
                scene: Rc::downgrade(&scene),
                victim,
            }));
            let order = if pruner_first { [pruner, victim] } else { [victim, pruner] };
            for child in order {
                s.add_child(root, child).expect("add").dispatch();
            }
        }
        start(&scene);
        journal.borrow_mut().clear();
        scene
    }

    #[test]
    fn sibling_removed_mid_frame_gets_no_process() {
        let journal = Journal::default();
        let scene = pruned_scene(&journal, true);

        process_frame(&scene, 0.5);
        physics_frame(&scene, 0.5);

        assert_eq!(tags_for(&journal, LifecycleHook::ExitTree), vec!["victim"]);
        assert!(tags_for(&journal, LifecycleHook::Process).is_empty());
        assert!(tags_for(&journal, LifecycleHook::PhysicsProcess).is_empty());
    }

    #[test]
    fn sibling_removed_mid_input_gets_no_event() {
        let journal = Journal::default();
        // Input runs last node first, so the pruner at the back goes first.
        let scene = pruned_scene(&journal, false);

        push_input(&scene, &InputEvent::key("A", true));

        assert_eq!(tags_for(&journal, LifecycleHook::ExitTree), vec!["victim"]);
        assert!(tags_for(&journal, LifecycleHook::Input).is_empty());
        assert!(tags_for(&journal, LifecycleHook::UnhandledInput).is_empty());
    }
}
