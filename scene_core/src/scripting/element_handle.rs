// scene_core/src/scripting/element_handle.rs
use crate::scripting::lua_constants::*;
use crate::scene::dispatch::SharedScene;
use crate::scene::element::ElementId;
use mlua::UserDataFields;
use mlua::UserDataMethods;
use mlua::UserDataRef;
use mlua::AnyUserData;
use mlua::MetaMethod;
use mlua::UserData;

/// A thin wrapper that carries an element id and the scene it lives in.
/// Handles are compared by id, so two handles to one element are `==`.
#[derive(Clone)]
pub struct ElementHandle {
    pub element: ElementId,
    pub scene: SharedScene,
}

impl ElementHandle {
    pub fn new(element: ElementId, scene: SharedScene) -> Self {
        Self { element, scene }
    }

    fn wrap(&self, element: Option<ElementId>) -> Option<ElementHandle> {
        element.map(|id| ElementHandle::new(id, self.scene.clone()))
    }
}

impl UserData for ElementHandle {
    fn add_fields<F: UserDataFields<Self>>(fields: &mut F) {
        fields.add_field_method_get(NAME, |_, this| {
            this.scene
                .borrow()
                .element_name(this.element)
                .map(str::to_owned)
                .ok_or_else(|| mlua::Error::RuntimeError(
                    format!("Element {} no longer exists", *this.element)))
        });

        // Shared borrow, so hooks running under one of this element's
        // methods can still rename it.
        fields.add_field_function_set(NAME, |_, ud: AnyUserData, name: String| {
            let this = ud.borrow::<ElementHandle>()?;
            this.scene
                .borrow_mut()
                .set_element_name(this.element, &name)
                .map_err(mlua::Error::external)
        });

        // convenience: `element.id` (read‑only)
        fields.add_field_method_get(ID, |_, this| Ok(*this.element));
    }

    fn add_methods<M: UserDataMethods<Self>>(methods: &mut M) {
        // e:find("Pattern*")
        methods.add_method(FIND, |_, this, pattern: String| {
            let found = this.scene.borrow().find(this.element, &pattern);
            Ok(this.wrap(found))
        });

        methods.add_method(GET_PARENT, |_, this, ()| {
            let parent = this.scene.borrow().get_parent(this.element);
            Ok(this.wrap(parent))
        });

        methods.add_method(ADD_CHILD, |_, this, child: UserDataRef<ElementHandle>| {
            let child_id = child.element;
            drop(child);
            let notes = this.scene
                .borrow_mut()
                .add_child(this.element, child_id)
                .map_err(mlua::Error::external)?;
            notes.dispatch();
            Ok(())
        });

        methods.add_method(REMOVE_CHILD, |_, this, child: UserDataRef<ElementHandle>| {
            let child_id = child.element;
            drop(child);
            let notes = this.scene
                .borrow_mut()
                .remove_child(this.element, child_id)
                .map_err(mlua::Error::external)?;
            notes.dispatch();
            Ok(())
        });

        methods.add_method(GET_CHILDREN, |_, this, ()| {
            let children = this.scene.borrow().get_children(this.element);
            Ok(children
                .into_iter()
                .map(|id| ElementHandle::new(id, this.scene.clone()))
                .collect::<Vec<_>>())
        });

        methods.add_method(IS_INSIDE_TREE, |_, this, ()| {
            Ok(this.scene.borrow().is_inside_tree(this.element))
        });

        methods.add_method(FREE, |_, this, ()| {
            let notes = this.scene
                .borrow_mut()
                .free_element(this.element)
                .map_err(mlua::Error::external)?;
            notes.dispatch();
            Ok(())
        });

        methods.add_meta_method(MetaMethod::Eq, |_, this, other: AnyUserData| {
            Ok(other
                .borrow::<ElementHandle>()
                .is_ok_and(|other| other.element == this.element))
        });

        methods.add_meta_method(MetaMethod::ToString, |_, this, ()| {
            let name = this.scene
                .borrow()
                .element_name(this.element)
                .unwrap_or("<freed>")
                .to_string();
            Ok(format!("Element({}, {})", *this.element, name))
        });
    }
}
