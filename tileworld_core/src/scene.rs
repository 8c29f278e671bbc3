use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use tileworld_ids::ObjectId;

use crate::camera::Camera;
use crate::error::WorldError;
use crate::object::WorldObject;
use crate::object_arena::ObjectArena;
use crate::services::Behavior;
use crate::structs2d::Coordinate2D;

/// One simulated world: an arena of objects, the ordered root list the
/// scheduler and physics walk, exactly one camera, and the per-object
/// behavior hooks.
///
/// Root-list order is significant: it is the logic-tick iteration order, the
/// physics tie-break order, and the render traversal order.
pub struct Scene {
    pub objects: ObjectArena,
    roots: Vec<ObjectId>,
    pub camera: Camera,
    behaviors: FxHashMap<ObjectId, Box<dyn Behavior>>,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            objects: ObjectArena::new(),
            roots: Vec::new(),
            camera: Camera::new(),
            behaviors: FxHashMap::default(),
        }
    }

    pub fn roots(&self) -> &[ObjectId] {
        &self.roots
    }

    /// Spawns a detached object as a root, appended to the root list.
    pub fn spawn(&mut self, object: WorldObject) -> ObjectId {
        let id = self.objects.insert(object);
        self.roots.push(id);
        id
    }

    /// Spawns an object as the last child of `parent`.
    pub fn spawn_child(
        &mut self,
        parent: ObjectId,
        object: WorldObject,
    ) -> Result<ObjectId, WorldError> {
        if !self.objects.contains(parent) {
            return Err(WorldError::DeadObject(parent));
        }
        let id = self.objects.insert(object);
        self.objects
            .get_mut(id)
            .expect("freshly inserted object")
            .parent = parent;
        self.objects
            .get_mut(parent)
            .expect("parent checked above")
            .add_child(id);
        Ok(id)
    }

    /// Reparents `child`. Passing its current parent is a no-op; `None`
    /// promotes it to a root. Making an ancestor (or the object itself) a
    /// child is rejected before any mutation. O(depth).
    pub fn set_parent(
        &mut self,
        child: ObjectId,
        new_parent: Option<ObjectId>,
    ) -> Result<(), WorldError> {
        let old_parent = self
            .objects
            .get(child)
            .ok_or(WorldError::DeadObject(child))?
            .parent;

        match new_parent {
            Some(parent) => {
                if !self.objects.contains(parent) {
                    return Err(WorldError::DeadObject(parent));
                }
                if old_parent == parent {
                    return Ok(());
                }
                if self.objects.is_ancestor_or_self(child, parent) {
                    return Err(WorldError::CycleDetected { child, parent });
                }

                self.detach(child, old_parent);
                self.objects
                    .get_mut(parent)
                    .expect("parent checked above")
                    .add_child(child);
                self.objects
                    .get_mut(child)
                    .expect("child checked above")
                    .parent = parent;
            }
            None => {
                if old_parent.is_nil() {
                    return Ok(());
                }
                self.detach(child, old_parent);
                self.roots.push(child);
                self.objects
                    .get_mut(child)
                    .expect("child checked above")
                    .parent = ObjectId::nil();
            }
        }
        Ok(())
    }

    /// Removes `child` from its current container (parent child list or root
    /// list) without touching its own parent field.
    fn detach(&mut self, child: ObjectId, old_parent: ObjectId) {
        if old_parent.is_nil() {
            self.roots.retain(|&r| r != child);
        } else if let Some(parent) = self.objects.get_mut(old_parent) {
            parent.remove_child(child);
        }
    }

    /// Recursively removes an object and its whole subtree: arena slots,
    /// behavior hooks, and the link from its parent or the root list.
    pub fn despawn(&mut self, id: ObjectId) -> Result<(), WorldError> {
        let parent = self
            .objects
            .get(id)
            .ok_or(WorldError::DeadObject(id))?
            .parent;
        self.detach(id, parent);

        let mut pending = vec![id];
        while let Some(current) = pending.pop() {
            if let Some(object) = self.objects.remove(current) {
                pending.extend(object.children.iter().copied());
            }
            self.behaviors.remove(&current);
        }
        Ok(())
    }

    /// World position of an object: local coordinates summed up the ancestor
    /// chain.
    pub fn world_position(&self, id: ObjectId) -> Option<Coordinate2D> {
        self.objects.world_position(id)
    }

    /// Installs (or replaces) the behavior hook for an object.
    pub fn set_behavior(&mut self, id: ObjectId, behavior: Box<dyn Behavior>) {
        self.behaviors.insert(id, behavior);
    }

    pub fn remove_behavior(&mut self, id: ObjectId) -> bool {
        self.behaviors.remove(&id).is_some()
    }

    /// Temporarily takes a behavior out of the scene so the scheduler can
    /// call it with the scene borrowed mutably. Pair with `restore_behavior`.
    pub fn take_behavior(&mut self, id: ObjectId) -> Option<Box<dyn Behavior>> {
        self.behaviors.remove(&id)
    }

    pub fn restore_behavior(&mut self, id: ObjectId, behavior: Box<dyn Behavior>) {
        self.behaviors.insert(id, behavior);
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

/// Named scenes plus a single active pointer. Swapping the active scene is a
/// name replacement, never a merge.
#[derive(Default)]
pub struct SceneRegistry {
    scenes: IndexMap<String, Scene>,
    active: Option<String>,
}

impl SceneRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a scene, replacing any scene with the same name.
    pub fn insert(&mut self, name: impl Into<String>, scene: Scene) {
        self.scenes.insert(name.into(), scene);
    }

    pub fn get(&self, name: &str) -> Option<&Scene> {
        self.scenes.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Scene> {
        self.scenes.get_mut(name)
    }

    pub fn set_active(&mut self, name: &str) -> Result<(), WorldError> {
        if !self.scenes.contains_key(name) {
            return Err(WorldError::NoSuchScene(name.to_string()));
        }
        self.active = Some(name.to_string());
        Ok(())
    }

    pub fn active_name(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn active(&self) -> Option<&Scene> {
        self.scenes.get(self.active.as_deref()?)
    }

    pub fn active_mut(&mut self) -> Option<&mut Scene> {
        let name = self.active.clone()?;
        self.scenes.get_mut(&name)
    }

    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }
}
