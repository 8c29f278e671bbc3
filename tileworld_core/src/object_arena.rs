use tileworld_ids::ObjectId;

use crate::object::WorldObject;
use crate::structs2d::Coordinate2D;

/// Generational slot arena for world objects. Index 0 is reserved as the nil
/// sentinel; removing a slot bumps its generation so stale ids stop resolving.
pub struct ObjectArena {
    objects: Vec<Option<WorldObject>>,
    generations: Vec<u32>,
    free_indices: Vec<usize>,
}

impl ObjectArena {
    pub fn new() -> Self {
        let mut objects = Vec::with_capacity(2);
        let mut generations = Vec::with_capacity(2);
        objects.push(None);
        generations.push(0);
        Self {
            objects,
            generations,
            free_indices: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        // +1 for the reserved nil sentinel slot at index 0.
        let mut objects = Vec::with_capacity(capacity.saturating_add(1));
        let mut generations = Vec::with_capacity(capacity.saturating_add(1));
        objects.push(None);
        generations.push(0);
        Self {
            objects,
            generations,
            free_indices: Vec::new(),
        }
    }

    /// Insert an object, returning its id (index + generation).
    pub fn insert(&mut self, object: WorldObject) -> ObjectId {
        // Reuse a previously freed slot in O(1).
        if let Some(index) = self.free_indices.pop() {
            self.objects[index] = Some(object);
            let generation = self.generations[index];
            return ObjectId::from_parts(index as u32, generation);
        }

        let index = self.objects.len();
        self.objects.push(Some(object));
        self.generations.push(0);
        ObjectId::from_parts(index as u32, 0)
    }

    /// Get an object by id; None if the id is nil, out of range, or stale.
    pub fn get(&self, id: ObjectId) -> Option<&WorldObject> {
        if id.is_nil()
            || id.index() >= self.objects.len() as u32
            || self.generations[id.index() as usize] != id.generation()
        {
            return None;
        }
        self.objects[id.index() as usize].as_ref()
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut WorldObject> {
        if id.is_nil()
            || id.index() >= self.objects.len() as u32
            || self.generations[id.index() as usize] != id.generation()
        {
            return None;
        }
        self.objects[id.index() as usize].as_mut()
    }

    /// Remove an object, bumping the slot generation.
    pub fn remove(&mut self, id: ObjectId) -> Option<WorldObject> {
        if id.is_nil()
            || id.index() >= self.objects.len() as u32
            || self.generations[id.index() as usize] != id.generation()
        {
            return None;
        }

        let index = id.index() as usize;
        self.generations[index] = self.generations[index].wrapping_add(1);
        let removed = self.objects[index].take();
        if removed.is_some() {
            self.free_indices.push(index);
        }
        removed
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        !id.is_nil()
            && id.index() < self.objects.len() as u32
            && self.generations[id.index() as usize] == id.generation()
            && self.objects[id.index() as usize].is_some()
    }

    /// World position of an object: the sum of local coordinates up the
    /// ancestor chain. Pure, O(depth). None if the id is dead.
    pub fn world_position(&self, id: ObjectId) -> Option<Coordinate2D> {
        let mut position = Coordinate2D::ZERO;
        let mut current = id;
        while !current.is_nil() {
            let object = self.get(current)?;
            position += object.coordinates;
            current = object.parent;
        }
        Some(position)
    }

    /// True if `ancestor` appears on `id`'s parent chain (or equals it).
    pub fn is_ancestor_or_self(&self, ancestor: ObjectId, id: ObjectId) -> bool {
        let mut current = id;
        while !current.is_nil() {
            if current == ancestor {
                return true;
            }
            match self.get(current) {
                Some(object) => current = object.parent,
                None => return false,
            }
        }
        false
    }

    pub fn iter(&self) -> impl Iterator<Item = (ObjectId, &WorldObject)> {
        self.objects
            .iter()
            .enumerate()
            .skip(1)
            .filter_map(|(index, slot)| {
                slot.as_ref()
                    .map(|o| (ObjectId::from_parts(index as u32, self.generations[index]), o))
            })
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (ObjectId, &mut WorldObject)> {
        self.objects
            .iter_mut()
            .zip(self.generations.iter())
            .enumerate()
            .skip(1)
            .filter_map(|(index, (slot, &generation))| {
                slot.as_mut()
                    .map(|o| (ObjectId::from_parts(index as u32, generation), o))
            })
    }

    pub fn len(&self) -> usize {
        self.objects.iter().filter(|o| o.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.iter().all(|o| o.is_none())
    }

    pub fn clear(&mut self) {
        self.objects.clear();
        self.generations.clear();
        self.free_indices.clear();
        self.objects.push(None);
        self.generations.push(0);
    }
}

impl Default for ObjectArena {
    fn default() -> Self {
        Self::new()
    }
}
