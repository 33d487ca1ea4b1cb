use xen_core::{FastHashMap, ObjectId, Value, fast_map_new};

/// Mapping keyed by interned string handles. Because keys are interned,
/// handle equality is content equality.
#[derive(Debug, Clone)]
pub struct Dict {
    entries: FastHashMap<ObjectId, Value>,
}

impl Dict {
    pub fn new() -> Self {
        Self {
            entries: fast_map_new(),
        }
    }

    pub fn get(&self, key: ObjectId) -> Option<Value> {
        self.entries.get(&key).copied()
    }

    /// Returns `true` when the key was not present before.
    pub fn set(&mut self, key: ObjectId, value: Value) -> bool {
        self.entries.insert(key, value).is_none()
    }

    pub fn remove(&mut self, key: ObjectId) -> bool {
        self.entries.remove(&key).is_some()
    }

    pub fn contains(&self, key: ObjectId) -> bool {
        self.entries.contains_key(&key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.entries.capacity()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Entries in storage order.
    pub fn iter(&self) -> impl Iterator<Item = (ObjectId, Value)> + '_ {
        self.entries.iter().map(|(k, v)| (*k, *v))
    }
}

impl Default for Dict {
    fn default() -> Self {
        Self::new()
    }
}
