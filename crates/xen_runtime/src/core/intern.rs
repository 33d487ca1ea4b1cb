//! String interning table.
//!
//! The table stores only `(hash, handle)` pairs. String content lives once, in
//! the heap object the handle points at, and is compared through the registry
//! on probe.

use std::hash::{BuildHasher, Hash, Hasher};

use hashbrown::hash_map::RawEntryMut;
use xen_core::{FastHashMap, ObjectId, fast_map_with_capacity};

use super::object::ManagedObject;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct InternSlot {
    hash: u64,
    id: ObjectId,
}

// Buckets depend on the content hash alone; `find` probes by it.
impl Hash for InternSlot {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.hash.hash(state);
    }
}

pub struct Interner {
    table: FastHashMap<InternSlot, ()>,
}

impl Interner {
    pub fn with_capacity(cap: usize) -> Self {
        Self {
            table: fast_map_with_capacity(cap),
        }
    }

    /// Looks up `text` among the interned strings. `objects` is the heap
    /// registry the stored handles index into.
    pub(crate) fn find(&self, hash: u64, text: &str, objects: &[ManagedObject]) -> Option<ObjectId> {
        let bucket = self.table.hasher().hash_one(hash);
        self.table
            .raw_entry()
            .from_hash(bucket, |slot| {
                slot.hash == hash
                    && matches!(objects.get(slot.id.0), Some(ManagedObject::Str(s)) if s.as_str() == text)
            })
            .map(|(slot, _)| slot.id)
    }

    pub(crate) fn insert(&mut self, hash: u64, id: ObjectId) {
        let bucket = self.table.hasher().hash_one(hash);
        match self.table.raw_entry_mut().from_hash(bucket, |slot| slot.id == id) {
            RawEntryMut::Occupied(_) => {}
            RawEntryMut::Vacant(entry) => {
                entry.insert_hashed_nocheck(bucket, InternSlot { hash, id }, ());
            }
        }
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl Default for Interner {
    fn default() -> Self {
        Self::with_capacity(0)
    }
}
