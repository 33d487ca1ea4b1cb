//! Heap object registry.
//!
//! Every object lives in one arena owned by the runtime and is addressed by
//! its `ObjectId`. Nothing is freed individually; [`Heap::teardown`] walks the
//! arena once and releases everything.

use xen_core::{ObjKind, ObjectId, hash_str};

use super::intern::Interner;
use super::object::{ManagedObject, XenString};

/// Allocation failure is unrecoverable for the runtime.
#[cold]
pub(crate) fn fatal_alloc(what: &str) -> ! {
    tracing::error!(target: "xen_runtime::heap", what, "allocation failed");
    eprintln!("fatal: failed to allocate memory for {what}");
    std::process::abort()
}

/// Summary produced by [`Heap::teardown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TeardownStats {
    pub objects: usize,
    pub bytes: usize,
    per_kind: [usize; ObjKind::ALL.len()],
}

impl TeardownStats {
    pub fn count(&self, kind: ObjKind) -> usize {
        self.per_kind[kind.index()]
    }
}

pub struct Heap {
    objects: Vec<ManagedObject>,
    interner: Interner,
}

impl Heap {
    pub fn new() -> Self {
        Self::with_capacity(1024, 256)
    }

    pub fn with_capacity(objects: usize, strings: usize) -> Self {
        Self {
            objects: Vec::with_capacity(objects),
            interner: Interner::with_capacity(strings),
        }
    }

    /// Registers `obj` and returns its handle.
    ///
    /// Strings must go through [`Heap::intern_copy`] or [`Heap::intern_take`]
    /// instead so the one-object-per-content rule holds.
    pub(crate) fn alloc(&mut self, obj: ManagedObject) -> ObjectId {
        if self.objects.try_reserve(1).is_err() {
            fatal_alloc("heap registry");
        }
        let id = ObjectId(self.objects.len());
        self.objects.push(obj);
        id
    }

    /// # Panics
    ///
    /// Panics if `id` was not issued by this heap. Use [`Heap::try_get`] for
    /// handles of unknown origin.
    #[inline]
    pub fn get(&self, id: ObjectId) -> &ManagedObject {
        &self.objects[id.0]
    }

    #[inline]
    pub fn try_get(&self, id: ObjectId) -> Option<&ManagedObject> {
        self.objects.get(id.0)
    }

    #[inline]
    pub(crate) fn try_get_mut(&mut self, id: ObjectId) -> Option<&mut ManagedObject> {
        self.objects.get_mut(id.0)
    }

    /// # Panics
    ///
    /// Panics if `id` was not issued by this heap.
    #[inline]
    pub fn kind_of(&self, id: ObjectId) -> ObjKind {
        self.objects[id.0].kind()
    }

    #[inline]
    pub fn try_kind_of(&self, id: ObjectId) -> Option<ObjKind> {
        self.objects.get(id.0).map(ManagedObject::kind)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Estimated bytes owned by live objects, measured now so buffers that
    /// grew after allocation are included.
    pub fn live_bytes(&self) -> usize {
        self.objects.iter().map(ManagedObject::size).sum()
    }

    pub fn interned_count(&self) -> usize {
        self.interner.len()
    }

    /// Text of a string object, `None` for any other kind.
    pub fn str_content(&self, id: ObjectId) -> Option<&str> {
        match self.objects.get(id.0) {
            Some(ManagedObject::Str(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Handle of the interned string equal to `text`, without allocating.
    pub fn lookup_interned(&self, text: &str) -> Option<ObjectId> {
        self.interner.find(hash_str(text), text, &self.objects)
    }

    /// Returns the canonical string object for `text`, copying it into a new
    /// object only when no equal content is interned yet.
    pub fn intern_copy(&mut self, text: &str) -> ObjectId {
        let hash = hash_str(text);
        if let Some(id) = self.interner.find(hash, text, &self.objects) {
            return id;
        }
        let mut buf = String::new();
        if buf.try_reserve_exact(text.len()).is_err() {
            fatal_alloc("string contents");
        }
        buf.push_str(text);
        self.adopt_str(buf, hash)
    }

    /// Like [`Heap::intern_copy`] but takes ownership of the buffer. On a hit
    /// the buffer is dropped and the existing object is returned.
    pub fn intern_take(&mut self, text: String) -> ObjectId {
        let hash = hash_str(&text);
        if let Some(id) = self.interner.find(hash, &text, &self.objects) {
            return id;
        }
        self.adopt_str(text, hash)
    }

    fn adopt_str(&mut self, text: String, hash: u64) -> ObjectId {
        let id = self.alloc(ManagedObject::Str(XenString::new(text.into_boxed_str(), hash)));
        self.interner.insert(hash, id);
        id
    }

    /// Releases every registered object exactly once.
    pub fn teardown(self) -> TeardownStats {
        let mut stats = TeardownStats::default();
        for obj in self.objects {
            stats.objects += 1;
            stats.bytes += obj.size();
            stats.per_kind[obj.kind().index()] += 1;
        }
        tracing::info!(
            target: "xen_runtime::heap",
            objects = stats.objects,
            bytes = stats.bytes,
            strings = stats.count(ObjKind::Str),
            "heap torn down"
        );
        stats
    }
}

impl Default for Heap {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::object::Array;

    #[test]
    fn intern_copy_shares_one_object() {
        let mut heap = Heap::new();
        let a = heap.intern_copy("hello");
        let b = heap.intern_copy("hello");
        let c = heap.intern_copy("world");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(heap.len(), 2);
        assert_eq!(heap.interned_count(), 2);
        assert_eq!(heap.str_content(a), Some("hello"));
    }

    #[test]
    fn intern_take_reuses_existing_content() {
        let mut heap = Heap::new();
        let a = heap.intern_copy("abc");
        let before = heap.len();
        let b = heap.intern_take(String::from("abc"));
        assert_eq!(a, b);
        assert_eq!(heap.len(), before);
    }

    #[test]
    fn empty_string_is_interned_like_any_other() {
        let mut heap = Heap::new();
        let a = heap.intern_copy("");
        let b = heap.intern_take(String::new());
        assert_eq!(a, b);
        assert_eq!(heap.str_content(a), Some(""));
    }

    #[test]
    fn live_bytes_follow_growth() {
        let mut heap = Heap::new();
        let id = heap.alloc(ManagedObject::Array(Array::new()));
        let before = heap.live_bytes();
        if let Some(ManagedObject::Array(a)) = heap.try_get_mut(id) {
            for _ in 0..100 {
                a.push(xen_core::Value::NULL);
            }
        }
        assert!(heap.live_bytes() >= before + 100 * std::mem::size_of::<xen_core::Value>());
    }

    #[test]
    fn foreign_handles_are_not_found() {
        let heap = Heap::new();
        assert!(heap.try_get(ObjectId(7)).is_none());
        assert_eq!(heap.try_kind_of(ObjectId(7)), None);
    }

    #[test]
    fn teardown_counts_each_object_once() {
        let mut heap = Heap::new();
        heap.intern_copy("a");
        heap.intern_copy("b");
        heap.intern_copy("a");
        heap.alloc(ManagedObject::Array(Array::new()));
        let stats = heap.teardown();
        assert_eq!(stats.objects, 3);
        assert_eq!(stats.count(ObjKind::Str), 2);
        assert_eq!(stats.count(ObjKind::Array), 1);
        assert!(stats.bytes > 0);
    }
}
