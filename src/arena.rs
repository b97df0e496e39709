//! Chunked slab allocator that hands out stable, copyable handles.

use std::mem;
use std::ops::{Index, IndexMut};
use std::vec::Vec;

/// A handle to an object stored in a `TypedArena<T>`.
///
/// Handles stay valid until the object they refer to is freed. A freed handle may be handed out
/// again by a later allocation.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Handle {
    chunk_index: usize,
    block_index: usize,
}

enum Slot<T> {
    Occupied(T),
    Vacant(Option<Handle>),
}

/// A slab allocator for a single type of object.
///
/// Objects are stored in chunks of a fixed size that are never reallocated, so a `Handle`
/// remains a valid address for as long as its object lives. Freed slots are threaded into a free
/// list and reused before a new chunk is requested.
///
/// # Examples
///
/// ```
/// use rb_collections::arena::TypedArena;
///
/// let mut arena = TypedArena::new(16);
///
/// let x = arena.allocate("left");
/// let y = arena.allocate("right");
/// assert_eq!(arena.len(), 2);
/// assert_eq!(arena[x], "left");
///
/// arena[y] = "parent";
/// assert_eq!(arena.free(&y), "parent");
/// assert_eq!(arena.get(&y), None);
/// ```
pub struct TypedArena<T> {
    head: Option<Handle>,
    chunks: Vec<Vec<Slot<T>>>,
    chunk_size: usize,
    len: usize,
    capacity: usize,
}

impl<T> TypedArena<T> {
    fn slot(&self, handle: &Handle) -> Option<&Slot<T>> {
        self.chunks
            .get(handle.chunk_index)
            .and_then(|chunk| chunk.get(handle.block_index))
    }

    fn slot_mut(&mut self, handle: &Handle) -> Option<&mut Slot<T>> {
        self.chunks
            .get_mut(handle.chunk_index)
            .and_then(|chunk| chunk.get_mut(handle.block_index))
    }

    /// Constructs a new, empty `TypedArena<T>` that stores `chunk_size` objects per chunk.
    ///
    /// # Panics
    ///
    /// Panics if `chunk_size` is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::arena::TypedArena;
    ///
    /// let arena: TypedArena<u32> = TypedArena::new(1024);
    /// assert!(arena.is_empty());
    /// ```
    pub fn new(chunk_size: usize) -> Self {
        assert!(chunk_size > 0, "Expected a positive chunk size.");
        TypedArena {
            head: None,
            chunks: Vec::new(),
            chunk_size,
            len: 0,
            capacity: 0,
        }
    }

    /// Moves `value` into the arena and returns its handle.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::arena::TypedArena;
    ///
    /// let mut arena = TypedArena::new(1024);
    /// let x = arena.allocate(0);
    /// assert_eq!(arena[x], 0);
    /// ```
    pub fn allocate(&mut self, value: T) -> Handle {
        if let Some(handle) = self.head.take() {
            let chunk_index = handle.chunk_index;
            let block_index = handle.block_index;
            let vacant = mem::replace(
                &mut self.chunks[chunk_index][block_index],
                Slot::Occupied(value),
            );
            match vacant {
                Slot::Vacant(next) => self.head = next,
                Slot::Occupied(_) => unreachable!("free list points at an occupied slot"),
            }
            self.len += 1;
            return handle;
        }

        if self.len == self.capacity {
            self.chunks.push(Vec::with_capacity(self.chunk_size));
            self.capacity += self.chunk_size;
        }
        self.len += 1;

        let chunk_index = self.chunks.len() - 1;
        let chunk = &mut self.chunks[chunk_index];
        chunk.push(Slot::Occupied(value));
        Handle {
            chunk_index,
            block_index: chunk.len() - 1,
        }
    }

    /// Removes the object behind `handle` from the arena and returns it.
    ///
    /// # Panics
    ///
    /// Panics if `handle` is out of range or refers to a slot that has already been freed.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::arena::TypedArena;
    ///
    /// let mut arena = TypedArena::new(1024);
    /// let x = arena.allocate(7);
    /// assert_eq!(arena.free(&x), 7);
    /// assert!(arena.is_empty());
    /// ```
    pub fn free(&mut self, handle: &Handle) -> T {
        let head = self.head;
        let slot = self
            .slot_mut(handle)
            .expect("Error: attempting to free invalid slot.");
        match mem::replace(slot, Slot::Vacant(head)) {
            Slot::Occupied(value) => {
                self.len -= 1;
                self.head = Some(*handle);
                value
            },
            Slot::Vacant(next) => {
                // restore the chain we just overwrote before bailing out
                *slot = Slot::Vacant(next);
                panic!("Error: attempting to free vacant slot.");
            },
        }
    }

    /// Returns an immutable reference to the object behind `handle`, or `None` if the handle does
    /// not refer to a live object.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::arena::TypedArena;
    ///
    /// let mut arena = TypedArena::new(1024);
    /// let x = arena.allocate(0);
    /// assert_eq!(arena.get(&x), Some(&0));
    /// ```
    pub fn get(&self, handle: &Handle) -> Option<&T> {
        match self.slot(handle) {
            Some(Slot::Occupied(ref value)) => Some(value),
            _ => None,
        }
    }

    /// Returns a mutable reference to the object behind `handle`, or `None` if the handle does
    /// not refer to a live object.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::arena::TypedArena;
    ///
    /// let mut arena = TypedArena::new(1024);
    /// let x = arena.allocate(0);
    /// if let Some(value) = arena.get_mut(&x) {
    ///     *value = 5;
    /// }
    /// assert_eq!(arena[x], 5);
    /// ```
    pub fn get_mut(&mut self, handle: &Handle) -> Option<&mut T> {
        match self.slot_mut(handle) {
            Some(Slot::Occupied(ref mut value)) => Some(value),
            _ => None,
        }
    }

    /// Returns the number of live objects in the arena.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the arena holds no live objects.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Drops every object in the arena and releases its chunks. All outstanding handles become
    /// invalid.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::arena::TypedArena;
    ///
    /// let mut arena = TypedArena::new(1024);
    /// let x = arena.allocate(0);
    /// arena.clear();
    /// assert!(arena.is_empty());
    /// assert_eq!(arena.get(&x), None);
    /// ```
    pub fn clear(&mut self) {
        self.head = None;
        self.chunks.clear();
        self.len = 0;
        self.capacity = 0;
    }
}

impl<T> Index<Handle> for TypedArena<T> {
    type Output = T;

    fn index(&self, handle: Handle) -> &Self::Output {
        self.get(&handle).expect("Error: handle does not refer to a live object.")
    }
}

impl<T> IndexMut<Handle> for TypedArena<T> {
    fn index_mut(&mut self, handle: Handle) -> &mut Self::Output {
        self.get_mut(&handle)
            .expect("Error: handle does not refer to a live object.")
    }
}

#[cfg(test)]
mod tests {
    use super::{Handle, TypedArena};

    fn handle(chunk_index: usize, block_index: usize) -> Handle {
        Handle {
            chunk_index,
            block_index,
        }
    }

    #[test]
    #[should_panic]
    fn test_zero_chunk_size() {
        let _: TypedArena<u32> = TypedArena::new(0);
    }

    #[test]
    #[should_panic]
    fn test_free_invalid_slot() {
        let mut arena: TypedArena<u32> = TypedArena::new(1024);
        arena.free(&handle(0, 0));
    }

    #[test]
    #[should_panic]
    fn test_free_vacant_slot() {
        let mut arena = TypedArena::new(1024);
        let x = arena.allocate(0);
        arena.free(&x);
        arena.free(&x);
    }

    #[test]
    fn test_allocate_fills_chunks_in_order() {
        let mut arena = TypedArena::new(2);
        assert_eq!(arena.allocate(0), handle(0, 0));
        assert_eq!(arena.allocate(1), handle(0, 1));
        assert_eq!(arena.allocate(2), handle(1, 0));
        assert_eq!(arena.len(), 3);
    }

    #[test]
    fn test_free_list_is_lifo() {
        let mut arena = TypedArena::new(4);
        let x = arena.allocate(0);
        let y = arena.allocate(1);
        let z = arena.allocate(2);

        assert_eq!(arena.free(&x), 0);
        assert_eq!(arena.free(&z), 2);
        assert_eq!(arena.len(), 1);

        assert_eq!(arena.allocate(3), z);
        assert_eq!(arena.allocate(4), x);
        assert_eq!(arena.allocate(5), handle(0, 3));
        assert_eq!(arena[y], 1);
    }

    #[test]
    fn test_reuse_does_not_grow_chunks() {
        let mut arena = TypedArena::new(1);
        let x = arena.allocate(0);
        arena.free(&x);
        assert_eq!(arena.allocate(1), x);
        assert_eq!(arena.allocate(2), handle(1, 0));
    }

    #[test]
    fn test_get_freed_slot() {
        let mut arena = TypedArena::new(1024);
        let x = arena.allocate(0);
        arena.free(&x);
        assert_eq!(arena.get(&x), None);
    }

    #[test]
    fn test_get_out_of_range() {
        let mut arena: TypedArena<u32> = TypedArena::new(1024);
        assert_eq!(arena.get(&handle(0, 0)), None);
        assert_eq!(arena.get_mut(&handle(3, 0)), None);
    }

    #[test]
    fn test_index_mut() {
        let mut arena = TypedArena::new(1024);
        let x = arena.allocate(0);
        arena[x] += 2;
        assert_eq!(arena[x], 2);
    }

    #[test]
    fn test_clear() {
        let mut arena = TypedArena::new(2);
        for i in 0..5 {
            arena.allocate(i);
        }
        arena.clear();
        assert!(arena.is_empty());
        assert_eq!(arena.allocate(9), handle(0, 0));
    }
}
