//! Fast, but limited allocator with generational handles.

use std::mem;
use std::ops::{Index, IndexMut};
use std::vec::Vec;

/// A handle to an object allocated in a `TypedArena<T>`.
///
/// A slot remembers the generation of the block it was issued for. Once the object is freed the
/// block's generation is bumped, so the old slot never resolves again even if the block is later
/// reused by another allocation.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Slot {
    chunk_index: usize,
    block_index: usize,
    generation: u32,
}

#[derive(Clone, Copy, Debug)]
struct VacantLink {
    chunk_index: usize,
    block_index: usize,
}

enum Block<T> {
    Occupied { generation: u32, value: T },
    Vacant { generation: u32, next: Option<VacantLink> },
}

/// A fast, but limited allocator that only allocates a single type of object.
///
/// All objects inside the arena will be destroyed when the typed arena is destroyed. Objects can
/// be freed individually, and freed blocks are recycled through a free list. The underlying
/// container is a `Vec` of fixed-size chunks, so allocating never moves existing objects and no
/// unsafe code is needed.
///
/// # Examples
///
/// ```
/// use positional_trees::arena::TypedArena;
///
/// let mut arena = TypedArena::new(1024);
///
/// let x = arena.allocate(1);
/// assert_eq!(arena[x], 1);
///
/// arena[x] += 1;
/// assert_eq!(arena[x], 2);
///
/// assert_eq!(arena.free(&x), 2);
/// assert_eq!(arena.get(&x), None);
/// ```
pub struct TypedArena<T> {
    head: Option<VacantLink>,
    chunks: Vec<Vec<Block<T>>>,
    chunk_size: usize,
    size: usize,
    capacity: usize,
}

impl<T> TypedArena<T> {
    fn block(&self, slot: &Slot) -> Option<&Block<T>> {
        self.chunks
            .get(slot.chunk_index)
            .and_then(|chunk| chunk.get(slot.block_index))
    }

    /// Constructs a new, empty `TypedArena<T>` with a specific number of objects per chunk.
    ///
    /// # Panics
    ///
    /// Panics if `chunk_size` is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use positional_trees::arena::TypedArena;
    ///
    /// // creates a new TypedArena<T> that contains a maximum of 1024 u32's per chunk
    /// let arena: TypedArena<u32> = TypedArena::new(1024);
    /// ```
    pub fn new(chunk_size: usize) -> Self {
        assert!(chunk_size > 0, "Error: chunk size must be positive.");
        TypedArena {
            head: None,
            chunks: Vec::new(),
            chunk_size,
            size: 0,
            capacity: 0,
        }
    }

    /// Allocates an object in the typed arena and returns a `Slot`. The slot can later be used to
    /// retrieve mutable and immutable references to the object, and to deallocate the object.
    ///
    /// # Examples
    ///
    /// ```
    /// use positional_trees::arena::TypedArena;
    ///
    /// let mut arena = TypedArena::new(1024);
    /// let x = arena.allocate(0);
    /// ```
    pub fn allocate(&mut self, value: T) -> Slot {
        if self.size == self.capacity {
            self.chunks.push(Vec::with_capacity(self.chunk_size));
            self.capacity += self.chunk_size;
        }
        self.size += 1;

        match self.head.take() {
            None => {
                let chunk_count = self.chunks.len();
                let last_chunk = &mut self.chunks[chunk_count - 1];
                last_chunk.push(Block::Occupied {
                    generation: 0,
                    value,
                });
                Slot {
                    chunk_index: chunk_count - 1,
                    block_index: last_chunk.len() - 1,
                    generation: 0,
                }
            },
            Some(link) => {
                let block = &mut self.chunks[link.chunk_index][link.block_index];
                let (generation, next) = match *block {
                    Block::Vacant { generation, next } => (generation, next),
                    Block::Occupied { .. } => {
                        panic!("Error: free list points at an occupied block.")
                    },
                };
                *block = Block::Occupied { generation, value };
                self.head = next;
                Slot {
                    chunk_index: link.chunk_index,
                    block_index: link.block_index,
                    generation,
                }
            },
        }
    }

    /// Deallocates an object in the typed arena and returns the object. Every outstanding copy of
    /// `slot` is invalidated.
    ///
    /// # Panics
    ///
    /// Panics if `slot` corresponds to an invalid or vacant block.
    ///
    /// # Examples
    ///
    /// ```
    /// use positional_trees::arena::TypedArena;
    ///
    /// let mut arena = TypedArena::new(1024);
    /// let x = arena.allocate(0);
    /// assert_eq!(arena.free(&x), 0);
    /// ```
    pub fn free(&mut self, slot: &Slot) -> T {
        match self.block(slot) {
            Some(Block::Occupied { generation, .. }) if *generation == slot.generation => {},
            Some(_) => panic!("Error: attempting to free vacant block."),
            None => panic!("Error: attempting to free invalid block."),
        }
        let vacant = Block::Vacant {
            generation: slot.generation.wrapping_add(1),
            next: self.head.take(),
        };
        let old_block = mem::replace(&mut self.chunks[slot.chunk_index][slot.block_index], vacant);
        self.size -= 1;
        self.head = Some(VacantLink {
            chunk_index: slot.chunk_index,
            block_index: slot.block_index,
        });
        match old_block {
            Block::Occupied { value, .. } => value,
            Block::Vacant { .. } => unreachable!(),
        }
    }

    /// Returns an immutable reference to an object in the typed arena. Returns `None` if the slot
    /// does not correspond to a live object.
    ///
    /// # Examples
    ///
    /// ```
    /// use positional_trees::arena::TypedArena;
    ///
    /// let mut arena = TypedArena::new(1024);
    /// let x = arena.allocate(0);
    /// assert_eq!(arena.get(&x), Some(&0));
    /// ```
    pub fn get(&self, slot: &Slot) -> Option<&T> {
        match self.block(slot) {
            Some(Block::Occupied { generation, value }) if *generation == slot.generation => {
                Some(value)
            },
            _ => None,
        }
    }

    /// Returns a mutable reference to an object in the typed arena. Returns `None` if the slot
    /// does not correspond to a live object.
    ///
    /// # Examples
    ///
    /// ```
    /// use positional_trees::arena::TypedArena;
    ///
    /// let mut arena = TypedArena::new(1024);
    /// let x = arena.allocate(0);
    /// assert_eq!(arena.get_mut(&x), Some(&mut 0));
    /// ```
    pub fn get_mut(&mut self, slot: &Slot) -> Option<&mut T> {
        let block = self
            .chunks
            .get_mut(slot.chunk_index)
            .and_then(|chunk| chunk.get_mut(slot.block_index));
        match block {
            Some(Block::Occupied { generation, value }) if *generation == slot.generation => {
                Some(value)
            },
            _ => None,
        }
    }

    /// Returns the number of live objects in the arena.
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns `true` if the arena holds no live objects.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }
}

impl<T> Index<Slot> for TypedArena<T> {
    type Output = T;

    fn index(&self, slot: Slot) -> &Self::Output {
        self.get(&slot).expect("Error: slot out of bounds.")
    }
}

impl<T> IndexMut<Slot> for TypedArena<T> {
    fn index_mut(&mut self, slot: Slot) -> &mut Self::Output {
        self.get_mut(&slot).expect("Error: slot out of bounds.")
    }
}

#[cfg(test)]
mod tests {
    use super::Slot;
    use super::TypedArena;

    fn slot(chunk_index: usize, block_index: usize, generation: u32) -> Slot {
        Slot {
            chunk_index,
            block_index,
            generation,
        }
    }

    #[test]
    #[should_panic]
    fn test_free_invalid_block() {
        let mut arena: TypedArena<u32> = TypedArena::new(1024);
        arena.free(&slot(0, 0, 0));
    }

    #[test]
    #[should_panic]
    fn test_free_twice() {
        let mut arena = TypedArena::new(1024);
        let x = arena.allocate(0);
        arena.free(&x);
        arena.free(&x);
    }

    #[test]
    fn test_allocate_multiple_chunks() {
        let mut arena = TypedArena::new(2);
        assert_eq!(arena.allocate(0), slot(0, 0, 0));
        assert_eq!(arena.allocate(0), slot(0, 1, 0));
        assert_eq!(arena.allocate(0), slot(1, 0, 0));
        assert_eq!(arena.len(), 3);
    }

    #[test]
    fn test_reuse_bumps_generation() {
        let mut arena = TypedArena::new(1024);
        let x = arena.allocate(1);
        assert_eq!(arena.free(&x), 1);
        assert!(arena.is_empty());

        let y = arena.allocate(2);
        assert_eq!(y, slot(0, 0, 1));
        assert_eq!(arena.get(&x), None);
        assert_eq!(arena.get_mut(&x), None);
        assert_eq!(arena[y], 2);
    }

    #[test]
    fn test_get_vacant_block() {
        let mut arena = TypedArena::new(1024);
        arena.allocate(0);
        assert_eq!(arena.get(&slot(0, 1, 0)), None);
        assert_eq!(arena.get(&slot(3, 0, 0)), None);
    }

    #[test]
    fn test_get_mut() {
        let mut arena = TypedArena::new(1024);
        let x = arena.allocate(0);
        *arena.get_mut(&x).unwrap() = 1;
        assert_eq!(arena.get(&x), Some(&1));
    }
}
