//! A double-ended queue that stores its elements in fixed-size nodes.
//!
//! Most double-ended queues, such as the standard library's `VecDeque`, keep all of their
//! elements in a single ring buffer. When that buffer fills up, a bigger one is allocated and
//! every element is moved over. This crate instead keeps elements in many small, fixed-capacity
//! blocks of memory ("nodes"), and keeps track of those nodes in a separate array of node
//! pointers (the "map").
//!
//! Growing the deque at either end only ever allocates a single new node. The map does have to be
//! resized occasionally, but it holds one pointer per node rather than the elements themselves,
//! so even a resize of the map moves very little memory, and no element is ever moved by it.
//! Popping the last element out of a node frees that node right away.
//!
//! Here's how this compares to `VecDeque`:
//!
//!  - Pushes and pops at either end are amortized *O*(1), and never move existing elements.
//!  - Indexing is *O*(1), but slightly slower, since it has to find the right node first.
//!  - Inserting or removing in the middle is *O*(min(i, len - i)), like `VecDeque`.
//!  - Memory is released node by node as the deque shrinks.
//!  - The elements are never in one contiguous slice.
//!
//! Random access is also available through [`Cursor`], a position in the deque that can be moved
//! by any signed offset in constant time, compared, and subtracted from another cursor.
//!
//! Where memory comes from is up to the [`Allocator`] strategy the deque is created with; the
//! default, [`Global`], uses the global heap. Every operation that may allocate has a `try_`
//! variant that reports [`Error::OutOfMemory`] instead of panicking.

#![no_std]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

#[cfg(any(test, miri))]
pub(crate) const NODE_BYTES: usize = 64;
#[cfg(not(any(test, miri)))]
const NODE_BYTES: usize = 512;

const INITIAL_MAP_SIZE: usize = 8;

#[cfg(test)]
#[macro_use]
extern crate std;
#[cfg(all(feature = "std", not(test)))]
extern crate std;

extern crate alloc;

use core::cmp::{self, Ordering};
use core::fmt;
use core::hash::{Hash, Hasher};
use core::iter::repeat_with;
use core::marker::PhantomData;
use core::mem;
use core::ops::Bound::{Excluded, Included, Unbounded};
use core::ops::{Index, IndexMut, RangeBounds};
use core::ptr::{self, NonNull};

use alloc::vec::Vec;

mod allocator;
mod cursor;
mod error;
mod external_trait_impls;
mod iter;

pub use allocator::{Allocator, Global, Slot};
pub use cursor::Cursor;
pub use error::{Error, Result};

use cursor::Pos;

/// Iterator and cursor types for [`Deque`].
pub mod deque {
    pub use super::cursor::Cursor;
    pub use super::iter::*;
}

/// Parallel iterator types for [`Deque`].
#[cfg(feature = "rayon")]
pub mod rayon {
    pub use super::external_trait_impls::rayon::*;
}

/// Number of elements of a type of the given size that fit in one node.
const fn node_capacity(size: usize) -> usize {
    if size == 0 {
        NODE_BYTES
    } else if size < NODE_BYTES {
        NODE_BYTES / size
    } else {
        1
    }
}

#[cold]
#[inline(never)]
fn handle_error(error: Error) -> ! {
    panic!("{}", error);
}

/// A double-ended queue backed by fixed-size nodes.
///
/// See the [crate-level documentation] for details.
///
/// [crate-level documentation]: index.html
pub struct Deque<T, A: Allocator = Global> {
    // Slots `start.node..=finish.node` of the map hold the active nodes. Every active node other
    // than the first and the last is full. `finish` always points into an allocated node, which is
    // why pushing the last free slot of the back node already allocates the next one.
    map: NonNull<Slot<T>>,
    map_size: usize,
    start: Pos,
    finish: Pos,
    alloc: A,
    marker: PhantomData<T>,
}

unsafe impl<T: Send, A: Allocator + Send> Send for Deque<T, A> {}
unsafe impl<T: Sync, A: Allocator + Sync> Sync for Deque<T, A> {}

impl<T: Clone, A: Allocator + Clone> Clone for Deque<T, A> {
    fn clone(&self) -> Self {
        let mut deque = Self::new_in(self.alloc.clone());
        deque.extend(self.iter().cloned());
        deque
    }

    fn clone_from(&mut self, other: &Self) {
        self.assign_iter(other.iter().cloned());
    }
}

impl<T> Default for Deque<T> {
    /// Creates an empty `Deque<T>`.
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Deque<T> {
    /// Creates an empty `Deque`.
    ///
    /// This allocates the map and a single node.
    ///
    /// # Panics
    ///
    /// Panics if the allocation fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use chunkdeque::Deque;
    ///
    /// let deque: Deque<u32> = Deque::new();
    /// assert!(deque.is_empty());
    /// ```
    pub fn new() -> Self {
        Self::new_in(Global)
    }

    /// Creates an empty `Deque`, or reports why it could not be allocated.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfMemory`] if the map or the first node cannot be allocated.
    pub fn try_new() -> Result<Self> {
        Self::try_new_in(Global)
    }
}

impl<T, A: Allocator> Deque<T, A> {
    pub(crate) const BUF: usize = node_capacity(mem::size_of::<T>());

    /// Creates an empty `Deque` that allocates through `alloc`.
    ///
    /// # Panics
    ///
    /// Panics if the allocation fails.
    pub fn new_in(alloc: A) -> Self {
        match Self::try_new_in(alloc) {
            Ok(deque) => deque,
            Err(e) => handle_error(e),
        }
    }

    /// Creates an empty `Deque` that allocates through `alloc`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfMemory`] if the map or the first node cannot be allocated. Nothing is
    /// leaked in that case.
    pub fn try_new_in(alloc: A) -> Result<Self> {
        let map_size = INITIAL_MAP_SIZE;
        let map = alloc.allocate_map::<T>(map_size)?;
        unsafe {
            for i in 0..map_size {
                map.as_ptr().add(i).write(None);
            }
        }

        let first = (map_size - 1) / 2;
        match alloc.allocate_node::<T>(Self::BUF) {
            Ok(node) => unsafe { map.as_ptr().add(first).write(Some(node)) },
            Err(e) => {
                unsafe { alloc.deallocate_map(map, map_size) };
                return Err(e);
            }
        }

        let pos = Pos {
            node: first,
            cur: 0,
        };
        Ok(Self {
            map,
            map_size,
            start: pos,
            finish: pos,
            alloc,
            marker: PhantomData,
        })
    }

    /// Returns a reference to the underlying allocation strategy.
    #[inline]
    pub fn allocator(&self) -> &A {
        &self.alloc
    }

    /// Returns how many elements fit in a single node.
    ///
    /// # Examples
    ///
    /// ```
    /// use chunkdeque::Deque;
    ///
    /// assert_eq!(Deque::<u32>::new().buffer_size(), 128);
    /// assert_eq!(Deque::<[u8; 4096]>::new().buffer_size(), 1);
    /// ```
    #[inline]
    pub fn buffer_size(&self) -> usize {
        Self::BUF
    }

    /// Returns the number of nodes the deque currently holds.
    ///
    /// An empty deque holds one node.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.finish.node - self.start.node + 1
    }

    /// Returns the number of node slots in the map, used or not.
    #[inline]
    pub fn map_size(&self) -> usize {
        self.map_size
    }

    /// Returns the number of elements in the `Deque`.
    ///
    /// # Examples
    ///
    /// ```
    /// use chunkdeque::Deque;
    ///
    /// let mut v = Deque::new();
    /// assert_eq!(v.len(), 0);
    /// v.push_back(1);
    /// assert_eq!(v.len(), 1);
    /// ```
    #[inline]
    pub fn len(&self) -> usize {
        self.finish.distance(self.start, Self::BUF) as usize
    }

    /// Returns `true` if the `Deque` is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use chunkdeque::Deque;
    ///
    /// let mut v = Deque::new();
    /// assert!(v.is_empty());
    /// v.push_front(1);
    /// assert!(!v.is_empty());
    /// ```
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.finish
    }

    /// Returns the largest number of elements a `Deque<T>` could theoretically hold.
    #[inline]
    pub fn max_size(&self) -> usize {
        isize::MAX as usize / cmp::max(mem::size_of::<T>(), 1)
    }

    #[inline]
    unsafe fn slot(&self, node: usize) -> Slot<T> {
        debug_assert!(node < self.map_size);
        *self.map.as_ptr().add(node)
    }

    #[inline]
    unsafe fn set_slot(&mut self, node: usize, slot: Slot<T>) {
        debug_assert!(node < self.map_size);
        self.map.as_ptr().add(node).write(slot);
    }

    #[inline]
    unsafe fn ptr(&self, pos: Pos) -> *mut T {
        pos.ptr(self.map)
    }

    #[inline]
    fn pos_at(&self, index: usize) -> Pos {
        self.start.offset(index as isize, Self::BUF)
    }

    #[inline]
    pub(crate) fn get_at(&self, pos: Pos) -> Option<&T> {
        if self.start <= pos && pos < self.finish {
            Some(unsafe { &*self.ptr(pos) })
        } else {
            None
        }
    }

    /// Provides a reference to the element at the given index.
    ///
    /// Element at index 0 is the front of the queue.
    ///
    /// # Examples
    ///
    /// ```
    /// use chunkdeque::Deque;
    ///
    /// let mut buf = Deque::new();
    /// buf.push_back(3);
    /// buf.push_back(4);
    /// buf.push_back(5);
    /// assert_eq!(buf.get(1), Some(&4));
    /// assert_eq!(buf.get(3), None);
    /// ```
    pub fn get(&self, index: usize) -> Option<&T> {
        if index < self.len() {
            Some(unsafe { self.get_unchecked(index) })
        } else {
            None
        }
    }

    /// Provides a mutable reference to the element at the given index.
    ///
    /// Element at index 0 is the front of the queue.
    ///
    /// # Examples
    ///
    /// ```
    /// use chunkdeque::Deque;
    ///
    /// let mut buf = Deque::new();
    /// buf.push_back(3);
    /// buf.push_back(4);
    /// buf.push_back(5);
    /// if let Some(elem) = buf.get_mut(1) {
    ///     *elem = 7;
    /// }
    ///
    /// assert_eq!(buf[1], 7);
    /// ```
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        if index < self.len() {
            Some(unsafe { self.get_unchecked_mut(index) })
        } else {
            None
        }
    }

    /// Returns a reference to the element at `index`, without bounds checking.
    ///
    /// # Safety
    ///
    /// `index` must be less than `self.len()`.
    #[inline]
    pub unsafe fn get_unchecked(&self, index: usize) -> &T {
        &*self.ptr(self.pos_at(index))
    }

    /// Returns a mutable reference to the element at `index`, without bounds checking.
    ///
    /// # Safety
    ///
    /// `index` must be less than `self.len()`.
    #[inline]
    pub unsafe fn get_unchecked_mut(&mut self, index: usize) -> &mut T {
        &mut *self.ptr(self.pos_at(index))
    }

    /// Provides a reference to the element at the given index, or an error describing why there
    /// is none.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] if `index >= self.len()`.
    ///
    /// # Examples
    ///
    /// ```
    /// use chunkdeque::{Deque, Error};
    ///
    /// let buf: Deque<_> = (0..3).collect();
    /// assert_eq!(buf.at(2), Ok(&2));
    /// assert_eq!(buf.at(3), Err(Error::IndexOutOfRange { index: 3, len: 3 }));
    /// ```
    pub fn at(&self, index: usize) -> Result<&T> {
        let len = self.len();
        self.get(index).ok_or(Error::IndexOutOfRange { index, len })
    }

    /// Provides a mutable reference to the element at the given index, or an error describing why
    /// there is none.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] if `index >= self.len()`.
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T> {
        let len = self.len();
        self.get_mut(index).ok_or(Error::IndexOutOfRange { index, len })
    }

    /// Provides a reference to the front element, or `None` if the `Deque` is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use chunkdeque::Deque;
    ///
    /// let mut d = Deque::new();
    /// assert_eq!(d.front(), None);
    ///
    /// d.push_back(1);
    /// d.push_back(2);
    /// assert_eq!(d.front(), Some(&1));
    /// ```
    pub fn front(&self) -> Option<&T> {
        self.get_at(self.start)
    }

    /// Provides a mutable reference to the front element, or `None` if the `Deque` is empty.
    pub fn front_mut(&mut self) -> Option<&mut T> {
        if self.is_empty() {
            None
        } else {
            Some(unsafe { &mut *self.ptr(self.start) })
        }
    }

    /// Provides a reference to the back element, or `None` if the `Deque` is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use chunkdeque::Deque;
    ///
    /// let mut d = Deque::new();
    /// assert_eq!(d.back(), None);
    ///
    /// d.push_back(1);
    /// d.push_back(2);
    /// assert_eq!(d.back(), Some(&2));
    /// ```
    pub fn back(&self) -> Option<&T> {
        if self.is_empty() {
            return None;
        }
        let mut last = self.finish;
        last.dec(Self::BUF);
        Some(unsafe { &*self.ptr(last) })
    }

    /// Provides a mutable reference to the back element, or `None` if the `Deque` is empty.
    pub fn back_mut(&mut self) -> Option<&mut T> {
        if self.is_empty() {
            return None;
        }
        let mut last = self.finish;
        last.dec(Self::BUF);
        Some(unsafe { &mut *self.ptr(last) })
    }

    /// Returns a cursor at the front element (or at [`end`](Deque::end) if the deque is empty).
    #[inline]
    pub fn begin(&self) -> Cursor<'_, T, A> {
        Cursor::new(self, self.start)
    }

    /// Returns a cursor one past the back element.
    #[inline]
    pub fn end(&self) -> Cursor<'_, T, A> {
        Cursor::new(self, self.finish)
    }

    /// Returns a cursor at the given index.
    ///
    /// The cursor may be past the end of the deque, in which case it points at nothing.
    ///
    /// # Examples
    ///
    /// ```
    /// use chunkdeque::Deque;
    ///
    /// let buf: Deque<_> = (0..10).collect();
    /// let it = buf.cursor(4);
    /// assert_eq!(it.get(), Some(&4));
    /// assert_eq!(it - buf.begin(), 4);
    /// ```
    #[inline]
    pub fn cursor(&self, index: usize) -> Cursor<'_, T, A> {
        Cursor::new(self, self.pos_at(index))
    }

    /// Returns a front-to-back iterator.
    ///
    /// # Examples
    ///
    /// ```
    /// use chunkdeque::Deque;
    ///
    /// let mut buf = Deque::new();
    /// buf.push_back(5);
    /// buf.push_back(3);
    /// buf.push_back(4);
    /// let b: &[_] = &[&5, &3, &4];
    /// let c: Vec<&i32> = buf.iter().collect();
    /// assert_eq!(&c[..], b);
    /// ```
    pub fn iter(&self) -> iter::Iter<'_, T> {
        iter::Iter::new(self)
    }

    /// Returns a front-to-back iterator that returns mutable references.
    ///
    /// # Examples
    ///
    /// ```
    /// use chunkdeque::Deque;
    ///
    /// let mut buf = Deque::new();
    /// buf.push_back(5);
    /// buf.push_back(3);
    /// buf.push_back(4);
    /// for num in buf.iter_mut() {
    ///     *num = *num - 2;
    /// }
    /// let b: &[_] = &[&mut 3, &mut 1, &mut 2];
    /// assert_eq!(&buf.iter_mut().collect::<Vec<&mut i32>>()[..], b);
    /// ```
    pub fn iter_mut(&mut self) -> iter::IterMut<'_, T> {
        iter::IterMut::new(self)
    }

    /// Returns `true` if the `Deque` contains an element equal to the
    /// given value.
    ///
    /// # Examples
    ///
    /// ```
    /// use chunkdeque::Deque;
    ///
    /// let mut deque: Deque<u32> = Deque::new();
    ///
    /// deque.push_back(0);
    /// deque.push_back(1);
    ///
    /// assert_eq!(deque.contains(&1), true);
    /// assert_eq!(deque.contains(&10), false);
    /// ```
    pub fn contains(&self, x: &T) -> bool
    where
        T: PartialEq<T>,
    {
        self.iter().any(|e| e == x)
    }

    /// Appends an element to the back of the `Deque`.
    ///
    /// # Panics
    ///
    /// Panics if a new node is needed and cannot be allocated.
    ///
    /// # Examples
    ///
    /// ```
    /// use chunkdeque::Deque;
    ///
    /// let mut buf = Deque::new();
    /// buf.push_back(1);
    /// buf.push_back(3);
    /// assert_eq!(3, *buf.back().unwrap());
    /// ```
    pub fn push_back(&mut self, value: T) {
        if let Err(e) = self.try_push_back(value) {
            handle_error(e);
        }
    }

    /// Appends an element to the back of the `Deque`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfMemory`] if a new node is needed and cannot be allocated. The deque
    /// is left exactly as it was, and `value` is dropped.
    pub fn try_push_back(&mut self, value: T) -> Result<()> {
        if self.finish.cur + 1 < Self::BUF {
            unsafe { self.ptr(self.finish).write(value) };
            self.finish.cur += 1;
        } else {
            self.ensure_node_at_back()?;
            unsafe { self.ptr(self.finish).write(value) };
            self.finish = Pos {
                node: self.finish.node + 1,
                cur: 0,
            };
        }
        Ok(())
    }

    /// Prepends an element to the front of the `Deque`.
    ///
    /// # Panics
    ///
    /// Panics if a new node is needed and cannot be allocated.
    ///
    /// # Examples
    ///
    /// ```
    /// use chunkdeque::Deque;
    ///
    /// let mut d = Deque::new();
    /// d.push_front(1);
    /// d.push_front(2);
    /// assert_eq!(d.front(), Some(&2));
    /// ```
    pub fn push_front(&mut self, value: T) {
        if let Err(e) = self.try_push_front(value) {
            handle_error(e);
        }
    }

    /// Prepends an element to the front of the `Deque`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfMemory`] if a new node is needed and cannot be allocated. The deque
    /// is left exactly as it was, and `value` is dropped.
    pub fn try_push_front(&mut self, value: T) -> Result<()> {
        if self.start.cur > 0 {
            self.start.cur -= 1;
        } else {
            self.ensure_node_at_front()?;
            self.start = Pos {
                node: self.start.node - 1,
                cur: Self::BUF - 1,
            };
        }
        unsafe { self.ptr(self.start).write(value) };
        Ok(())
    }

    /// Removes the last element from the `Deque` and returns it, or `None` if
    /// it is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use chunkdeque::Deque;
    ///
    /// let mut buf = Deque::new();
    /// assert_eq!(buf.pop_back(), None);
    /// buf.push_back(1);
    /// buf.push_back(3);
    /// assert_eq!(buf.pop_back(), Some(3));
    /// ```
    pub fn pop_back(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        if self.finish.cur > 0 {
            self.finish.cur -= 1;
        } else {
            // the back node is empty, and the element lives at the end of the one before it
            unsafe { self.release_node(self.finish.node) };
            self.finish = Pos {
                node: self.finish.node - 1,
                cur: Self::BUF - 1,
            };
        }
        Some(unsafe { self.ptr(self.finish).read() })
    }

    /// Removes the first element and returns it, or `None` if the `Deque` is
    /// empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use chunkdeque::Deque;
    ///
    /// let mut d = Deque::new();
    /// d.push_back(1);
    /// d.push_back(2);
    ///
    /// assert_eq!(d.pop_front(), Some(1));
    /// assert_eq!(d.pop_front(), Some(2));
    /// assert_eq!(d.pop_front(), None);
    /// ```
    pub fn pop_front(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        let value = unsafe { self.ptr(self.start).read() };
        if self.start.cur + 1 < Self::BUF {
            self.start.cur += 1;
        } else {
            // non-empty, so finish is in a later node
            unsafe { self.release_node(self.start.node) };
            self.start = Pos {
                node: self.start.node + 1,
                cur: 0,
            };
        }
        Some(value)
    }

    /// Inserts an element at `index` within the `Deque`, shifting all elements with indices
    /// greater than or equal to `index` towards the back.
    ///
    /// Whichever end is closer to `index` is the one that moves.
    ///
    /// # Panics
    ///
    /// Panics if `index` is greater than the `Deque`'s length, or if allocation fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use chunkdeque::Deque;
    ///
    /// let mut deque = Deque::new();
    /// deque.push_back('a');
    /// deque.push_back('b');
    /// deque.push_back('c');
    /// assert_eq!(deque, vec!['a', 'b', 'c']);
    ///
    /// deque.insert(1, 'd');
    /// assert_eq!(deque, vec!['a', 'd', 'b', 'c']);
    /// ```
    pub fn insert(&mut self, index: usize, value: T) {
        if let Err(e) = self.try_insert(index, value) {
            handle_error(e);
        }
    }

    /// Inserts an element at `index` within the `Deque`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfMemory`] if a node cannot be allocated, in which case the deque is
    /// left unchanged.
    ///
    /// # Panics
    ///
    /// Panics if `index` is greater than the `Deque`'s length.
    pub fn try_insert(&mut self, index: usize, value: T) -> Result<()> {
        if index == 0 {
            self.try_push_front(value)
        } else if index == self.len() {
            self.try_push_back(value)
        } else {
            self.try_insert_iter(index, core::iter::once(value))
        }
    }

    /// Inserts `n` clones of `value` at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is greater than the `Deque`'s length, or if allocation fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use chunkdeque::Deque;
    ///
    /// let mut buf: Deque<_> = vec![1, 2, 3].into();
    /// buf.insert_n(1, 3, &0);
    /// assert_eq!(buf, vec![1, 0, 0, 0, 2, 3]);
    /// ```
    pub fn insert_n(&mut self, index: usize, n: usize, value: &T)
    where
        T: Clone,
    {
        if let Err(e) = self.try_insert_n(index, n, value) {
            handle_error(e);
        }
    }

    /// Inserts `n` clones of `value` at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfMemory`] if the nodes for the new elements cannot be allocated. The
    /// deque is left unchanged.
    ///
    /// # Panics
    ///
    /// Panics if `index` is greater than the `Deque`'s length.
    pub fn try_insert_n(&mut self, index: usize, n: usize, value: &T) -> Result<()>
    where
        T: Clone,
    {
        self.try_insert_iter(index, core::iter::repeat(value).take(n).cloned())
    }

    /// Inserts the elements yielded by `iter` at `index`, in order.
    ///
    /// # Panics
    ///
    /// Panics if `index` is greater than the `Deque`'s length, or if allocation fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use chunkdeque::Deque;
    ///
    /// let mut buf: Deque<_> = vec![1, 2, 3].into();
    /// buf.insert_iter(2, 10..13);
    /// assert_eq!(buf, vec![1, 2, 10, 11, 12, 3]);
    /// ```
    pub fn insert_iter<I>(&mut self, index: usize, iter: I)
    where
        I: IntoIterator<Item = T>,
    {
        if let Err(e) = self.try_insert_iter(index, iter) {
            handle_error(e);
        }
    }

    /// Inserts the elements yielded by `iter` at `index`, in order.
    ///
    /// The new elements are first pushed at whichever end of the deque is closer to `index`, and
    /// then swapped into place, so this runs in *O*(min(index, len - index) + n).
    ///
    /// If `iter` panics, or an allocation fails part way through, the elements inserted so far
    /// are removed again and the deque is left as it was.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfMemory`] if a node or the map cannot be allocated.
    ///
    /// # Panics
    ///
    /// Panics if `index` is greater than the `Deque`'s length.
    pub fn try_insert_iter<I>(&mut self, index: usize, iter: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
    {
        let len = self.len();
        if index > len {
            insert_failed(index, len);
        }

        let iter = iter.into_iter();
        let hint = iter.size_hint().0;
        if index >= len - index {
            let reserved = self.reserve_back(hint)?;
            let mut guard = Rollback {
                deque: self,
                len,
                at_front: false,
                reserved,
            };
            for value in iter {
                guard.deque.try_push_back(value)?;
            }
            let added = guard.deque.len() - len;
            guard.len = len + added;

            // [index, len) followed by the new elements becomes the new elements followed by
            // [index, len)
            if index < len && added > 0 {
                guard.deque.reverse_range(index, len);
                guard.deque.reverse_range(len, len + added);
                guard.deque.reverse_range(index, len + added);
            }
        } else {
            let reserved = self.reserve_front(hint)?;
            let mut guard = Rollback {
                deque: self,
                len,
                at_front: true,
                reserved,
            };
            for value in iter {
                guard.deque.try_push_front(value)?;
            }
            let added = guard.deque.len() - len;
            guard.len = len + added;

            // the new elements sit in reverse in front of the first `index` elements
            if added > 0 {
                guard.deque.reverse_range(added, added + index);
                guard.deque.reverse_range(0, added + index);
            }
        }
        Ok(())
    }

    /// Removes and returns the element at `index` from the `Deque`.
    /// Whichever end is closer to the removal point will be moved to make
    /// room, and all the affected elements will be moved to new positions.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    ///
    /// # Examples
    ///
    /// ```
    /// use chunkdeque::Deque;
    ///
    /// let mut buf = Deque::new();
    /// buf.push_back(1);
    /// buf.push_back(2);
    /// buf.push_back(3);
    /// assert_eq!(buf, vec![1, 2, 3]);
    ///
    /// assert_eq!(buf.erase(1), 2);
    /// assert_eq!(buf, vec![1, 3]);
    /// ```
    pub fn erase(&mut self, index: usize) -> T {
        let len = self.len();
        if index >= len {
            erase_failed(index, len);
        }

        let removed = if index < len / 2 {
            self.shift_front_over(index, index + 1);
            self.pop_front()
        } else {
            self.shift_back_over(index, index + 1);
            self.pop_back()
        };
        // len > index, so the deque was not empty
        removed.unwrap_or_else(|| unsafe { core::hint::unreachable_unchecked() })
    }

    /// Removes the elements in `range` from the `Deque`.
    ///
    /// The shorter of the two surrounding runs of elements is moved over the gap, so this runs
    /// in *O*(min(start, len - end) + (end - start)).
    ///
    /// # Panics
    ///
    /// Panics if the starting point is greater than the end point or if
    /// the end point is greater than the length of the deque.
    ///
    /// # Examples
    ///
    /// ```
    /// use chunkdeque::Deque;
    ///
    /// let mut v: Deque<_> = (0..10).collect();
    /// v.erase_range(2..5);
    /// assert_eq!(v, vec![0, 1, 5, 6, 7, 8, 9]);
    ///
    /// // A full range clears all contents
    /// v.erase_range(..);
    /// assert!(v.is_empty());
    /// ```
    pub fn erase_range<R>(&mut self, range: R)
    where
        R: RangeBounds<usize>,
    {
        let (first, last) = self.range_start_end(range);
        let n = last - first;
        if n == 0 {
            return;
        }
        if n == self.len() {
            self.clear();
            return;
        }

        let elems_after = self.len() - last;
        if first < elems_after {
            self.shift_front_over(first, last);
            for _ in 0..n {
                self.pop_front();
            }
        } else {
            self.shift_back_over(first, last);
            for _ in 0..n {
                self.pop_back();
            }
        }
    }

    /// Shortens the `Deque`, keeping the first `len` elements and dropping
    /// the rest.
    ///
    /// If `len` is greater than the `Deque`'s current length, this has no
    /// effect.
    ///
    /// # Examples
    ///
    /// ```
    /// use chunkdeque::Deque;
    ///
    /// let mut buf = Deque::new();
    /// buf.push_back(5);
    /// buf.push_back(10);
    /// buf.push_back(15);
    /// assert_eq!(buf, vec![5, 10, 15]);
    /// buf.truncate(1);
    /// assert_eq!(buf, vec![5]);
    /// ```
    pub fn truncate(&mut self, len: usize) {
        while self.len() > len {
            self.pop_back();
        }
    }

    /// Clears the `Deque`, removing all values.
    ///
    /// Every node but one is freed, which leaves the deque just like a newly created one.
    ///
    /// # Examples
    ///
    /// ```
    /// use chunkdeque::Deque;
    ///
    /// let mut v = Deque::new();
    /// v.push_back(1);
    /// v.clear();
    /// assert!(v.is_empty());
    /// assert_eq!(v.node_count(), 1);
    /// ```
    pub fn clear(&mut self) {
        self.truncate(0);
        self.start.cur = 0;
        self.finish = self.start;
    }

    /// Retains only the elements specified by the predicate.
    ///
    /// In other words, remove all elements `e` such that `f(&e)` returns false.
    /// This method operates in place, visiting each element exactly once in the
    /// original order, and preserves the order of the retained elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use chunkdeque::Deque;
    ///
    /// let mut buf = Deque::new();
    /// buf.extend(1..5);
    /// buf.retain(|&x| x % 2 == 0);
    /// assert_eq!(buf, vec![2, 4]);
    /// ```
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(&T) -> bool,
    {
        let len = self.len();
        let mut kept = 0;
        let mut write = self.start;
        let mut read = self.start;
        for _ in 0..len {
            if f(unsafe { &*self.ptr(read) }) {
                if write != read {
                    unsafe { ptr::swap(self.ptr(write), self.ptr(read)) };
                }
                write.inc(Self::BUF);
                kept += 1;
            }
            read.inc(Self::BUF);
        }
        self.truncate(kept);
    }

    /// Replaces the contents of the `Deque` with the elements yielded by `iter`.
    ///
    /// Existing elements are overwritten in place for as long as both the deque and `iter` have
    /// elements; the remainder is then appended or truncated.
    ///
    /// # Panics
    ///
    /// Panics if allocation fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use chunkdeque::Deque;
    ///
    /// let mut buf: Deque<_> = (0..5).collect();
    /// buf.assign_iter(10..13);
    /// assert_eq!(buf, vec![10, 11, 12]);
    /// buf.assign_iter(0..6);
    /// assert_eq!(buf, vec![0, 1, 2, 3, 4, 5]);
    /// ```
    pub fn assign_iter<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = T>,
    {
        if let Err(e) = self.try_assign_iter(iter) {
            handle_error(e);
        }
    }

    /// Replaces the contents of the `Deque` with the elements yielded by `iter`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfMemory`] if the deque has to grow and a node cannot be allocated.
    /// The elements assigned in place up to that point stay assigned.
    pub fn try_assign_iter<I>(&mut self, iter: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
    {
        let mut iter = iter.into_iter();
        let mut assigned = 0;
        for slot in self.iter_mut() {
            match iter.next() {
                Some(value) => *slot = value,
                None => break,
            }
            assigned += 1;
        }

        if assigned < self.len() {
            self.truncate(assigned);
            Ok(())
        } else {
            self.try_insert_iter(assigned, iter)
        }
    }

    /// Modifies the `Deque` in-place so that `len()` is equal to `new_len`,
    /// either by removing excess elements from the back or by appending
    /// elements generated by calling `generator` to the back.
    ///
    /// # Panics
    ///
    /// Panics if allocation fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use chunkdeque::Deque;
    ///
    /// let mut buf = Deque::new();
    /// buf.push_back(5);
    /// buf.push_back(10);
    /// buf.push_back(15);
    /// assert_eq!(buf, vec![5, 10, 15]);
    ///
    /// buf.resize_with(5, Default::default);
    /// assert_eq!(buf, vec![5, 10, 15, 0, 0]);
    ///
    /// buf.resize_with(2, || unreachable!());
    /// assert_eq!(buf, vec![5, 10]);
    ///
    /// let mut state = 100;
    /// buf.resize_with(5, || { state += 1; state });
    /// assert_eq!(buf, vec![5, 10, 101, 102, 103]);
    /// ```
    pub fn resize_with(&mut self, new_len: usize, generator: impl FnMut() -> T) {
        if let Err(e) = self.try_resize_with(new_len, generator) {
            handle_error(e);
        }
    }

    /// Modifies the `Deque` in-place so that `len()` is equal to `new_len`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfMemory`] if the deque has to grow and the nodes for the new elements
    /// cannot be allocated. The deque is left unchanged in that case.
    pub fn try_resize_with(
        &mut self,
        new_len: usize,
        generator: impl FnMut() -> T,
    ) -> Result<()> {
        let len = self.len();

        if new_len > len {
            self.try_insert_iter(len, repeat_with(generator).take(new_len - len))
        } else {
            self.truncate(new_len);
            Ok(())
        }
    }

    /// Modifies the `Deque` in-place so that `len()` is equal to `new_len`, filling any new slots
    /// with `T::default()`.
    ///
    /// # Examples
    ///
    /// ```
    /// use chunkdeque::Deque;
    ///
    /// let mut buf: Deque<u8> = Deque::new();
    /// buf.resize_default(3);
    /// assert_eq!(buf, vec![0, 0, 0]);
    /// ```
    pub fn resize_default(&mut self, new_len: usize)
    where
        T: Default,
    {
        self.resize_with(new_len, T::default);
    }

    /// Exchanges the contents of two deques.
    ///
    /// Only the maps, the boundary positions and the allocators change hands; no element is
    /// moved, cloned or dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use chunkdeque::Deque;
    ///
    /// let mut a: Deque<_> = vec![1, 2, 3].into();
    /// let mut b: Deque<_> = vec![9, 8].into();
    /// a.swap(&mut b);
    /// assert_eq!(a, vec![9, 8]);
    /// assert_eq!(b, vec![1, 2, 3]);
    /// ```
    #[inline]
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(self, other);
    }

    fn range_start_end<R>(&self, range: R) -> (usize, usize)
    where
        R: RangeBounds<usize>,
    {
        let len = self.len();
        let start = match range.start_bound() {
            Included(&n) => n,
            Excluded(&n) => n + 1,
            Unbounded => 0,
        };
        let end = match range.end_bound() {
            Included(&n) => n + 1,
            Excluded(&n) => n,
            Unbounded => len,
        };
        assert!(start <= end, "lower bound was too large");
        assert!(end <= len, "upper bound was too large");
        (start, end)
    }

    fn reverse_range(&mut self, lo: usize, hi: usize) {
        let mut front = self.pos_at(lo);
        let mut back = self.pos_at(hi);
        for _ in 0..(hi - lo) / 2 {
            back.dec(Self::BUF);
            unsafe { ptr::swap(self.ptr(front), self.ptr(back)) };
            front.inc(Self::BUF);
        }
    }

    // Moves [0, first) back over [first, last), leaving the elements of [first, last) at the front
    // of the deque.
    fn shift_front_over(&mut self, first: usize, last: usize) {
        let mut src = self.pos_at(first);
        let mut dst = self.pos_at(last);
        for _ in 0..first {
            src.dec(Self::BUF);
            dst.dec(Self::BUF);
            unsafe { ptr::swap(self.ptr(src), self.ptr(dst)) };
        }
    }

    // Moves [last, len) forward over [first, last), leaving the elements of [first, last) at the
    // back of the deque.
    fn shift_back_over(&mut self, first: usize, last: usize) {
        let mut dst = self.pos_at(first);
        let mut src = self.pos_at(last);
        for _ in last..self.len() {
            unsafe { ptr::swap(self.ptr(src), self.ptr(dst)) };
            src.inc(Self::BUF);
            dst.inc(Self::BUF);
        }
    }
}

impl<T: Clone, A: Allocator> Deque<T, A> {
    /// Modifies the `Deque` in-place so that `len()` is equal to new_len,
    /// either by removing excess elements from the back or by appending clones of `value`
    /// to the back.
    ///
    /// # Panics
    ///
    /// Panics if allocation fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use chunkdeque::Deque;
    ///
    /// let mut buf = Deque::new();
    /// buf.push_back(5);
    /// buf.push_back(10);
    /// buf.push_back(15);
    /// assert_eq!(buf, vec![5, 10, 15]);
    ///
    /// buf.resize(2, 0);
    /// assert_eq!(buf, vec![5, 10]);
    ///
    /// buf.resize(5, 20);
    /// assert_eq!(buf, vec![5, 10, 20, 20, 20]);
    /// ```
    pub fn resize(&mut self, new_len: usize, value: T) {
        let len = self.len();
        if new_len > len {
            self.insert_n(len, new_len - len, &value);
        } else {
            self.truncate(new_len);
        }
    }

    /// Replaces the contents of the `Deque` with `n` clones of `value`.
    ///
    /// # Panics
    ///
    /// Panics if allocation fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use chunkdeque::Deque;
    ///
    /// let mut buf: Deque<_> = (0..5).collect();
    /// buf.assign_n(2, &7);
    /// assert_eq!(buf, vec![7, 7]);
    /// ```
    pub fn assign_n(&mut self, n: usize, value: &T) {
        if let Err(e) = self.try_assign_n(n, value) {
            handle_error(e);
        }
    }

    /// Replaces the contents of the `Deque` with `n` clones of `value`.
    ///
    /// Existing elements are overwritten with [`Clone::clone_from`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfMemory`] if the deque has to grow and the nodes for the new elements
    /// cannot be allocated.
    pub fn try_assign_n(&mut self, n: usize, value: &T) -> Result<()> {
        let len = self.len();
        for slot in self.iter_mut().take(n) {
            slot.clone_from(value);
        }
        if n > len {
            self.try_insert_n(len, n - len, value)
        } else {
            self.truncate(n);
            Ok(())
        }
    }
}

////////////////////////////////////////////////////////////////////////////////
// Node and map management
////////////////////////////////////////////////////////////////////////////////

impl<T, A: Allocator> Deque<T, A> {
    unsafe fn release_node(&mut self, node: usize) {
        if let Some(ptr) = self.slot(node) {
            self.set_slot(node, None);
            self.alloc.deallocate_node(ptr, Self::BUF);
        }
    }

    // Frees nodes reserved past the back node, up to and including slot `hi`.
    unsafe fn release_back(&mut self, hi: usize) {
        let hi = cmp::min(hi, self.map_size - 1);
        for node in self.finish.node + 1..=hi {
            self.release_node(node);
        }
    }

    // Frees nodes reserved before the front node, starting at slot `lo`.
    unsafe fn release_front(&mut self, lo: usize) {
        for node in lo..self.start.node {
            self.release_node(node);
        }
    }

    fn ensure_node_at_back(&mut self) -> Result<()> {
        let next = self.finish.node + 1;
        if next < self.map_size && unsafe { self.slot(next) }.is_some() {
            return Ok(());
        }
        self.reserve_map_at_back(1)?;
        let node = self.alloc.allocate_node::<T>(Self::BUF)?;
        unsafe { self.set_slot(self.finish.node + 1, Some(node)) };
        Ok(())
    }

    fn ensure_node_at_front(&mut self) -> Result<()> {
        if self.start.node > 0 && unsafe { self.slot(self.start.node - 1) }.is_some() {
            return Ok(());
        }
        self.reserve_map_at_front(1)?;
        let node = self.alloc.allocate_node::<T>(Self::BUF)?;
        unsafe { self.set_slot(self.start.node - 1, Some(node)) };
        Ok(())
    }

    /// Allocates enough nodes past the back node to push `n` elements without allocating, and
    /// returns the outermost map slot that now holds a node.
    fn reserve_back(&mut self, n: usize) -> Result<usize> {
        let vacancies = Self::BUF - self.finish.cur - 1;
        if n <= vacancies {
            return Ok(self.finish.node);
        }

        let new_nodes = (n - vacancies).div_ceil(Self::BUF);
        self.reserve_map_at_back(new_nodes)?;
        for i in 1..=new_nodes {
            let node = self.finish.node + i;
            if unsafe { self.slot(node) }.is_some() {
                continue;
            }
            match self.alloc.allocate_node::<T>(Self::BUF) {
                Ok(ptr) => unsafe { self.set_slot(node, Some(ptr)) },
                Err(e) => {
                    unsafe { self.release_back(node - 1) };
                    return Err(e);
                }
            }
        }
        Ok(self.finish.node + new_nodes)
    }

    /// Allocates enough nodes before the front node to push `n` elements without allocating, and
    /// returns the outermost map slot that now holds a node.
    fn reserve_front(&mut self, n: usize) -> Result<usize> {
        let vacancies = self.start.cur;
        if n <= vacancies {
            return Ok(self.start.node);
        }

        let new_nodes = (n - vacancies).div_ceil(Self::BUF);
        self.reserve_map_at_front(new_nodes)?;
        for i in 1..=new_nodes {
            let node = self.start.node - i;
            if unsafe { self.slot(node) }.is_some() {
                continue;
            }
            match self.alloc.allocate_node::<T>(Self::BUF) {
                Ok(ptr) => unsafe { self.set_slot(node, Some(ptr)) },
                Err(e) => {
                    unsafe { self.release_front(node + 1) };
                    return Err(e);
                }
            }
        }
        Ok(self.start.node - new_nodes)
    }

    fn reserve_map_at_back(&mut self, nodes_to_add: usize) -> Result<()> {
        if nodes_to_add >= self.map_size - self.finish.node {
            self.reallocate_map(nodes_to_add, false)?;
        }
        Ok(())
    }

    fn reserve_map_at_front(&mut self, nodes_to_add: usize) -> Result<()> {
        if nodes_to_add > self.start.node {
            self.reallocate_map(nodes_to_add, true)?;
        }
        Ok(())
    }

    /// Makes room in the map for `nodes_to_add` more nodes at one end.
    ///
    /// If the map is more than twice as large as the number of nodes it will need to hold, the
    /// active nodes are just moved to the middle of it. Otherwise a larger map is allocated. Only
    /// node pointers are moved either way.
    #[cold]
    #[inline(never)]
    fn reallocate_map(&mut self, nodes_to_add: usize, add_at_front: bool) -> Result<()> {
        let old_num_nodes = self.node_count();
        let new_num_nodes = old_num_nodes
            .checked_add(nodes_to_add)
            .ok_or(Error::OutOfMemory)?;
        let bias = if add_at_front { nodes_to_add } else { 0 };

        let new_start;
        if new_num_nodes <= (self.map_size - 1) / 2 {
            new_start = (self.map_size - new_num_nodes) / 2 + bias;
            unsafe {
                let map = self.map.as_ptr();
                ptr::copy(map.add(self.start.node), map.add(new_start), old_num_nodes);
                for node in self.start.node..=self.finish.node {
                    if node < new_start || node >= new_start + old_num_nodes {
                        map.add(node).write(None);
                    }
                }
            }
        } else {
            let new_map_size = self
                .map_size
                .checked_add(cmp::max(self.map_size, nodes_to_add))
                .and_then(|size| size.checked_add(2))
                .ok_or(Error::OutOfMemory)?;
            let new_map = self.alloc.allocate_map::<T>(new_map_size)?;
            new_start = (new_map_size - new_num_nodes) / 2 + bias;
            unsafe {
                for i in 0..new_map_size {
                    new_map.as_ptr().add(i).write(None);
                }
                ptr::copy_nonoverlapping(
                    self.map.as_ptr().add(self.start.node),
                    new_map.as_ptr().add(new_start),
                    old_num_nodes,
                );
                self.alloc.deallocate_map(self.map, self.map_size);
            }
            self.map = new_map;
            self.map_size = new_map_size;
        }

        self.finish.node = new_start + (self.finish.node - self.start.node);
        self.start.node = new_start;
        Ok(())
    }
}

// Undoes a multi-element insertion that did not run to completion, by popping the elements pushed
// so far and releasing any nodes that were reserved for it.
struct Rollback<'a, T, A: Allocator> {
    deque: &'a mut Deque<T, A>,
    len: usize,
    at_front: bool,
    reserved: usize,
}

impl<'a, T, A: Allocator> Drop for Rollback<'a, T, A> {
    fn drop(&mut self) {
        if self.at_front {
            while self.deque.len() > self.len {
                self.deque.pop_front();
            }
            unsafe { self.deque.release_front(self.reserved) };
        } else {
            self.deque.truncate(self.len);
            unsafe { self.deque.release_back(self.reserved) };
        }
    }
}

#[cold]
#[inline(never)]
fn insert_failed(index: usize, len: usize) -> ! {
    panic!("insertion index (is {}) should be <= len (is {})", index, len);
}

#[cold]
#[inline(never)]
fn erase_failed(index: usize, len: usize) -> ! {
    panic!("removal index (is {}) should be < len (is {})", index, len);
}

impl<T, A: Allocator> Drop for Deque<T, A> {
    fn drop(&mut self) {
        // Frees all storage even if dropping an element panics.
        struct Storage<'a, T, A: Allocator>(&'a mut Deque<T, A>);

        impl<'a, T, A: Allocator> Drop for Storage<'a, T, A> {
            fn drop(&mut self) {
                let deque = &mut *self.0;
                unsafe {
                    for node in 0..deque.map_size {
                        deque.release_node(node);
                    }
                    deque.alloc.deallocate_map(deque.map, deque.map_size);
                }
            }
        }

        let guard = Storage(self);
        let deque = &*guard.0;
        if mem::needs_drop::<T>() {
            for node in deque.start.node..=deque.finish.node {
                let lo = if node == deque.start.node {
                    deque.start.cur
                } else {
                    0
                };
                let hi = if node == deque.finish.node {
                    deque.finish.cur
                } else {
                    Self::BUF
                };
                unsafe {
                    let base = deque.ptr(Pos { node, cur: 0 });
                    ptr::drop_in_place(ptr::slice_from_raw_parts_mut(base.add(lo), hi - lo));
                }
            }
        }
    }
}

impl<T: PartialEq, A: Allocator, B: Allocator> PartialEq<Deque<T, B>> for Deque<T, A> {
    fn eq(&self, other: &Deque<T, B>) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq, A: Allocator> Eq for Deque<T, A> {}

macro_rules! __impl_slice_eq1 {
    ([$($vars:tt)*] $lhs:ty, $rhs:ty, $($constraints:tt)*) => {
        impl<T, U, Alloc: Allocator, $($vars)*> PartialEq<$rhs> for $lhs
        where
            T: PartialEq<U>,
            $($constraints)*
        {
            fn eq(&self, other: &$rhs) -> bool {
                if self.len() != other.len() {
                    return false;
                }
                self.iter().zip(other.iter()).all(|(a, b)| a == b)
            }
        }
    }
}

__impl_slice_eq1! { [] Deque<T, Alloc>, Vec<U>, }
__impl_slice_eq1! { [] Deque<T, Alloc>, &[U], }
__impl_slice_eq1! { [] Deque<T, Alloc>, &mut [U], }
__impl_slice_eq1! { [const N: usize] Deque<T, Alloc>, [U; N], }
__impl_slice_eq1! { [const N: usize] Deque<T, Alloc>, &[U; N], }

impl<T: PartialOrd, A: Allocator> PartialOrd for Deque<T, A> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other.iter())
    }
}

impl<T: Ord, A: Allocator> Ord for Deque<T, A> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other.iter())
    }
}

impl<T: Hash, A: Allocator> Hash for Deque<T, A> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        self.iter().for_each(|elem| elem.hash(state));
    }
}

impl<T, A: Allocator> Index<usize> for Deque<T, A> {
    type Output = T;

    #[inline]
    fn index(&self, index: usize) -> &T {
        self.get(index).expect("Out of bounds access")
    }
}

impl<T, A: Allocator> IndexMut<usize> for Deque<T, A> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut T {
        self.get_mut(index).expect("Out of bounds access")
    }
}

impl<T> FromIterator<T> for Deque<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut deq = Self::new();
        deq.extend(iter);
        deq
    }
}

impl<T, A: Allocator> IntoIterator for Deque<T, A> {
    type Item = T;
    type IntoIter = iter::IntoIter<T, A>;

    fn into_iter(self) -> iter::IntoIter<T, A> {
        iter::IntoIter { inner: self }
    }
}

impl<'a, T, A: Allocator> IntoIterator for &'a Deque<T, A> {
    type Item = &'a T;
    type IntoIter = iter::Iter<'a, T>;

    fn into_iter(self) -> iter::Iter<'a, T> {
        self.iter()
    }
}

impl<'a, T, A: Allocator> IntoIterator for &'a mut Deque<T, A> {
    type Item = &'a mut T;
    type IntoIter = iter::IterMut<'a, T>;

    fn into_iter(self) -> iter::IterMut<'a, T> {
        self.iter_mut()
    }
}

impl<T, A: Allocator> Extend<T> for Deque<T, A> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let len = self.len();
        self.insert_iter(len, iter);
    }
}

impl<'a, T: 'a + Copy, A: Allocator> Extend<&'a T> for Deque<T, A> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl<T: fmt::Debug, A: Allocator> fmt::Debug for Deque<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self).finish()
    }
}

impl<T> From<Vec<T>> for Deque<T> {
    fn from(other: Vec<T>) -> Self {
        other.into_iter().collect()
    }
}

impl<T, const N: usize> From<[T; N]> for Deque<T> {
    fn from(other: [T; N]) -> Self {
        other.into_iter().collect()
    }
}

impl<T, A: Allocator> From<Deque<T, A>> for Vec<T> {
    fn from(other: Deque<T, A>) -> Self {
        let mut vec = Vec::with_capacity(other.len());
        vec.extend(other);
        vec
    }
}
