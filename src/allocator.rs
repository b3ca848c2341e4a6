//! Allocation strategies for the storage behind a [`Deque`](crate::Deque).
//!
//! A deque asks its strategy for two kinds of memory: fixed-capacity *nodes* that hold elements,
//! and the *map*, an array of node slots that records which nodes are in use and in what order.
//! Neither request constructs anything; the deque is responsible for every element it writes into
//! a node and for every slot it writes into the map.

use core::alloc::Layout;
use core::ptr::NonNull;

use crate::error::{Error, Result};

/// A slot in the node map: either an active node or unused headroom.
pub type Slot<T> = Option<NonNull<T>>;

/// An allocation strategy for [`Deque`](crate::Deque) nodes and maps.
///
/// Implementors only have to provide [`allocate`](Allocator::allocate) and
/// [`deallocate`](Allocator::deallocate). The four node and map operations are expressed in terms
/// of those two, but may be overridden, for example to keep separate pools for nodes and maps.
///
/// # Safety
///
/// Memory returned by `allocate` must be valid for reads and writes of `layout.size()` bytes,
/// aligned to `layout.align()`, and must stay valid until it is passed back to `deallocate` with
/// the same layout. Overridden node and map operations carry the same obligation for the
/// `Layout::array` of their element type.
pub unsafe trait Allocator {
    /// Reserves a block of memory described by `layout`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfMemory`] if the request cannot be satisfied.
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>>;

    /// Releases a block previously returned by [`allocate`](Allocator::allocate).
    ///
    /// # Safety
    ///
    /// `ptr` must have been returned by `allocate` on this strategy with this same `layout`, and
    /// must not have been deallocated already.
    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout);

    /// Reserves uninitialized storage for `capacity` elements of type `T`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfMemory`] if the request cannot be satisfied.
    fn allocate_node<T>(&self, capacity: usize) -> Result<NonNull<T>> {
        let layout = Layout::array::<T>(capacity).map_err(|_| Error::OutOfMemory)?;
        self.allocate(layout).map(NonNull::cast)
    }

    /// Releases a node obtained from [`allocate_node`](Allocator::allocate_node).
    ///
    /// # Safety
    ///
    /// `node` must come from `allocate_node::<T>(capacity)` on this strategy and must not hold any
    /// live elements.
    unsafe fn deallocate_node<T>(&self, node: NonNull<T>, capacity: usize) {
        // allocate_node already accepted this layout
        let layout = Layout::array::<T>(capacity)
            .unwrap_or_else(|_| core::hint::unreachable_unchecked());
        self.deallocate(node.cast(), layout);
    }

    /// Reserves an uninitialized map of `len` node slots.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfMemory`] if the request cannot be satisfied.
    fn allocate_map<T>(&self, len: usize) -> Result<NonNull<Slot<T>>> {
        let layout = Layout::array::<Slot<T>>(len).map_err(|_| Error::OutOfMemory)?;
        self.allocate(layout).map(NonNull::cast)
    }

    /// Releases a map obtained from [`allocate_map`](Allocator::allocate_map).
    ///
    /// # Safety
    ///
    /// `map` must come from `allocate_map::<T>(len)` on this strategy.
    unsafe fn deallocate_map<T>(&self, map: NonNull<Slot<T>>, len: usize) {
        let layout = Layout::array::<Slot<T>>(len)
            .unwrap_or_else(|_| core::hint::unreachable_unchecked());
        self.deallocate(map.cast(), layout);
    }
}

unsafe impl<A> Allocator for &A
where
    A: Allocator + ?Sized,
{
    #[inline]
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>> {
        (**self).allocate(layout)
    }

    #[inline]
    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        (**self).deallocate(ptr, layout)
    }

    #[inline]
    fn allocate_node<T>(&self, capacity: usize) -> Result<NonNull<T>> {
        (**self).allocate_node(capacity)
    }

    #[inline]
    unsafe fn deallocate_node<T>(&self, node: NonNull<T>, capacity: usize) {
        (**self).deallocate_node(node, capacity)
    }

    #[inline]
    fn allocate_map<T>(&self, len: usize) -> Result<NonNull<Slot<T>>> {
        (**self).allocate_map(len)
    }

    #[inline]
    unsafe fn deallocate_map<T>(&self, map: NonNull<Slot<T>>, len: usize) {
        (**self).deallocate_map(map, len)
    }
}

/// The default strategy, backed by the global heap.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Global;

unsafe impl Allocator for Global {
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>> {
        if layout.size() == 0 {
            // zero-sized requests (ZST nodes) are served by a dangling, aligned pointer
            return Ok(unsafe { NonNull::new_unchecked(layout.align() as *mut u8) });
        }
        NonNull::new(unsafe { alloc::alloc::alloc(layout) }).ok_or(Error::OutOfMemory)
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        if layout.size() != 0 {
            alloc::alloc::dealloc(ptr.as_ptr(), layout);
        }
    }
}
