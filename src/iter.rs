use core::fmt;
use core::iter::FusedIterator;
use core::marker::PhantomData;
use core::ptr::NonNull;

use crate::allocator::{Allocator, Global, Slot};
use crate::cursor::Pos;
use crate::Deque;

// Both borrowing iterators walk the map directly: `head` is the next element to yield from the
// front, `tail` is one past the next element to yield from the back, and `len` is the number of
// elements between them.
macro_rules! _impl {
    (fw $(, $m:tt)?) => {
        #[inline]
        fn next(&mut self) -> Option<Self::Item> {
            if self.len == 0 {
                return None;
            }
            // head is within the borrowed deque's live range
            let ptr = unsafe { self.head.ptr(self.map) };
            self.head.inc(self.buf);
            self.len -= 1;
            Some(unsafe { &$($m)? *ptr })
        }

        #[inline]
        fn size_hint(&self) -> (usize, Option<usize>) {
            (self.len, Some(self.len))
        }

        fn nth(&mut self, n: usize) -> Option<Self::Item> {
            if n >= self.len {
                self.head = self.tail;
                self.len = 0;
                return None;
            }
            self.head = self.head.offset(n as isize, self.buf);
            self.len -= n;
            self.next()
        }

        #[inline]
        fn last(mut self) -> Option<Self::Item> {
            self.next_back()
        }

        #[inline]
        fn count(self) -> usize {
            self.len
        }
    };

    (bw $(, $m:tt)?) => {
        #[inline]
        fn next_back(&mut self) -> Option<Self::Item> {
            if self.len == 0 {
                return None;
            }
            self.tail.dec(self.buf);
            self.len -= 1;
            let ptr = unsafe { self.tail.ptr(self.map) };
            Some(unsafe { &$($m)? *ptr })
        }

        fn nth_back(&mut self, n: usize) -> Option<Self::Item> {
            if n >= self.len {
                self.tail = self.head;
                self.len = 0;
                return None;
            }
            self.tail = self.tail.offset(-(n as isize), self.buf);
            self.len -= n;
            self.next_back()
        }
    };
}

/// An iterator over the elements of a `Deque`.
///
/// This `struct` is created by the [`iter`] method on [`Deque`]. See its
/// documentation for more.
///
/// [`iter`]: struct.Deque.html#method.iter
/// [`Deque`]: struct.Deque.html
pub struct Iter<'a, T> {
    pub(super) map: NonNull<Slot<T>>,
    pub(super) head: Pos,
    pub(super) tail: Pos,
    pub(super) len: usize,
    pub(super) buf: usize,
    pub(super) marker: PhantomData<&'a T>,
}

impl<'a, T> Iter<'a, T> {
    pub(super) fn new<A: Allocator>(deque: &'a Deque<T, A>) -> Self {
        Self {
            map: deque.map,
            head: deque.start,
            tail: deque.finish,
            len: deque.len(),
            buf: Deque::<T, A>::BUF,
            marker: PhantomData,
        }
    }

    /// Divides the iterator into two at `mid`, the first yielding the first `mid` elements.
    #[cfg_attr(not(feature = "rayon"), allow(dead_code))]
    pub(crate) fn split_at(self, mid: usize) -> (Self, Self) {
        debug_assert!(mid <= self.len);
        let split = self.head.offset(mid as isize, self.buf);
        let left = Iter {
            tail: split,
            len: mid,
            ..self.clone()
        };
        let right = Iter {
            head: split,
            len: self.len - mid,
            ..self
        };
        (left, right)
    }
}

unsafe impl<T: Sync> Send for Iter<'_, T> {}
unsafe impl<T: Sync> Sync for Iter<'_, T> {}

impl<'a, T> Clone for Iter<'a, T> {
    fn clone(&self) -> Self {
        Self {
            map: self.map,
            head: self.head,
            tail: self.tail,
            len: self.len,
            buf: self.buf,
            marker: PhantomData,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Iter").field(&self.len).finish()
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    _impl!(fw);
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    _impl!(bw);
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

/// A mutable iterator over the elements of a `Deque`.
///
/// This `struct` is created by the [`iter_mut`] method on [`Deque`]. See its
/// documentation for more.
///
/// [`iter_mut`]: struct.Deque.html#method.iter_mut
/// [`Deque`]: struct.Deque.html
pub struct IterMut<'a, T> {
    pub(super) map: NonNull<Slot<T>>,
    pub(super) head: Pos,
    pub(super) tail: Pos,
    pub(super) len: usize,
    pub(super) buf: usize,
    pub(super) marker: PhantomData<&'a mut T>,
}

impl<'a, T> IterMut<'a, T> {
    pub(super) fn new<A: Allocator>(deque: &'a mut Deque<T, A>) -> Self {
        Self {
            map: deque.map,
            head: deque.start,
            tail: deque.finish,
            len: deque.len(),
            buf: Deque::<T, A>::BUF,
            marker: PhantomData,
        }
    }

    /// Divides the iterator into two disjoint halves at `mid`.
    #[cfg_attr(not(feature = "rayon"), allow(dead_code))]
    pub(crate) fn split_at(self, mid: usize) -> (Self, Self) {
        debug_assert!(mid <= self.len);
        let split = self.head.offset(mid as isize, self.buf);
        let left = IterMut {
            map: self.map,
            head: self.head,
            tail: split,
            len: mid,
            buf: self.buf,
            marker: PhantomData,
        };
        let right = IterMut {
            head: split,
            len: self.len - mid,
            ..self
        };
        (left, right)
    }
}

unsafe impl<T: Send> Send for IterMut<'_, T> {}
unsafe impl<T: Sync> Sync for IterMut<'_, T> {}

impl<T: fmt::Debug> fmt::Debug for IterMut<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IterMut").field(&self.len).finish()
    }
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    _impl!(fw, mut);
}

impl<'a, T> DoubleEndedIterator for IterMut<'a, T> {
    _impl!(bw, mut);
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}

impl<T> FusedIterator for IterMut<'_, T> {}

/// An owning iterator over the elements of a `Deque`.
///
/// This `struct` is created by the [`into_iter`] method on [`Deque`]
/// (provided by the `IntoIterator` trait). See its documentation for more.
///
/// [`into_iter`]: struct.Deque.html#method.into_iter
/// [`Deque`]: struct.Deque.html
#[derive(Clone)]
pub struct IntoIter<T, A: Allocator = Global> {
    pub(super) inner: Deque<T, A>,
}

impl<T: fmt::Debug, A: Allocator> fmt::Debug for IntoIter<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.inner).finish()
    }
}

impl<T, A: Allocator> Iterator for IntoIter<T, A> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        self.inner.pop_front()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.inner.len();
        (len, Some(len))
    }

    #[inline]
    fn count(self) -> usize {
        self.inner.len()
    }
}

impl<T, A: Allocator> DoubleEndedIterator for IntoIter<T, A> {
    #[inline]
    fn next_back(&mut self) -> Option<T> {
        self.inner.pop_back()
    }
}

impl<T, A: Allocator> ExactSizeIterator for IntoIter<T, A> {}

impl<T, A: Allocator> FusedIterator for IntoIter<T, A> {}
