use core::cmp::Ordering;
use core::fmt;
use core::ops::{Add, AddAssign, Index, Sub, SubAssign};
use core::ptr::NonNull;

use crate::allocator::{Allocator, Global, Slot};
use crate::Deque;

/// A raw position in a deque: a slot in the node map and an offset within that node.
///
/// Positions are kept normalized, so `cur` is always below the node capacity. Comparing two
/// positions orders them by node slot first and by offset second, which is the logical order of
/// the elements they point at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct Pos {
    pub(crate) node: usize,
    pub(crate) cur: usize,
}

impl Pos {
    #[inline]
    pub(crate) fn inc(&mut self, buf: usize) {
        self.cur += 1;
        if self.cur == buf {
            self.node = self.node.wrapping_add(1);
            self.cur = 0;
        }
    }

    #[inline]
    pub(crate) fn dec(&mut self, buf: usize) {
        if self.cur == 0 {
            self.node = self.node.wrapping_sub(1);
            self.cur = buf;
        }
        self.cur -= 1;
    }

    /// Moves `n` elements forward (or backward, if `n` is negative).
    #[inline]
    pub(crate) fn offset(self, n: isize, buf: usize) -> Pos {
        let buf = buf as isize;
        let offset = n + self.cur as isize;
        if (0..buf).contains(&offset) {
            return Pos {
                node: self.node,
                cur: offset as usize,
            };
        }

        // floored division, so that a negative offset lands in an earlier node
        let node_offset = if offset > 0 {
            offset / buf
        } else {
            -((-offset - 1) / buf) - 1
        };
        Pos {
            node: (self.node as isize).wrapping_add(node_offset) as usize,
            cur: (offset - node_offset * buf) as usize,
        }
    }

    /// The signed number of elements from `other` to `self`.
    #[inline]
    pub(crate) fn distance(self, other: Pos, buf: usize) -> isize {
        let nodes = (self.node as isize).wrapping_sub(other.node as isize) - 1;
        buf as isize * nodes + self.cur as isize + (buf - other.cur) as isize
    }

    /// Address of the element slot at this position.
    ///
    /// # Safety
    ///
    /// The node slot must be within the map and hold an allocated node.
    #[inline]
    pub(crate) unsafe fn ptr<T>(self, map: NonNull<Slot<T>>) -> *mut T {
        let node = *map.as_ptr().add(self.node);
        debug_assert!(node.is_some(), "position in unallocated node {}", self.node);
        node.unwrap_or_else(|| core::hint::unreachable_unchecked())
            .as_ptr()
            .add(self.cur)
    }
}

/// A random-access cursor into a [`Deque`].
///
/// A cursor can point at any element of the deque, or one past the last element (see
/// [`Deque::end`]). It can be moved in either direction by any number of elements in constant
/// time, no matter how many storage nodes it has to cross, and two cursors into the same deque can
/// be subtracted to find the number of elements between them.
///
/// Moving a cursor outside of `begin()..=end()` is allowed, but such a cursor does not point at
/// anything: [`get`](Cursor::get) returns `None` and indexing panics.
///
/// # Examples
///
/// ```
/// use chunkdeque::Deque;
///
/// let buf: Deque<_> = (0..1000).collect();
/// let mut it = buf.begin() + 500;
/// assert_eq!(it.get(), Some(&500));
/// it -= 499;
/// assert_eq!(it[2], 3);
/// assert_eq!(buf.end() - it, 999);
/// assert!(it < buf.end());
/// ```
pub struct Cursor<'a, T, A: Allocator = Global> {
    deque: &'a Deque<T, A>,
    pos: Pos,
}

impl<'a, T, A: Allocator> Clone for Cursor<'a, T, A> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, T, A: Allocator> Copy for Cursor<'a, T, A> {}

impl<'a, T, A: Allocator> Cursor<'a, T, A> {
    #[inline]
    pub(crate) fn new(deque: &'a Deque<T, A>, pos: Pos) -> Self {
        Self { deque, pos }
    }

    /// Returns the element under the cursor, or `None` if the cursor is at `end()` or outside
    /// of the deque.
    #[inline]
    pub fn get(&self) -> Option<&'a T> {
        self.deque.get_at(self.pos)
    }

    /// Returns the element `n` positions away from the cursor, without moving it.
    #[inline]
    pub fn peek(&self, n: isize) -> Option<&'a T> {
        (*self + n).get()
    }

    /// Returns the logical index of the cursor, i.e. `self - deque.begin()`.
    #[inline]
    pub fn position(&self) -> isize {
        self.pos.distance(self.deque.start, Deque::<T, A>::BUF)
    }

    /// Advances the cursor by one element.
    #[inline]
    pub fn move_next(&mut self) {
        self.pos.inc(Deque::<T, A>::BUF);
    }

    /// Moves the cursor back by one element.
    #[inline]
    pub fn move_prev(&mut self) {
        self.pos.dec(Deque::<T, A>::BUF);
    }
}

impl<'a, T, A: Allocator> AddAssign<isize> for Cursor<'a, T, A> {
    #[inline]
    fn add_assign(&mut self, n: isize) {
        self.pos = self.pos.offset(n, Deque::<T, A>::BUF);
    }
}

impl<'a, T, A: Allocator> SubAssign<isize> for Cursor<'a, T, A> {
    #[inline]
    fn sub_assign(&mut self, n: isize) {
        self.pos = self.pos.offset(n.wrapping_neg(), Deque::<T, A>::BUF);
    }
}

impl<'a, T, A: Allocator> Add<isize> for Cursor<'a, T, A> {
    type Output = Self;

    #[inline]
    fn add(mut self, n: isize) -> Self {
        self += n;
        self
    }
}

impl<'a, T, A: Allocator> Sub<isize> for Cursor<'a, T, A> {
    type Output = Self;

    #[inline]
    fn sub(mut self, n: isize) -> Self {
        self -= n;
        self
    }
}

impl<'a, T, A: Allocator> Sub for Cursor<'a, T, A> {
    type Output = isize;

    #[inline]
    fn sub(self, other: Self) -> isize {
        self.pos.distance(other.pos, Deque::<T, A>::BUF)
    }
}

impl<'a, T, A: Allocator> Index<isize> for Cursor<'a, T, A> {
    type Output = T;

    #[inline]
    fn index(&self, n: isize) -> &T {
        self.peek(n).expect("cursor out of bounds")
    }
}

impl<'a, T, A: Allocator> PartialEq for Cursor<'a, T, A> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.pos == other.pos
    }
}

impl<'a, T, A: Allocator> Eq for Cursor<'a, T, A> {}

impl<'a, T, A: Allocator> PartialOrd for Cursor<'a, T, A> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<'a, T, A: Allocator> Ord for Cursor<'a, T, A> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.pos.cmp(&other.pos)
    }
}

impl<'a, T, A: Allocator> fmt::Debug for Cursor<'a, T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("node", &self.pos.node)
            .field("offset", &self.pos.cur)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::Pos;
    use crate::Deque;

    #[test]
    fn floored_offsets() {
        let p = Pos { node: 5, cur: 3 };
        assert_eq!(p.offset(0, 8), p);
        assert_eq!(p.offset(4, 8), Pos { node: 5, cur: 7 });
        assert_eq!(p.offset(5, 8), Pos { node: 6, cur: 0 });
        assert_eq!(p.offset(-3, 8), Pos { node: 5, cur: 0 });
        assert_eq!(p.offset(-4, 8), Pos { node: 4, cur: 7 });
        assert_eq!(p.offset(-11, 8), Pos { node: 4, cur: 0 });
        assert_eq!(p.offset(-12, 8), Pos { node: 3, cur: 7 });
        assert_eq!(p.offset(21, 8), Pos { node: 8, cur: 0 });
    }

    #[test]
    fn distance_matches_offset() {
        let p = Pos { node: 4, cur: 6 };
        for n in -30..30 {
            assert_eq!(p.offset(n, 8).distance(p, 8), n);
        }
        let q = Pos { node: 4, cur: 1 };
        assert_eq!(p.distance(q, 8), 5);
        assert_eq!(q.distance(p, 8), -5);
    }

    #[test]
    fn inc_dec_cross_nodes() {
        let mut p = Pos { node: 2, cur: 6 };
        p.inc(8);
        assert_eq!(p, Pos { node: 2, cur: 7 });
        p.inc(8);
        assert_eq!(p, Pos { node: 3, cur: 0 });
        p.dec(8);
        assert_eq!(p, Pos { node: 2, cur: 7 });
    }

    #[test]
    fn end_minus_begin() {
        let mut d = Deque::new();
        assert_eq!(d.end() - d.begin(), 0);
        for i in 0..100 {
            d.push_back(i);
            d.push_front(-i);
            assert_eq!(d.end() - d.begin(), d.len() as isize);
        }
    }

    #[test]
    fn add_then_sub() {
        let d: Deque<i32> = (0..200).collect();
        let len = d.len() as isize;
        for start in [0isize, 1, 15, 16, 17, 99, 199, 200] {
            let it = d.begin() + start;
            for n in -start..=(len - start) {
                assert_eq!((it + n) - n, it);
                assert_eq!((it + n) - it, n);
                assert_eq!((it + n).position(), start + n);
            }
        }
    }

    #[test]
    fn deref_and_index() {
        let d: Deque<i32> = (0..100).collect();
        let mut it = d.begin();
        for i in 0..100 {
            assert_eq!(it.get(), Some(&i));
            assert_eq!(d.begin()[i as isize], i);
            it.move_next();
        }
        assert_eq!(it, d.end());
        assert_eq!(it.get(), None);
        it.move_prev();
        assert_eq!(it.get(), Some(&99));
        assert_eq!(it.peek(-99), Some(&0));
        assert_eq!(it.peek(-100), None);
        assert_eq!(it.peek(1), None);
    }

    #[test]
    fn ordering() {
        let d: Deque<i32> = (0..50).collect();
        let a = d.begin() + 3;
        let b = d.begin() + 40;
        assert!(a < b);
        assert!(b > a);
        assert!(a <= a);
        assert!(b >= a);
        assert_ne!(a, b);
        assert_eq!(d.cursor(40), b);
    }

    #[test]
    #[should_panic]
    fn index_past_end() {
        let d: Deque<i32> = (0..5).collect();
        let _x = d.begin()[5];
    }
}
