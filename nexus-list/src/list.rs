//! Doubly-linked list over a circular sentinel chain.
//!
//! Each element lives in its own heap node. The list owns a sentinel link
//! that marks both ends: `sentinel.next` is the front, `sentinel.prev` is the
//! back, and an empty list is a sentinel pointing at itself. Because the
//! chain is circular there are no null links and no special cases for the
//! first or last element: every splice is the same four pointer writes.
//!
//! # Example
//!
//! ```
//! use nexus_list::{List, ListError};
//!
//! let mut list = List::from([1, 2, 3]);
//!
//! list.push_front(0);
//! list.push_back(4);
//! assert_eq!(list.front(), Ok(&0));
//! assert_eq!(list.back(), Ok(&4));
//!
//! assert_eq!(list.pop_front(), Ok(0));
//! assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3, 4]);
//!
//! list.clear();
//! assert_eq!(
//!     list.pop_back(),
//!     Err(ListError::EmptyContainer { operation: "pop_back" })
//! );
//! ```
//!
//! # Positions
//!
//! [`begin`](List::begin), [`end`](List::end), [`rbegin`](List::rbegin) and
//! [`rend`](List::rend) hand out cursors (see [`Position`]) that walk the
//! chain, compare by identity, and, in their `_mut` forms, insert and remove
//! in O(1).
//!
//! ```
//! use nexus_list::List;
//!
//! let mut list = List::from([1, 2, 3, 4, 5, 6]);
//! assert_eq!(list.remove_if(|v| v % 2 == 0), 3);
//! assert_eq!(list, List::from([1, 3, 5]));
//! ```

use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::marker::PhantomData;

use crate::cursor::{Cursor, CursorMut, Position, RevCursor, RevCursorMut};
use crate::iter::{Drain, IntoIter, Iter, IterMut};
use crate::link::{self, LinkKind, LinkPtr, Node};
use crate::ListError;

/// A doubly-linked list with one heap node per element.
///
/// See the [module docs](crate::list) for the chain layout.
pub struct List<T> {
    sentinel: LinkPtr,
    len: usize,
    _marker: PhantomData<Box<Node<T>>>,
}

// Safety: the list owns its nodes exclusively, like `Box<T>`
unsafe impl<T: Send> Send for List<T> {}
// Safety: `&List<T>` only hands out `&T`
unsafe impl<T: Sync> Sync for List<T> {}

impl<T> Default for List<T> {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Construction and size
// =============================================================================

impl<T> List<T> {
    /// Creates an empty list.
    ///
    /// Allocates the sentinel; no element nodes are allocated.
    #[inline]
    pub fn new() -> Self {
        Self {
            sentinel: link::sentinel(),
            len: 0,
            _marker: PhantomData,
        }
    }

    /// Returns the number of elements in the list.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the list is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Moves every element out into a new list, leaving `self` empty.
    ///
    /// O(1): only the chain ownership changes hands.
    ///
    /// ```
    /// use nexus_list::List;
    ///
    /// let mut source = List::from(["a", "b"]);
    /// let moved = source.take();
    ///
    /// assert!(source.is_empty());
    /// assert_eq!(moved, List::from(["a", "b"]));
    /// ```
    #[inline]
    pub fn take(&mut self) -> Self {
        core::mem::take(self)
    }

    // ========================================================================
    // Chain access (crate-internal)
    // ========================================================================

    #[inline]
    pub(crate) fn sentinel(&self) -> LinkPtr {
        self.sentinel
    }

    #[inline]
    pub(crate) fn first(&self) -> LinkPtr {
        // Safety: the sentinel lives as long as the list
        unsafe { link::next(self.sentinel) }
    }

    #[inline]
    pub(crate) fn last(&self) -> LinkPtr {
        // Safety: the sentinel lives as long as the list
        unsafe { link::prev(self.sentinel) }
    }

    /// Allocates a node between two adjacent links of this chain.
    ///
    /// # Safety
    ///
    /// `prev` and `next` must be adjacent links of this list's chain.
    #[inline]
    pub(crate) unsafe fn link_in(&mut self, prev: LinkPtr, next: LinkPtr, value: T) -> LinkPtr {
        let ptr = unsafe { link::splice_in(prev, next, value) };
        self.len += 1;
        ptr
    }

    /// Unlinks and frees a node of this chain, returning its value.
    ///
    /// # Safety
    ///
    /// `ptr` must be an element node of this list's chain.
    #[inline]
    pub(crate) unsafe fn unlink(&mut self, ptr: LinkPtr) -> T {
        let value = unsafe { link::splice_out(ptr) };
        self.len -= 1;
        value
    }

    // ========================================================================
    // Push / emplace
    // ========================================================================

    /// Appends a value to the back of the list.
    #[inline]
    pub fn push_back(&mut self, value: T) {
        let (last, sentinel) = (self.last(), self.sentinel);
        // Safety: the last link and the sentinel are adjacent
        unsafe { self.link_in(last, sentinel, value) };
    }

    /// Prepends a value to the front of the list.
    #[inline]
    pub fn push_front(&mut self, value: T) {
        let (sentinel, first) = (self.sentinel, self.first());
        // Safety: the sentinel and the first link are adjacent
        unsafe { self.link_in(sentinel, first, value) };
    }

    /// Builds a value with `make` directly into a new back node and returns
    /// a reference to it.
    ///
    /// ```
    /// use nexus_list::List;
    ///
    /// let mut list: List<Vec<u8>> = List::new();
    /// list.emplace_back(|| Vec::with_capacity(16)).push(7);
    /// assert_eq!(list.back(), Ok(&vec![7]));
    /// ```
    #[inline]
    pub fn emplace_back<F: FnOnce() -> T>(&mut self, make: F) -> &mut T {
        let (last, sentinel) = (self.last(), self.sentinel);
        // Safety: the last link and the sentinel are adjacent
        let ptr = unsafe { self.link_in(last, sentinel, make()) };
        // Safety: `ptr` is the node just allocated, borrowed through `&mut self`
        unsafe { link::value_unchecked_mut(ptr) }
    }

    /// Builds a value with `make` directly into a new front node and returns
    /// a reference to it.
    #[inline]
    pub fn emplace_front<F: FnOnce() -> T>(&mut self, make: F) -> &mut T {
        let (sentinel, first) = (self.sentinel, self.first());
        // Safety: the sentinel and the first link are adjacent
        let ptr = unsafe { self.link_in(sentinel, first, make()) };
        // Safety: `ptr` is the node just allocated, borrowed through `&mut self`
        unsafe { link::value_unchecked_mut(ptr) }
    }

    // ========================================================================
    // Pop
    // ========================================================================

    /// Removes and returns the front element.
    ///
    /// # Errors
    ///
    /// [`ListError::EmptyContainer`] if the list is empty.
    #[inline]
    pub fn pop_front(&mut self) -> Result<T, ListError> {
        if self.is_empty() {
            return Err(ListError::empty("pop_front"));
        }
        let first = self.first();
        self.checked_unlink(first)
    }

    /// Removes and returns the back element.
    ///
    /// # Errors
    ///
    /// [`ListError::EmptyContainer`] if the list is empty.
    #[inline]
    pub fn pop_back(&mut self) -> Result<T, ListError> {
        if self.is_empty() {
            return Err(ListError::empty("pop_back"));
        }
        let last = self.last();
        self.checked_unlink(last)
    }

    #[inline]
    fn checked_unlink(&mut self, ptr: LinkPtr) -> Result<T, ListError> {
        // Safety: `ptr` is a link of this chain
        match unsafe { link::kind(ptr) } {
            // Safety: tagged as a node of this chain
            LinkKind::Node => Ok(unsafe { self.unlink(ptr) }),
            LinkKind::Sentinel => Err(ListError::corrupted(
                "non-empty list has the sentinel at a boundary",
            )),
        }
    }

    // ========================================================================
    // Access
    // ========================================================================

    /// Returns a reference to the front element.
    ///
    /// # Errors
    ///
    /// [`ListError::EmptyContainer`] if the list is empty.
    #[inline]
    pub fn front(&self) -> Result<&T, ListError> {
        if self.is_empty() {
            return Err(ListError::empty("front"));
        }
        // Safety: a link of this chain, borrowed through `&self`
        unsafe { link::value(self.first()) }.ok_or(ListError::corrupted(
            "non-empty list has the sentinel at the front",
        ))
    }

    /// Returns a mutable reference to the front element.
    ///
    /// # Errors
    ///
    /// [`ListError::EmptyContainer`] if the list is empty.
    #[inline]
    pub fn front_mut(&mut self) -> Result<&mut T, ListError> {
        if self.is_empty() {
            return Err(ListError::empty("front"));
        }
        // Safety: a link of this chain, borrowed through `&mut self`
        unsafe { link::value_mut(self.first()) }.ok_or(ListError::corrupted(
            "non-empty list has the sentinel at the front",
        ))
    }

    /// Returns a reference to the back element.
    ///
    /// # Errors
    ///
    /// [`ListError::EmptyContainer`] if the list is empty.
    #[inline]
    pub fn back(&self) -> Result<&T, ListError> {
        if self.is_empty() {
            return Err(ListError::empty("back"));
        }
        // Safety: a link of this chain, borrowed through `&self`
        unsafe { link::value(self.last()) }.ok_or(ListError::corrupted(
            "non-empty list has the sentinel at the back",
        ))
    }

    /// Returns a mutable reference to the back element.
    ///
    /// # Errors
    ///
    /// [`ListError::EmptyContainer`] if the list is empty.
    #[inline]
    pub fn back_mut(&mut self) -> Result<&mut T, ListError> {
        if self.is_empty() {
            return Err(ListError::empty("back"));
        }
        // Safety: a link of this chain, borrowed through `&mut self`
        unsafe { link::value_mut(self.last()) }.ok_or(ListError::corrupted(
            "non-empty list has the sentinel at the back",
        ))
    }

    /// Returns `true` if the list contains an element equal to `value`.
    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.iter().any(|v| v == value)
    }

    // ========================================================================
    // Bulk operations
    // ========================================================================

    /// Removes and drops every element.
    ///
    /// Each node is unlinked before its element is dropped. If a destructor
    /// panics, the remaining elements are still dropped and the list is left
    /// empty.
    pub fn clear(&mut self) {
        struct DropGuard<'a, T>(&'a mut List<T>);

        impl<T> Drop for DropGuard<'_, T> {
            fn drop(&mut self) {
                // Only runs while unwinding from an element's destructor
                while self.0.pop_front().is_ok() {}
            }
        }

        while let Ok(value) = self.pop_front() {
            let guard = DropGuard(self);
            drop(value);
            core::mem::forget(guard);
        }
    }

    /// Removes every element for which `predicate` returns `true`, in one
    /// front-to-back pass. Returns how many were removed.
    ///
    /// ```
    /// use nexus_list::List;
    ///
    /// let mut list: List<u32> = List::new();
    /// assert_eq!(list.remove_if(|_| true), 0);
    ///
    /// let mut list = List::from([3, 1, 4, 1, 5]);
    /// assert_eq!(list.remove_if(|&v| v == 1), 2);
    /// assert_eq!(list, List::from([3, 4, 5]));
    /// ```
    pub fn remove_if<F>(&mut self, mut predicate: F) -> usize
    where
        F: FnMut(&T) -> bool,
    {
        let mut removed = 0;
        let mut cursor = self.begin_mut();
        while let Ok(value) = cursor.get() {
            if predicate(value) {
                if cursor.remove_current().is_some() {
                    removed += 1;
                }
            } else {
                cursor.move_next();
            }
        }
        removed
    }

    /// Keeps only the elements for which `keep` returns `true`.
    #[inline]
    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&T) -> bool,
    {
        self.remove_if(|value| !keep(value));
    }

    /// Moves every element of `other` to the back of this list.
    ///
    /// After this operation, `other` is empty. This is O(1).
    ///
    /// ```
    /// use nexus_list::List;
    ///
    /// let mut a = List::from([1, 2]);
    /// let mut b = List::from([3, 4]);
    /// a.append(&mut b);
    ///
    /// assert_eq!(a, List::from([1, 2, 3, 4]));
    /// assert!(b.is_empty());
    /// ```
    pub fn append(&mut self, other: &mut Self) {
        if other.is_empty() {
            return;
        }

        let (first, last) = (other.first(), other.last());
        // Safety: both chains are live; other's nodes move wholesale between
        // self's last link and self's sentinel
        unsafe {
            link::join(self.last(), first);
            link::join(last, self.sentinel);
            link::reset(other.sentinel);
        }

        self.len += other.len;
        other.len = 0;
    }

    /// Deep-copies the list, checking every link it walks.
    ///
    /// # Errors
    ///
    /// [`ListError::InternalInvariantViolation`] if a link between the front
    /// and the sentinel is not an element node. This only happens if the
    /// chain was corrupted.
    pub fn try_clone(&self) -> Result<Self, ListError>
    where
        T: Clone,
    {
        let mut copy = Self::new();
        let mut current = self.first();
        while current != self.sentinel {
            // Safety: `current` is a link of this chain, borrowed through `&self`
            let value = unsafe { link::value::<T>(current) }
                .ok_or(ListError::corrupted("non-node link inside the chain"))?;
            copy.push_back(value.clone());
            // Safety: as above
            current = unsafe { link::next(current) };
        }
        Ok(copy)
    }

    /// Walks the chain and checks its structural invariants.
    ///
    /// Checks that every link's neighbours point back at it, that only the
    /// sentinel is tagged as a sentinel, and that the node count matches
    /// [`len`](Self::len).
    ///
    /// # Errors
    ///
    /// [`ListError::InternalInvariantViolation`] naming the first broken
    /// invariant.
    pub fn validate(&self) -> Result<(), ListError> {
        let mut current = self.sentinel;
        let mut nodes = 0usize;

        loop {
            // Safety: `current` is the sentinel or was reached by walking a
            // chain whose links were checked one step earlier
            let (next, kind) = unsafe { (link::next(current), link::kind(current)) };

            // Safety: `next` was read from a live link
            if unsafe { link::prev(next) } != current {
                return Err(ListError::corrupted("next link does not point back"));
            }

            if current == self.sentinel {
                if kind != LinkKind::Sentinel {
                    return Err(ListError::corrupted("sentinel is tagged as a node"));
                }
            } else {
                if kind != LinkKind::Node {
                    return Err(ListError::corrupted("non-node link inside the chain"));
                }
                nodes += 1;
                if nodes > self.len {
                    return Err(ListError::corrupted("more nodes than len"));
                }
            }

            current = next;
            if current == self.sentinel {
                break;
            }
        }

        if nodes == self.len {
            Ok(())
        } else {
            Err(ListError::corrupted("fewer nodes than len"))
        }
    }

    // ========================================================================
    // Cursors
    // ========================================================================

    /// Returns a cursor on the front element, or on the end position if the
    /// list is empty.
    #[inline]
    pub fn begin(&self) -> Cursor<'_, T> {
        Position::new(self, self.first())
    }

    /// Returns a cursor on the end position (the sentinel).
    #[inline]
    pub fn end(&self) -> Cursor<'_, T> {
        Position::new(self, self.sentinel)
    }

    /// Returns a reverse cursor on the back element, or on the end position
    /// if the list is empty.
    #[inline]
    pub fn rbegin(&self) -> RevCursor<'_, T> {
        Position::new(self, self.last())
    }

    /// Returns a reverse cursor on the end position (the sentinel).
    #[inline]
    pub fn rend(&self) -> RevCursor<'_, T> {
        Position::new(self, self.sentinel)
    }

    /// Exclusive form of [`begin`](Self::begin).
    #[inline]
    pub fn begin_mut(&mut self) -> CursorMut<'_, T> {
        let first = self.first();
        Position::new_mut(self, first)
    }

    /// Exclusive form of [`end`](Self::end).
    #[inline]
    pub fn end_mut(&mut self) -> CursorMut<'_, T> {
        let sentinel = self.sentinel;
        Position::new_mut(self, sentinel)
    }

    /// Exclusive form of [`rbegin`](Self::rbegin).
    #[inline]
    pub fn rbegin_mut(&mut self) -> RevCursorMut<'_, T> {
        let last = self.last();
        Position::new_mut(self, last)
    }

    /// Exclusive form of [`rend`](Self::rend).
    #[inline]
    pub fn rend_mut(&mut self) -> RevCursorMut<'_, T> {
        let sentinel = self.sentinel;
        Position::new_mut(self, sentinel)
    }

    // ========================================================================
    // Iteration
    // ========================================================================

    /// Returns an iterator over references to elements, front to back.
    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self.first(), self.last(), self.len)
    }

    /// Returns an iterator over mutable references to elements, front to back.
    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut::new(self.first(), self.last(), self.len)
    }

    /// Removes every element, yielding them front to back.
    ///
    /// The list is empty after the iterator is dropped, even if it was not
    /// fully consumed.
    #[inline]
    pub fn drain(&mut self) -> Drain<'_, T> {
        Drain::new(self)
    }
}

impl<T> Drop for List<T> {
    fn drop(&mut self) {
        struct FreeSentinel(LinkPtr);

        impl Drop for FreeSentinel {
            fn drop(&mut self) {
                // Safety: allocated in `new`, never handed out by value, and
                // freed only here, after every node is gone
                unsafe { link::free_sentinel(self.0) };
            }
        }

        let _sentinel = FreeSentinel(self.sentinel);
        self.clear();
    }
}

// =============================================================================
// Copy, compare, format
// =============================================================================

impl<T: Clone> Clone for List<T> {
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }

    fn clone_from(&mut self, source: &Self) {
        // Reuse existing nodes for the common prefix
        let mut theirs = source.iter();
        for (mine, value) in self.iter_mut().zip(theirs.by_ref()) {
            mine.clone_from(value);
        }

        let remaining = theirs.len();
        if remaining > 0 {
            self.extend(theirs.cloned());
        } else {
            while self.len > source.len && self.pop_back().is_ok() {}
        }
    }
}

impl<T: PartialEq> PartialEq for List<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for List<T> {}

impl<T: PartialOrd> PartialOrd for List<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other.iter())
    }
}

impl<T: Ord> Ord for List<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other.iter())
    }
}

impl<T: Hash> Hash for List<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_usize(self.len);
        for value in self {
            value.hash(state);
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for List<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self).finish()
    }
}

// =============================================================================
// Conversions
// =============================================================================

impl<T> FromIterator<T> for List<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

impl<T> Extend<T> for List<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push_back(value);
        }
    }
}

impl<'a, T: Copy + 'a> Extend<&'a T> for List<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl<T, const N: usize> From<[T; N]> for List<T> {
    fn from(values: [T; N]) -> Self {
        values.into_iter().collect()
    }
}

impl<T> IntoIterator for List<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    #[inline]
    fn into_iter(self) -> IntoIter<T> {
        IntoIter::new(self)
    }
}

impl<'a, T> IntoIterator for &'a List<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    #[inline]
    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut List<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    #[inline]
    fn into_iter(self) -> IterMut<'a, T> {
        self.iter_mut()
    }
}


#[cfg(test)]
mod bench_list {
    use super::*;
    use hdrhistogram::Histogram;

    #[inline]
    fn rdtscp() -> u64 {
        #[cfg(target_arch = "x86_64")]
        unsafe {
            core::arch::x86_64::__rdtscp(&mut 0)
        }
        #[cfg(not(target_arch = "x86_64"))]
        {
            std::time::Instant::now().elapsed().as_nanos() as u64
        }
    }

    fn print_histogram(name: &str, hist: &Histogram<u64>) {
        println!(
            "{:24} p50: {:4} cycles | p99: {:4} cycles | p999: {:5} cycles | min: {:4} | max: {:5}",
            name,
            hist.value_at_quantile(0.50),
            hist.value_at_quantile(0.99),
            hist.value_at_quantile(0.999),
            hist.min(),
            hist.max(),
        );
    }

    const WARMUP: usize = 10_000;
    const ITERATIONS: usize = 100_000;

    #[test]
    #[ignore]
    fn bench_list_push_back() {
        let mut list: List<u64> = List::new();
        let mut hist = Histogram::<u64>::new(3).unwrap();

        for i in 0..WARMUP {
            list.push_back(i as u64);
            let _ = list.pop_back();
        }

        for i in 0..ITERATIONS {
            let start = rdtscp();
            list.push_back(i as u64);
            let elapsed = rdtscp().wrapping_sub(start);
            hist.record(elapsed).unwrap();
            let _ = list.pop_back();
        }

        print_histogram("push_back", &hist);
    }

    #[test]
    #[ignore]
    fn bench_list_pop_front() {
        let mut list: List<u64> = (0..(WARMUP + ITERATIONS) as u64).collect();
        let mut hist = Histogram::<u64>::new(3).unwrap();

        for _ in 0..WARMUP {
            let _ = list.pop_front();
        }

        for _ in 0..ITERATIONS {
            let start = rdtscp();
            let _ = std::hint::black_box(list.pop_front());
            let elapsed = rdtscp().wrapping_sub(start);
            hist.record(elapsed).unwrap();
        }

        print_histogram("pop_front", &hist);
    }

    #[test]
    #[ignore]
    fn bench_list_cursor_pop_middle() {
        const LEN: usize = 1024;
        let mut list: List<u64> = (0..LEN as u64).collect();
        let mut hist = Histogram::<u64>::new(3).unwrap();

        for i in 0..ITERATIONS {
            let mut cursor = list.begin_mut();
            for _ in 0..LEN / 2 {
                cursor.move_next();
            }

            let start = rdtscp();
            let value = cursor.pop();
            let elapsed = rdtscp().wrapping_sub(start);
            hist.record(elapsed).unwrap();

            let _ = std::hint::black_box(value);
            cursor.insert(i as u64);
        }

        print_histogram("cursor pop (middle)", &hist);
    }

    #[test]
    #[ignore]
    fn bench_list_all() {
        println!("\n=== List Benchmarks ===");
        println!(
            "Run with: cargo test --release bench_list::bench_list_all -- --ignored --nocapture\n"
        );

        bench_list_push_back();
        bench_list_pop_front();
        bench_list_cursor_pop_middle();
        println!();
    }
}
