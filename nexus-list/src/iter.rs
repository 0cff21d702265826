//! Iterators over a [`List`].

use core::fmt;
use core::iter::FusedIterator;
use core::marker::PhantomData;

use crate::link::{self, LinkPtr, Node};
use crate::List;

// =============================================================================
// Iter
// =============================================================================

/// Iterator over references to list elements.
///
/// Created by [`List::iter`].
pub struct Iter<'a, T> {
    head: LinkPtr,
    tail: LinkPtr,
    len: usize,
    _marker: PhantomData<&'a Node<T>>,
}

impl<'a, T> Iter<'a, T> {
    #[inline]
    pub(crate) fn new(head: LinkPtr, tail: LinkPtr, len: usize) -> Self {
        Self {
            head,
            tail,
            len,
            _marker: PhantomData,
        }
    }
}

// Safety: behaves like `&'a T`
unsafe impl<T: Sync> Send for Iter<'_, T> {}
// Safety: behaves like `&'a T`
unsafe impl<T: Sync> Sync for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self { ..*self }
    }
}

impl<T: fmt::Debug> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Iter").field(&self.len).finish()
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<&'a T> {
        if self.len == 0 {
            return None;
        }

        // Safety: `len` nodes remain between head and tail, so head is a node
        // kept alive by the `&'a List` this iterator borrows
        unsafe {
            let value = link::value::<T>(self.head);
            self.head = link::next(self.head);
            self.len -= 1;
            value
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    #[inline]
    fn next_back(&mut self) -> Option<&'a T> {
        if self.len == 0 {
            return None;
        }

        // Safety: as in `next`, for the tail
        unsafe {
            let value = link::value::<T>(self.tail);
            self.tail = link::prev(self.tail);
            self.len -= 1;
            value
        }
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

// =============================================================================
// IterMut
// =============================================================================

/// Iterator over mutable references to list elements.
///
/// Created by [`List::iter_mut`].
pub struct IterMut<'a, T> {
    head: LinkPtr,
    tail: LinkPtr,
    len: usize,
    _marker: PhantomData<&'a mut Node<T>>,
}

impl<'a, T> IterMut<'a, T> {
    #[inline]
    pub(crate) fn new(head: LinkPtr, tail: LinkPtr, len: usize) -> Self {
        Self {
            head,
            tail,
            len,
            _marker: PhantomData,
        }
    }
}

// Safety: behaves like `&'a mut T`
unsafe impl<T: Send> Send for IterMut<'_, T> {}
// Safety: behaves like `&'a mut T`
unsafe impl<T: Sync> Sync for IterMut<'_, T> {}

impl<T: fmt::Debug> fmt::Debug for IterMut<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IterMut").field(&self.len).finish()
    }
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    #[inline]
    fn next(&mut self) -> Option<&'a mut T> {
        if self.len == 0 {
            return None;
        }

        // Safety: head is a node of the exclusively borrowed list; each node is
        // yielded once, so the `&mut T`s never alias
        unsafe {
            let value = link::value_mut::<T>(self.head);
            self.head = link::next(self.head);
            self.len -= 1;
            value
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<'a, T> DoubleEndedIterator for IterMut<'a, T> {
    #[inline]
    fn next_back(&mut self) -> Option<&'a mut T> {
        if self.len == 0 {
            return None;
        }

        // Safety: as in `next`, for the tail
        unsafe {
            let value = link::value_mut::<T>(self.tail);
            self.tail = link::prev(self.tail);
            self.len -= 1;
            value
        }
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}

impl<T> FusedIterator for IterMut<'_, T> {}

// =============================================================================
// IntoIter
// =============================================================================

/// Owning iterator over list elements.
///
/// Created by [`List::into_iter`](IntoIterator::into_iter).
pub struct IntoIter<T> {
    list: List<T>,
}

impl<T> IntoIter<T> {
    #[inline]
    pub(crate) fn new(list: List<T>) -> Self {
        Self { list }
    }
}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.list).finish()
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        self.list.pop_front().ok()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.list.len(), Some(self.list.len()))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    #[inline]
    fn next_back(&mut self) -> Option<T> {
        self.list.pop_back().ok()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

// =============================================================================
// Drain
// =============================================================================

/// Iterator that removes and returns elements from a list.
///
/// Created by [`List::drain`]. Elements not consumed are dropped with the
/// iterator.
pub struct Drain<'a, T> {
    list: &'a mut List<T>,
}

impl<'a, T> Drain<'a, T> {
    #[inline]
    pub(crate) fn new(list: &'a mut List<T>) -> Self {
        Self { list }
    }
}

impl<T: fmt::Debug> fmt::Debug for Drain<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Drain").field(&*self.list).finish()
    }
}

impl<T> Iterator for Drain<'_, T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        self.list.pop_front().ok()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.list.len(), Some(self.list.len()))
    }
}

impl<T> DoubleEndedIterator for Drain<'_, T> {
    #[inline]
    fn next_back(&mut self) -> Option<T> {
        self.list.pop_back().ok()
    }
}

impl<T> ExactSizeIterator for Drain<'_, T> {}

impl<T> FusedIterator for Drain<'_, T> {}

impl<T> Drop for Drain<'_, T> {
    fn drop(&mut self) {
        self.list.clear();
    }
}

#[cfg(test)]
mod tests {
    use crate::List;

    #[test]
    fn iter_both_ends_meet_in_the_middle() {
        let list = List::from([1, 2, 3, 4, 5]);
        let mut iter = list.iter();

        assert_eq!(iter.len(), 5);
        assert_eq!(iter.next(), Some(&1));
        assert_eq!(iter.next_back(), Some(&5));
        assert_eq!(iter.next(), Some(&2));
        assert_eq!(iter.next_back(), Some(&4));
        assert_eq!(iter.len(), 1);
        assert_eq!(iter.next(), Some(&3));
        assert_eq!(iter.next_back(), None);
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn iter_rev_visits_tail_to_head() {
        let list = List::from([1, 2, 3]);
        let values: Vec<_> = list.iter().rev().copied().collect();
        assert_eq!(values, vec![3, 2, 1]);
    }

    #[test]
    fn iter_on_empty() {
        let list: List<u8> = List::new();
        assert_eq!(list.iter().next(), None);
        assert_eq!(list.iter().next_back(), None);
    }

    #[test]
    fn iter_mut_modifies_in_place() {
        let mut list = List::from([1, 2, 3]);
        for value in list.iter_mut() {
            *value *= 10;
        }
        if let Some(last) = list.iter_mut().next_back() {
            *last += 1;
        }
        assert_eq!(list, List::from([10, 20, 31]));
    }

    #[test]
    fn into_iter_both_directions() {
        let list = List::from(["a", "b", "c"]);
        let mut iter = list.into_iter();
        assert_eq!(iter.next_back(), Some("c"));
        assert_eq!(iter.len(), 2);
        assert_eq!(iter.collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn for_loops_over_references() {
        let mut list = List::from([1, 2]);
        for value in &mut list {
            *value += 1;
        }
        let mut sum = 0;
        for value in &list {
            sum += value;
        }
        assert_eq!(sum, 5);
    }

    #[test]
    fn drain_empties_list() {
        let mut list = List::from([1, 2, 3]);
        let drained: Vec<_> = list.drain().collect();
        assert_eq!(drained, vec![1, 2, 3]);
        assert!(list.is_empty());
    }

    #[test]
    fn drain_dropped_early_still_empties() {
        let mut list = List::from([1, 2, 3, 4]);
        {
            let mut drain = list.drain();
            assert_eq!(drain.next(), Some(1));
            assert_eq!(drain.next_back(), Some(4));
        }
        assert!(list.is_empty());
        assert!(list.validate().is_ok());
    }
}
