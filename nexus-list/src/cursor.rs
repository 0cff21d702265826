//! Positions into a [`List`].
//!
//! A [`Position`] points at one link of the chain: either an element or the
//! sentinel, which is the end marker. It is generic over two markers:
//!
//! | Marker | Values | Effect |
//! |--------|--------|--------|
//! | `D: Direction` | [`Forward`], [`Reverse`] | Which way `move_next` walks |
//! | `A: Access` | [`Shared`], [`Exclusive`] | `&List` vs `&mut List` borrow |
//!
//! The four combinations have aliases:
//!
//! ```text
//! Cursor<'a, T>        = Position<'a, T, Forward, Shared>     begin(), end()
//! RevCursor<'a, T>     = Position<'a, T, Reverse, Shared>     rbegin(), rend()
//! CursorMut<'a, T>     = Position<'a, T, Forward, Exclusive>  begin_mut(), end_mut()
//! RevCursorMut<'a, T>  = Position<'a, T, Reverse, Exclusive>  rbegin_mut(), rend_mut()
//! ```
//!
//! Dereferencing the end position is a checked error, not undefined
//! behaviour. Positions compare equal when they sit on the same link,
//! whatever their direction or access.
//!
//! # Example
//!
//! ```
//! use nexus_list::{List, ListError};
//!
//! let list = List::from([1, 2, 3]);
//!
//! let mut seen = Vec::new();
//! let mut cursor = list.rbegin();
//! while cursor != list.rend() {
//!     seen.push(*cursor.get()?);
//!     cursor.move_next();
//! }
//! assert_eq!(seen, vec![3, 2, 1]);
//!
//! // Forward and reverse end positions are the same sentinel
//! assert!(list.end() == list.rend());
//! assert_eq!(list.end().get(), Err(ListError::InvalidPosition));
//! # Ok::<(), ListError>(())
//! ```
//!
//! # Editing through a cursor
//!
//! Exclusive cursors insert before their position and pop their element,
//! moving to the inserted element or to the following one respectively:
//!
//! ```
//! use nexus_list::List;
//!
//! let mut list = List::from([1, 2, 4]);
//!
//! let mut cursor = list.begin_mut();
//! cursor.move_next();
//! cursor.move_next();
//! cursor.insert(3);
//! assert_eq!(cursor.get(), Ok(&3));
//!
//! cursor.move_prev();
//! assert_eq!(cursor.pop(), Ok(2));
//! assert_eq!(cursor.get(), Ok(&3));
//!
//! assert_eq!(list, List::from([1, 3, 4]));
//! ```

use core::fmt;
use core::marker::PhantomData;
use core::ptr::NonNull;

use crate::link::{self, LinkPtr};
use crate::{List, ListError};

mod sealed {
    pub trait Sealed {}
}

/// Walking direction of a [`Position`].
pub trait Direction: sealed::Sealed {
    /// `true` if `move_next` follows `prev` links.
    const REVERSED: bool;
}

/// Front-to-back traversal.
#[derive(Debug)]
pub enum Forward {}

/// Back-to-front traversal.
#[derive(Debug)]
pub enum Reverse {}

impl sealed::Sealed for Forward {}
impl sealed::Sealed for Reverse {}

impl Direction for Forward {
    const REVERSED: bool = false;
}

impl Direction for Reverse {
    const REVERSED: bool = true;
}

/// How a [`Position`] borrows its list.
pub trait Access: sealed::Sealed {
    /// The borrow held for the position's lifetime.
    type Borrow<'a, T: 'a>;
}

/// Read-only position; any number may coexist. `Copy`.
#[derive(Debug)]
pub enum Shared {}

/// Editing position; unique for as long as it lives.
#[derive(Debug)]
pub enum Exclusive {}

impl sealed::Sealed for Shared {}
impl sealed::Sealed for Exclusive {}

impl Access for Shared {
    type Borrow<'a, T: 'a> = &'a List<T>;
}

impl Access for Exclusive {
    type Borrow<'a, T: 'a> = &'a mut List<T>;
}

/// Forward, read-only position.
pub type Cursor<'a, T> = Position<'a, T, Forward, Shared>;

/// Reverse, read-only position.
pub type RevCursor<'a, T> = Position<'a, T, Reverse, Shared>;

/// Forward, editing position.
pub type CursorMut<'a, T> = Position<'a, T, Forward, Exclusive>;

/// Reverse, editing position.
pub type RevCursorMut<'a, T> = Position<'a, T, Reverse, Exclusive>;

/// A location in a [`List`]: an element or the end marker.
///
/// See the [module docs](crate::cursor) for the direction and access
/// markers. Moving past the end marker wraps around to the other end, as
/// the chain itself is circular.
pub struct Position<'a, T: 'a, D: Direction = Forward, A: Access = Shared> {
    list: NonNull<List<T>>,
    link: LinkPtr,
    _marker: PhantomData<(A::Borrow<'a, T>, D)>,
}

// =============================================================================
// Any direction, any access
// =============================================================================

impl<'a, T: 'a, D: Direction, A: Access> Position<'a, T, D, A> {
    #[inline]
    fn sentinel(&self) -> LinkPtr {
        // Safety: the list is borrowed for 'a
        unsafe { (*self.list.as_ptr()).sentinel() }
    }

    /// # Safety
    ///
    /// `link` must be a live link.
    #[inline]
    unsafe fn ahead(link: LinkPtr) -> LinkPtr {
        if D::REVERSED {
            unsafe { link::prev(link) }
        } else {
            unsafe { link::next(link) }
        }
    }

    /// # Safety
    ///
    /// `link` must be a live link.
    #[inline]
    unsafe fn behind(link: LinkPtr) -> LinkPtr {
        if D::REVERSED {
            unsafe { link::next(link) }
        } else {
            unsafe { link::prev(link) }
        }
    }

    #[inline]
    fn current(&self) -> Option<&T> {
        // Safety: `link` belongs to the borrowed list
        unsafe { link::value(self.link) }
    }

    /// Returns `true` if the position is the end marker.
    #[inline]
    pub fn is_end(&self) -> bool {
        self.link == self.sentinel()
    }

    /// Steps one element in this position's direction (`++`).
    #[inline]
    pub fn move_next(&mut self) {
        // Safety: `link` belongs to the borrowed list
        self.link = unsafe { Self::ahead(self.link) };
    }

    /// Steps one element against this position's direction (`--`).
    #[inline]
    pub fn move_prev(&mut self) {
        // Safety: `link` belongs to the borrowed list
        self.link = unsafe { Self::behind(self.link) };
    }

    /// Returns a read-only position at the same link.
    #[inline]
    pub fn as_cursor(&self) -> Position<'_, T, D, Shared> {
        Position {
            list: self.list,
            link: self.link,
            _marker: PhantomData,
        }
    }
}

// =============================================================================
// Shared
// =============================================================================

impl<'a, T: 'a, D: Direction> Position<'a, T, D, Shared> {
    #[inline]
    pub(crate) fn new(list: &'a List<T>, link: LinkPtr) -> Self {
        Self {
            list: NonNull::from(list),
            link,
            _marker: PhantomData,
        }
    }

    /// Returns the element at this position.
    ///
    /// The reference borrows the list, not the cursor.
    ///
    /// # Errors
    ///
    /// [`ListError::InvalidPosition`] on the end marker.
    #[inline]
    pub fn get(&self) -> Result<&'a T, ListError> {
        // Safety: the list is shared-borrowed for 'a, so its nodes live and
        // are not mutated for 'a
        unsafe { link::value(self.link) }.ok_or(ListError::InvalidPosition)
    }
}

impl<T, D: Direction> Clone for Position<'_, T, D, Shared> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, D: Direction> Copy for Position<'_, T, D, Shared> {}

// =============================================================================
// Exclusive
// =============================================================================

impl<'a, T: 'a, D: Direction> Position<'a, T, D, Exclusive> {
    #[inline]
    pub(crate) fn new_mut(list: &'a mut List<T>, link: LinkPtr) -> Self {
        Self {
            list: NonNull::from(list),
            link,
            _marker: PhantomData,
        }
    }

    /// Returns the element at this position.
    ///
    /// # Errors
    ///
    /// [`ListError::InvalidPosition`] on the end marker.
    #[inline]
    pub fn get(&self) -> Result<&T, ListError> {
        self.current().ok_or(ListError::InvalidPosition)
    }

    /// Returns the element at this position mutably.
    ///
    /// # Errors
    ///
    /// [`ListError::InvalidPosition`] on the end marker.
    #[inline]
    pub fn get_mut(&mut self) -> Result<&mut T, ListError> {
        // Safety: the list is exclusively borrowed through this cursor
        unsafe { link::value_mut(self.link) }.ok_or(ListError::InvalidPosition)
    }

    /// Inserts `value` just before this position, in this position's
    /// direction, and moves onto the new element.
    ///
    /// On the end marker a forward cursor appends and a reverse cursor
    /// prepends.
    #[inline]
    pub fn insert(&mut self, value: T) {
        // Safety: `link` belongs to the borrowed list, and the pair is
        // adjacent in chain order
        unsafe {
            let (prev, next) = if D::REVERSED {
                (self.link, link::next(self.link))
            } else {
                (link::prev(self.link), self.link)
            };
            self.link = self.list.as_mut().link_in(prev, next, value);
        }
    }

    /// Builds a value with `make`, inserts it like [`insert`](Self::insert)
    /// and returns a reference to it.
    #[inline]
    pub fn emplace<F: FnOnce() -> T>(&mut self, make: F) -> &mut T {
        self.insert(make());
        // Safety: `insert` just moved the cursor onto a fresh node
        unsafe { link::value_unchecked_mut(self.link) }
    }

    /// Removes the element at this position and moves to the following one
    /// (in this position's direction). Returns the removed value.
    ///
    /// # Errors
    ///
    /// - [`ListError::EmptyContainer`] if the list is empty.
    /// - [`ListError::InvalidRemovalTarget`] on the end marker.
    #[inline]
    pub fn pop(&mut self) -> Result<T, ListError> {
        // Safety: the list is exclusively borrowed through this cursor
        if unsafe { self.list.as_ref() }.is_empty() {
            return Err(ListError::empty("pop"));
        }
        self.remove_current().ok_or(ListError::InvalidRemovalTarget)
    }

    /// Removes the element at this position and moves to the following one.
    ///
    /// Returns `None`, leaving the cursor in place, on the end marker.
    #[inline]
    pub fn remove_current(&mut self) -> Option<T> {
        if self.is_end() {
            return None;
        }

        // Safety: `link` is an element node of the exclusively borrowed list
        unsafe {
            let following = Self::ahead(self.link);
            let value = self.list.as_mut().unlink(self.link);
            self.link = following;
            Some(value)
        }
    }
}

// Safety: a shared position behaves like `&'a List<T>`
unsafe impl<T: Sync, D: Direction> Send for Position<'_, T, D, Shared> {}
// Safety: a shared position behaves like `&'a List<T>`
unsafe impl<T: Sync, D: Direction> Sync for Position<'_, T, D, Shared> {}
// Safety: an exclusive position behaves like `&'a mut List<T>`
unsafe impl<T: Send, D: Direction> Send for Position<'_, T, D, Exclusive> {}
// Safety: through `&Position` an exclusive position only hands out `&T`
unsafe impl<T: Sync, D: Direction> Sync for Position<'_, T, D, Exclusive> {}

impl<'a, T: 'a, D: Direction> From<Position<'a, T, D, Exclusive>> for Position<'a, T, D, Shared> {
    #[inline]
    fn from(position: Position<'a, T, D, Exclusive>) -> Self {
        Self {
            list: position.list,
            link: position.link,
            _marker: PhantomData,
        }
    }
}

// =============================================================================
// Comparison and formatting
// =============================================================================

impl<'a, 'b, T, D1, D2, A1, A2> PartialEq<Position<'b, T, D2, A2>> for Position<'a, T, D1, A1>
where
    D1: Direction,
    D2: Direction,
    A1: Access,
    A2: Access,
{
    #[inline]
    fn eq(&self, other: &Position<'b, T, D2, A2>) -> bool {
        self.link == other.link
    }
}

impl<T, D: Direction, A: Access> Eq for Position<'_, T, D, A> {}

impl<T: fmt::Debug, D: Direction, A: Access> fmt::Debug for Position<'_, T, D, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Position")
            .field("reversed", &D::REVERSED)
            .field("value", &self.current())
            .finish()
    }
}
