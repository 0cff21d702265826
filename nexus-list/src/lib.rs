//! Doubly-linked list over a circular sentinel chain, with cursors.
//!
//! [`List<T>`] stores one element per heap node and keeps a sentinel link
//! that marks both ends of a circular chain. Insertion and removal at a
//! known position are O(1) and never move other elements.
//!
//! # Quick Start
//!
//! ```
//! use nexus_list::List;
//!
//! let mut list = List::from([1, 2, 3]);
//! list.push_back(4);
//! list.push_front(0);
//!
//! assert_eq!(list.len(), 5);
//! assert_eq!(list.front(), Ok(&0));
//! assert_eq!(list.back(), Ok(&4));
//!
//! let evens = list.remove_if(|v| v % 2 == 0);
//! assert_eq!(evens, 3);
//! assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec![1, 3]);
//! ```
//!
//! # Cursors
//!
//! One generic [`Position`] covers the four classic iterator kinds:
//!
//! | Alias | Direction | Borrow | Obtained from |
//! |-------|-----------|--------|---------------|
//! | [`Cursor`] | forward | `&List` | `begin`, `end` |
//! | [`RevCursor`] | reverse | `&List` | `rbegin`, `rend` |
//! | [`CursorMut`] | forward | `&mut List` | `begin_mut`, `end_mut` |
//! | [`RevCursorMut`] | reverse | `&mut List` | `rbegin_mut`, `rend_mut` |
//!
//! The end position is the sentinel. Reading it returns
//! [`ListError::InvalidPosition`] rather than garbage:
//!
//! ```
//! use nexus_list::{List, ListError};
//!
//! let mut list = List::from(["a", "c"]);
//!
//! let mut cursor = list.begin_mut();
//! cursor.move_next();
//! cursor.insert("b");
//! assert_eq!(cursor.get(), Ok(&"b"));
//!
//! assert_eq!(list.end().get(), Err(ListError::InvalidPosition));
//! assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec!["a", "b", "c"]);
//! ```
//!
//! # Errors
//!
//! Every precondition failure is a [`ListError`] returned from the call that
//! violated it: popping or peeking an empty list, reading or removing the
//! end position, and (only on a corrupted chain) a link that should hold an
//! element but does not.
//!
//! # Performance
//!
//! | Operation | Cost |
//! |-----------|------|
//! | push / emplace / pop at either end | O(1), one allocation or free |
//! | insert / pop at a cursor | O(1) |
//! | append another list | O(1) |
//! | `take` (move out) | O(1), allocates the replacement sentinel |
//! | clear / drop / clone / remove_if | O(n) |
//!
//! Cycle-level numbers come from the `#[ignore]`d benches in the `list`
//! module and the criterion suite under `benches/`.

#![warn(missing_docs)]

pub mod cursor;
mod error;
pub mod iter;
mod link;
pub mod list;

pub use cursor::{
    Access, Cursor, CursorMut, Direction, Exclusive, Forward, Position, RevCursor, RevCursorMut,
    Reverse, Shared,
};
pub use error::ListError;
pub use iter::{Drain, IntoIter, Iter, IterMut};
pub use list::List;
