//! Raw link chain primitives.
//!
//! The list is a circular chain of [`Link`]s anchored at a sentinel. Every
//! link carries a [`LinkKind`] tag: the sentinel is a bare `Link`, every
//! element is a [`Node`] whose first field is its `Link`. The tag is checked
//! before a link pointer is ever reinterpreted as a `Node<T>`, so the
//! sentinel never needs a payload.
//!
//! ```text
//!        +-----------------------------------------------+
//!        v                                               |
//!   [sentinel] <-> [node a] <-> [node b] <-> [node c] <--+
//!        ^                                       |
//!        +---------------------------------------+
//! ```
//!
//! Everything here works on raw pointers. Callers (the list and its
//! cursors) are responsible for only passing pointers that belong to a
//! live chain.

use core::ptr::NonNull;

/// Pointer to a link in a chain.
pub(crate) type LinkPtr = NonNull<Link>;

/// What a link is embedded in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LinkKind {
    /// The end marker. Has no payload.
    Sentinel,
    /// An element. The link is the first field of a `Node<T>`.
    Node,
}

/// Prev/next pair plus the kind tag.
#[repr(C)]
pub(crate) struct Link {
    prev: LinkPtr,
    next: LinkPtr,
    kind: LinkKind,
}

/// A link followed by one element.
///
/// `#[repr(C)]` puts `link` at offset 0, so a `*mut Node<T>` and a pointer
/// to its link are the same address.
#[repr(C)]
pub(crate) struct Node<T> {
    link: Link,
    value: T,
}

/// Allocates a sentinel whose prev and next point at itself.
pub(crate) fn sentinel() -> LinkPtr {
    let ptr = NonNull::from(Box::leak(Box::new(Link {
        prev: NonNull::dangling(),
        next: NonNull::dangling(),
        kind: LinkKind::Sentinel,
    })));
    // Safety: freshly allocated, nothing else points at it
    unsafe { reset(ptr) };
    ptr
}

/// Releases a sentinel allocated by [`sentinel`].
///
/// # Safety
///
/// `ptr` must come from [`sentinel`] and must not be used afterwards.
pub(crate) unsafe fn free_sentinel(ptr: LinkPtr) {
    debug_assert_eq!(unsafe { kind(ptr) }, LinkKind::Sentinel);
    drop(unsafe { Box::from_raw(ptr.as_ptr()) });
}

/// Points a link's prev and next at itself (the empty chain).
///
/// # Safety
///
/// `ptr` must be a live link.
#[inline]
pub(crate) unsafe fn reset(ptr: LinkPtr) {
    unsafe {
        (*ptr.as_ptr()).prev = ptr;
        (*ptr.as_ptr()).next = ptr;
    }
}

/// # Safety
///
/// `ptr` must be a live link.
#[inline]
pub(crate) unsafe fn next(ptr: LinkPtr) -> LinkPtr {
    unsafe { (*ptr.as_ptr()).next }
}

/// # Safety
///
/// `ptr` must be a live link.
#[inline]
pub(crate) unsafe fn prev(ptr: LinkPtr) -> LinkPtr {
    unsafe { (*ptr.as_ptr()).prev }
}

/// # Safety
///
/// `ptr` must be a live link.
#[inline]
pub(crate) unsafe fn kind(ptr: LinkPtr) -> LinkKind {
    unsafe { (*ptr.as_ptr()).kind }
}

/// Rewires `prev <-> next` to be adjacent. Used by bulk splices.
///
/// # Safety
///
/// Both pointers must be live links of the same chain.
#[inline]
pub(crate) unsafe fn join(prev: LinkPtr, next: LinkPtr) {
    unsafe {
        (*prev.as_ptr()).next = next;
        (*next.as_ptr()).prev = prev;
    }
}

/// Allocates a node holding `value` and splices it between `prev` and
/// `next`, which must be adjacent.
///
/// # Safety
///
/// `prev` and `next` must be live, adjacent links of the same chain
/// (`prev.next == next`).
#[inline]
pub(crate) unsafe fn splice_in<T>(prev: LinkPtr, next: LinkPtr, value: T) -> LinkPtr {
    let node = NonNull::from(Box::leak(Box::new(Node {
        link: Link {
            prev,
            next,
            kind: LinkKind::Node,
        },
        value,
    })));
    let ptr = node.cast::<Link>();
    unsafe {
        (*prev.as_ptr()).next = ptr;
        (*next.as_ptr()).prev = ptr;
    }
    ptr
}

/// Unlinks a node from its neighbours, frees it and returns its value.
///
/// # Safety
///
/// `ptr` must be a live link of kind [`LinkKind::Node`] allocated by
/// [`splice_in`] with the same `T`.
#[inline]
pub(crate) unsafe fn splice_out<T>(ptr: LinkPtr) -> T {
    debug_assert_eq!(unsafe { kind(ptr) }, LinkKind::Node);
    unsafe {
        join(prev(ptr), next(ptr));
        let node = Box::from_raw(ptr.cast::<Node<T>>().as_ptr());
        node.value
    }
}

/// Returns the element held by `ptr`, or `None` if `ptr` is a sentinel.
///
/// # Safety
///
/// `ptr` must be a live link; if it is a node it must hold a `T`. The
/// returned reference must not outlive the node or alias a `&mut T`.
#[inline]
pub(crate) unsafe fn value<'a, T>(ptr: LinkPtr) -> Option<&'a T> {
    match unsafe { kind(ptr) } {
        LinkKind::Node => Some(unsafe { &(*ptr.cast::<Node<T>>().as_ptr()).value }),
        LinkKind::Sentinel => None,
    }
}

/// Mutable counterpart of [`value`].
///
/// # Safety
///
/// As for [`value`], and the caller must hold exclusive access to the node.
#[inline]
pub(crate) unsafe fn value_mut<'a, T>(ptr: LinkPtr) -> Option<&'a mut T> {
    match unsafe { kind(ptr) } {
        LinkKind::Node => Some(unsafe { value_unchecked_mut(ptr) }),
        LinkKind::Sentinel => None,
    }
}

/// Returns the element held by a link already known to be a node.
///
/// # Safety
///
/// `ptr` must be a live node holding a `T`, and the caller must hold
/// exclusive access to it.
#[inline]
pub(crate) unsafe fn value_unchecked_mut<'a, T>(ptr: LinkPtr) -> &'a mut T {
    debug_assert_eq!(unsafe { kind(ptr) }, LinkKind::Node);
    unsafe { &mut (*ptr.cast::<Node<T>>().as_ptr()).value }
}

/// Overwrites a link's tag.
///
/// # Safety
///
/// `ptr` must be a live link. The chain is inconsistent until the tag is
/// restored.
#[cfg(test)]
pub(crate) unsafe fn retag(ptr: LinkPtr, kind: LinkKind) {
    unsafe { (*ptr.as_ptr()).kind = kind };
}

/// Overwrites a link's `prev` pointer without touching its neighbour.
///
/// # Safety
///
/// As for [`retag`].
#[cfg(test)]
pub(crate) unsafe fn set_prev(ptr: LinkPtr, prev: LinkPtr) {
    unsafe { (*ptr.as_ptr()).prev = prev };
}
