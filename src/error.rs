use crate::{BlockKind, DestructorId, Handle};

/// Errors of the operations on a `RefMem`.
///
/// Each of these is a violation of the ownership contract by the caller rather than a
/// recoverable runtime condition; they are reported instead of corrupting the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RefMemError {
    /// The handle was never issued by this registry, or its object is already deallocated.
    #[error("handle {0} does not refer to a live object")]
    InvalidHandle(Handle),
    /// The object is released while its reference count is already zero.
    #[error("object {0} is released while its reference count is zero")]
    Underflow(Handle),
    /// A scalar block is accessed as an array, or vice versa.
    #[error("object {handle} is not a {expected} block")]
    BlockKind {
        /// Handle of the accessed object.
        handle: Handle,
        /// Kind of block the access required.
        expected: BlockKind,
    },
    /// An array element is accessed beyond the length of the array.
    #[error("index {index} is out of bounds for array {handle} of length {len}")]
    IndexOutOfBounds {
        /// Handle of the array.
        handle: Handle,
        /// Requested element index.
        index: usize,
        /// Number of elements of the array.
        len: usize,
    },
    /// The teardown refers to a destructor which is not registered to this registry.
    #[error("destructor {0} is not registered")]
    UnknownDestructor(DestructorId),
}
