use crate::memory::Stamp;
use core::fmt::{Debug, Display};

/// A handle providing safe and constant time access to an object tracked by a `RefMem`.
///
/// The handle is the identity of the allocation:
/// * `slot` is the position of the object in the object table, and
/// * `stamp` is unique to the allocation.
///
/// Slots are reused after deallocation; stamps are not.
/// Therefore, a handle of a deallocated object never refers to an object allocated later
/// into the same slot, and any access through it fails with [`RefMemError::InvalidHandle`].
///
/// `Option<Handle>` plays the role of a nullable pointer; `None` is accepted and ignored
/// by [`RefMem::retain`] and [`RefMem::release`].
///
/// [`RefMemError::InvalidHandle`]: crate::RefMemError::InvalidHandle
/// [`RefMem::retain`]: crate::RefMem::retain
/// [`RefMem::release`]: crate::RefMem::release
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle {
    slot: usize,
    stamp: Stamp,
}

impl Debug for Handle {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Handle")
            .field("slot", &self.slot)
            .field("stamp", &self.stamp.id)
            .finish()
    }
}

impl Display for Handle {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "#{}@{}", self.slot, self.stamp)
    }
}

impl Handle {
    #[inline(always)]
    pub(crate) fn new(slot: usize, stamp: Stamp) -> Self {
        Self { slot, stamp }
    }

    /// Position of the object in the object table.
    #[inline(always)]
    pub fn slot(&self) -> usize {
        self.slot
    }

    /// Checks whether or not the handle was issued with the given `stamp`.
    #[inline(always)]
    pub fn is_in_state(&self, stamp: Stamp) -> bool {
        self.stamp == stamp
    }
}
