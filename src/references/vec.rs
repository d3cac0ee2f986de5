use super::{Children, Handle};
use alloc::boxed::Box;
use alloc::vec::Vec;

/// A dynamic number of reference slots.
impl Children for Vec<Option<Handle>> {
    #[inline(always)]
    fn child(&self, index: usize) -> Option<Handle> {
        self.get(index).copied().flatten()
    }
}

impl<T: Children> Children for Box<T> {
    #[inline(always)]
    fn child(&self, index: usize) -> Option<Handle> {
        self.as_ref().child(index)
    }
}
