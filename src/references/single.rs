use super::{Children, Handle};

/// A single nullable reference slot.
impl Children for Option<Handle> {
    #[inline(always)]
    fn child(&self, index: usize) -> Option<Handle> {
        match index {
            0 => *self,
            _ => None,
        }
    }
}

/// A single reference slot which is never empty.
impl Children for Handle {
    #[inline(always)]
    fn child(&self, index: usize) -> Option<Handle> {
        match index {
            0 => Some(*self),
            _ => None,
        }
    }
}
