use super::{Children, Handle};
use alloc::string::String;

macro_rules! impl_no_children {
    ($($t:ty),* $(,)?) => {
        $(
            impl Children for $t {
                #[inline(always)]
                fn child(&self, _index: usize) -> Option<Handle> {
                    None
                }
            }
        )*
    };
}

impl_no_children!(
    (),
    bool,
    char,
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    f32,
    f64,
    String,
);
