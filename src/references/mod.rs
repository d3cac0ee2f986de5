mod array;
mod children;
mod handle;
mod none;
mod single;
mod vec;

pub use children::Children;
pub use handle::Handle;
