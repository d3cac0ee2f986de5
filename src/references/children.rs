use super::Handle;

/// Child references declared by a value stored in a `RefMem`.
///
/// A value owns its children through numbered reference slots: `child(0)`, `child(1)`, and so on.
/// When an object is allocated with `pointers = k`, its default teardown releases the
/// children in the first `k` slots; for arrays this applies to every element.
///
/// Slots are declared by the type rather than by memory layout; an implementation returns
/// `None` for an empty slot as well as for an index beyond the slots it declares.
///
/// # Examples
///
/// ```rust
/// use orx_refmem::*;
///
/// #[derive(Default)]
/// struct Cell {
///     next: Option<Handle>,
///     label: Option<Handle>,
///     value: i32,
/// }
///
/// impl Children for Cell {
///     fn child(&self, index: usize) -> Option<Handle> {
///         match index {
///             0 => self.next,
///             1 => self.label,
///             _ => None,
///         }
///     }
/// }
/// ```
pub trait Children {
    /// Returns the child held in the reference slot at the given `index`;
    /// None if the slot is empty or is not declared.
    fn child(&self, index: usize) -> Option<Handle>;
}
