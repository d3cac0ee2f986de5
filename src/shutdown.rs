use core::fmt::Display;

/// How [`RefMem::shutdown`] drains the objects which are still tracked.
///
/// [`RefMem::shutdown`]: crate::RefMem::shutdown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownMode {
    /// Frees every object without invoking any teardown.
    Forced,
    /// Runs the teardown of every object.
    ///
    /// Unowned objects are drained first; objects that are still held are then torn down one at a time.
    /// Releases of objects which have already been drained are ignored.
    Ordered,
}

impl Display for ShutdownMode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Forced => write!(f, "forced"),
            Self::Ordered => write!(f, "ordered"),
        }
    }
}

/// Summary of a shutdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShutdownReport {
    /// Mode of the shutdown.
    pub mode: ShutdownMode,
    /// Number of objects reclaimed by the shutdown.
    pub reclaimed: usize,
    /// Number of times the object table grew or shrank during the lifetime of the registry.
    pub resizes: usize,
}
