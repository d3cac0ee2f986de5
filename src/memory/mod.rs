mod cascade;
mod page;
mod state;
mod utilization;

pub(crate) use cascade::CascadeLimiter;
pub use page::{DEFAULT_PAGE_EXPONENT, MAX_PAGE_EXPONENT};
pub(crate) use page::Paging;
pub use state::Stamp;
pub use utilization::Utilization;
