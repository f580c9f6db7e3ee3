pub mod filter;
pub mod pager;

pub use filter::{apply, BoundKind, DateBound, FilterCriteria, SortOrder};
pub use pager::{LoadTicket, Pager, BATCH_SIZE};
