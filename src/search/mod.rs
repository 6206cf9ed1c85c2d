//! Query construction, pagination, and result normalization.

mod normalize;
mod paginate;
mod request;

pub use normalize::{NormalizedItem, normalize};
pub use paginate::{AggregatedResult, Page, Paginator};
pub use request::{WireRequest, build};
