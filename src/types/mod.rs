//! Domain model: search domains, searchable zones, match modes, and the
//! validated criteria value object.

mod criteria;
mod domain;

pub use criteria::{CriteriaBuilder, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, SearchCriteria};
pub use domain::{BulletinFlag, FieldSelector, MatchMode, SearchDomain, SortOrder};
