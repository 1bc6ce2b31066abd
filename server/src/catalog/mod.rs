pub mod pricing;
pub mod search;
pub mod validation;
pub mod workflow;

pub use search::{AdvancedSearch, PriceRange, SearchQuery, SortOrder};
