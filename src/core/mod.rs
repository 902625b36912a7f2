// Core engine exports
pub mod feasibility;
pub mod profile;
pub mod recommender;
pub mod similarity;
pub mod text;

pub use feasibility::{budget_limit, is_feasible, meets_capacity, required_capacity, within_budget};
pub use profile::{profile_for, CategoryProfile};
pub use recommender::{RecommendError, Recommender, DEFAULT_TOP_K};
pub use similarity::similarity_to_query;
pub use text::normalize_record;
