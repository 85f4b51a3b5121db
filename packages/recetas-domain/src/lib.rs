pub mod clock;
pub mod ingredients;
pub mod model;
pub mod time_serde;
pub mod validate;

pub use ingredients::Ingredient;
pub use model::{
	CollectionItem, DetailLevel, DetailRecord, INSTRUCTIONS_UNAVAILABLE, PersonalDraft,
	RecentPointer, ResultSummary, SearchType, UNCATEGORIZED, UNKNOWN_AREA,
};
