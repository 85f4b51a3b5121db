use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

use crate::ingredients::Ingredient;

pub const UNCATEGORIZED: &str = "Uncategorized";
pub const UNKNOWN_AREA: &str = "Unknown";
pub const INSTRUCTIONS_UNAVAILABLE: &str =
	"Instructions unavailable. Search by name to get the full recipe.";

const RECENT_WINDOW: Duration = Duration::hours(24);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchType {
	Name,
	Category,
	Area,
}
impl SearchType {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Name => "name",
			Self::Category => "category",
			Self::Area => "area",
		}
	}

	/// Filter-style queries return summaries that need enrichment.
	pub fn needs_enrichment(self) -> bool {
		matches!(self, Self::Category | Self::Area)
	}
}
impl fmt::Display for SearchType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}
impl FromStr for SearchType {
	type Err = String;

	fn from_str(raw: &str) -> Result<Self, Self::Err> {
		match raw.trim().to_ascii_lowercase().as_str() {
			"name" => Ok(Self::Name),
			"category" => Ok(Self::Category),
			"area" => Ok(Self::Area),
			other =>
				Err(format!("Unknown search type {other:?}; expected name, category, or area.")),
		}
	}
}

/// Partial record produced by filter-style catalog queries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultSummary {
	pub id: String,
	pub name: String,
	pub category: Option<String>,
	pub area: Option<String>,
	pub image_url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetailLevel {
	Full,
	/// Filled from a summary after its lookup failed.
	Degraded,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailRecord {
	pub id: String,
	pub name: String,
	pub category: Option<String>,
	pub area: Option<String>,
	pub instructions: String,
	pub image_url: Option<String>,
	pub ingredients: Vec<Ingredient>,
	pub detail: DetailLevel,
}
impl DetailRecord {
	pub fn degraded(summary: ResultSummary) -> Self {
		Self {
			id: summary.id,
			name: summary.name,
			category: summary.category,
			area: summary.area,
			instructions: String::new(),
			image_url: summary.image_url,
			ingredients: Vec::new(),
			detail: DetailLevel::Degraded,
		}
	}

	pub fn is_degraded(&self) -> bool {
		self.detail == DetailLevel::Degraded
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionItem {
	pub id: String,
	pub name: String,
	pub category: String,
	pub area: String,
	pub instructions: String,
	pub image_url: String,
	pub ingredients: Vec<Ingredient>,
	pub notes: String,
	pub is_personal: bool,
	#[serde(with = "crate::time_serde")]
	pub created_at: OffsetDateTime,
	#[serde(with = "crate::time_serde")]
	pub modified_at: OffsetDateTime,
}
impl CollectionItem {
	/// Imports a catalog record, filling the fields the catalog left out.
	pub fn from_detail(record: &DetailRecord, now: OffsetDateTime) -> Self {
		let instructions = if record.instructions.trim().is_empty() {
			INSTRUCTIONS_UNAVAILABLE.to_string()
		} else {
			record.instructions.clone()
		};

		Self {
			id: record.id.clone(),
			name: record.name.clone(),
			category: non_blank_or(record.category.as_deref(), UNCATEGORIZED),
			area: non_blank_or(record.area.as_deref(), UNKNOWN_AREA),
			instructions,
			image_url: record.image_url.clone().unwrap_or_default(),
			ingredients: record.ingredients.clone(),
			notes: String::new(),
			is_personal: false,
			created_at: now,
			modified_at: now,
		}
	}

	pub fn from_draft(id: String, draft: PersonalDraft, now: OffsetDateTime) -> Self {
		Self {
			id,
			name: draft.name,
			category: draft.category,
			area: draft.area,
			instructions: draft.instructions,
			image_url: draft.image_url.unwrap_or_default(),
			ingredients: draft.ingredients,
			notes: String::new(),
			is_personal: true,
			created_at: now,
			modified_at: now,
		}
	}

	/// Refreshes `modified_at` without ever moving it backwards.
	pub fn touch(&mut self, now: OffsetDateTime) {
		self.modified_at = self.modified_at.max(now);
	}
}

/// A user-authored recipe before it receives an identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalDraft {
	pub name: String,
	pub category: String,
	pub area: String,
	pub instructions: String,
	pub image_url: Option<String>,
	pub ingredients: Vec<Ingredient>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentPointer {
	pub id: String,
	pub name: String,
	#[serde(with = "crate::time_serde")]
	pub touched_at: OffsetDateTime,
}
impl RecentPointer {
	/// True when the pointer was written within the last 24 hours.
	pub fn is_recent(&self, now: OffsetDateTime) -> bool {
		now - self.touched_at < RECENT_WINDOW
	}
}

fn non_blank_or(value: Option<&str>, fallback: &str) -> String {
	match value.map(str::trim) {
		Some(value) if !value.is_empty() => value.to_string(),
		_ => fallback.to_string(),
	}
}
