use serde::{Deserialize, Serialize};

use crate::{Error, RecetasService, Result, enrich};
use recetas_domain::{DetailRecord, SearchType, validate};

pub const DEFAULT_CATEGORIES: [&str; 6] =
	["Beef", "Chicken", "Dessert", "Pasta", "Seafood", "Vegetarian"];
pub const DEFAULT_AREAS: [&str; 6] =
	["American", "British", "Chinese", "French", "Italian", "Mexican"];

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SearchRequest {
	pub query: String,
	pub search_type: SearchType,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SearchResponse {
	pub query: String,
	pub search_type: SearchType,
	pub records: Vec<DetailRecord>,
	/// Filter-style searches only.
	pub enrichment: Option<EnrichmentCounts>,
	pub message: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichmentCounts {
	pub available: usize,
	pub requested: usize,
	pub enriched: usize,
}

impl RecetasService {
	pub async fn search(&self, req: SearchRequest) -> Result<SearchResponse> {
		let query = validate::search_term(&req.query)?.to_string();
		let (records, enrichment, message) = if req.search_type.needs_enrichment() {
			let summaries = if req.search_type == SearchType::Category {
				self.catalog.filter_by_category(&query).await?
			} else {
				self.catalog.filter_by_area(&query).await?
			};
			let result = enrich::enrich(&self.catalog, summaries).await;
			let counts = EnrichmentCounts {
				available: result.available,
				requested: result.requested,
				enriched: result.enriched,
			};
			let message = (result.requested > 0).then(|| result.summary());

			(result.records, Some(counts), message)
		} else {
			(self.catalog.search_by_name(&query).await?, None, None)
		};
		let message = if records.is_empty() {
			Some(format!("No recipes found for: {query}"))
		} else {
			message
		};

		tracing::info!(
			search_type = %req.search_type,
			query = %query,
			results = records.len(),
			"Catalog search finished."
		);

		Ok(SearchResponse { query, search_type: req.search_type, records, enrichment, message })
	}

	pub async fn random(&self) -> Result<DetailRecord> {
		self.catalog.random().await?.ok_or_else(|| Error::NotFound {
			message: "The catalog returned no random recipe.".to_string(),
		})
	}

	/// Catalog categories, or the built-in list when the catalog is unreachable.
	pub async fn categories(&self) -> Vec<String> {
		match self.catalog.list_categories().await {
			Ok(values) if !values.is_empty() => values,
			Ok(_) => defaults(&DEFAULT_CATEGORIES),
			Err(err) => {
				tracing::warn!(error = %err, "Failed to list categories. Using defaults.");

				defaults(&DEFAULT_CATEGORIES)
			},
		}
	}

	/// Catalog areas, or the built-in list when the catalog is unreachable.
	pub async fn areas(&self) -> Vec<String> {
		match self.catalog.list_areas().await {
			Ok(values) if !values.is_empty() => values,
			Ok(_) => defaults(&DEFAULT_AREAS),
			Err(err) => {
				tracing::warn!(error = %err, "Failed to list areas. Using defaults.");

				defaults(&DEFAULT_AREAS)
			},
		}
	}
}

fn defaults(values: &[&str]) -> Vec<String> {
	values.iter().map(|value| value.to_string()).collect()
}
