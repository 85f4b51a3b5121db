pub mod meals;

mod error;

pub use error::{Error, Result};

use std::time::Duration;

use reqwest::{
	Client,
	header::{HeaderMap, HeaderValue, USER_AGENT},
};
use serde_json::Value;

use recetas_domain::{DetailRecord, ResultSummary};

/// HTTP client for a TheMealDB-compatible catalog.
#[derive(Clone)]
pub struct CatalogClient {
	http: Client,
	api_base: String,
}
impl CatalogClient {
	pub fn new(cfg: &recetas_config::Catalog) -> Result<Self> {
		let mut headers = HeaderMap::new();

		if let Some(agent) = cfg.user_agent.as_deref() {
			headers.insert(USER_AGENT, HeaderValue::from_str(agent)?);
		}

		let http = Client::builder()
			.timeout(Duration::from_millis(cfg.timeout_ms))
			.default_headers(headers)
			.build()?;

		Ok(Self { http, api_base: cfg.api_base.clone() })
	}

	pub fn api_base(&self) -> &str {
		&self.api_base
	}

	/// `search.php?s=`; name search already returns full records.
	pub async fn search_by_name(&self, name: &str) -> Result<Vec<DetailRecord>> {
		let json = self.get_json("search.php", &[("s", name)]).await?;

		meals::parse_details(&json)
	}

	/// `filter.php?c=`
	pub async fn filter_by_category(&self, category: &str) -> Result<Vec<ResultSummary>> {
		let json = self.get_json("filter.php", &[("c", category)]).await?;

		meals::parse_summaries(&json)
	}

	/// `filter.php?a=`
	pub async fn filter_by_area(&self, area: &str) -> Result<Vec<ResultSummary>> {
		let json = self.get_json("filter.php", &[("a", area)]).await?;

		meals::parse_summaries(&json)
	}

	/// `lookup.php?i=`; `None` when the catalog has no record with this id.
	pub async fn lookup(&self, id: &str) -> Result<Option<DetailRecord>> {
		let json = self.get_json("lookup.php", &[("i", id)]).await?;

		Ok(meals::parse_details(&json)?.into_iter().next())
	}

	pub async fn random(&self) -> Result<Option<DetailRecord>> {
		let json = self.get_json("random.php", &[]).await?;

		Ok(meals::parse_details(&json)?.into_iter().next())
	}

	pub async fn list_categories(&self) -> Result<Vec<String>> {
		let json = self.get_json("categories.php", &[]).await?;

		meals::parse_names(&json, "categories", "strCategory")
	}

	pub async fn list_areas(&self) -> Result<Vec<String>> {
		let json = self.get_json("list.php", &[("a", "list")]).await?;

		meals::parse_names(&json, "meals", "strArea")
	}

	async fn get_json(&self, endpoint: &str, query: &[(&str, &str)]) -> Result<Value> {
		let url = format!("{}{endpoint}", self.api_base);

		tracing::debug!(%url, ?query, "Catalog request.");

		let res = self.http.get(url).query(query).send().await?;
		let json: Value = res.error_for_status()?.json().await?;

		Ok(json)
	}
}
