pub mod collection;
pub mod delete;
pub mod enrich;
pub mod recent;
pub mod save;
pub mod search;
pub mod update;

mod error;

pub use collection::CollectionStats;
pub use delete::{DeleteRequest, DeleteResponse};
pub use enrich::{ENRICH_CAP, Enrichment};
pub use error::{Error, Result};
pub use recent::RecentItemTracker;
pub use save::{PersonalRecipeRequest, SaveResponse};
pub use search::{
	DEFAULT_AREAS, DEFAULT_CATEGORIES, EnrichmentCounts, SearchRequest, SearchResponse,
};
pub use update::{EditRequest, NotesRequest, UpdateResponse};

use std::{future::Future, pin::Pin, sync::Arc};

use time::OffsetDateTime;

use recetas_catalog::CatalogClient;
use recetas_config::Config;
use recetas_domain::{CollectionItem, DetailRecord, RecentPointer, ResultSummary};
use recetas_storage::{db::Db, queries};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Remote recipe catalog.
pub trait CatalogProvider
where
	Self: Send + Sync,
{
	fn search_by_name<'a>(&'a self, name: &'a str) -> BoxFuture<'a, Result<Vec<DetailRecord>>>;

	fn filter_by_category<'a>(
		&'a self,
		category: &'a str,
	) -> BoxFuture<'a, Result<Vec<ResultSummary>>>;

	fn filter_by_area<'a>(&'a self, area: &'a str) -> BoxFuture<'a, Result<Vec<ResultSummary>>>;

	/// `Ok(None)` means the catalog has no record with this id.
	fn lookup<'a>(&'a self, id: &'a str) -> BoxFuture<'a, Result<Option<DetailRecord>>>;

	fn random(&self) -> BoxFuture<'_, Result<Option<DetailRecord>>>;

	fn list_categories(&self) -> BoxFuture<'_, Result<Vec<String>>>;

	fn list_areas(&self) -> BoxFuture<'_, Result<Vec<String>>>;
}

pub struct RecetasService {
	pub cfg: Config,
	pub db: Db,
	pub catalog: Arc<dyn CatalogProvider>,
	pub tracker: RecentItemTracker,
}
impl RecetasService {
	/// Wires the HTTP catalog client described by `cfg.catalog`.
	pub fn new(cfg: Config, db: Db) -> Result<Self> {
		let catalog = Arc::new(CatalogClient::new(&cfg.catalog)?);

		Ok(Self::with_catalog(cfg, db, catalog))
	}

	pub fn with_catalog(cfg: Config, db: Db, catalog: Arc<dyn CatalogProvider>) -> Self {
		Self { cfg, db, catalog, tracker: RecentItemTracker::new() }
	}

	/// Seeds the tracker from the persisted pointer.
	pub async fn restore_recent(&self) -> Result<Option<RecentPointer>> {
		let pointer = queries::load_recent(&self.db).await?;

		self.tracker.restore(pointer.clone());

		Ok(pointer)
	}

	/// Points the tracker at `item` and persists the pointer.
	pub(crate) async fn record_recent(
		&self,
		item: &CollectionItem,
		now: OffsetDateTime,
	) -> Result<RecentPointer> {
		let pointer = self.tracker.record_touch_at(&item.id, &item.name, now);

		queries::save_recent(&self.db, &pointer).await?;

		Ok(pointer)
	}
}

impl CatalogProvider for CatalogClient {
	fn search_by_name<'a>(&'a self, name: &'a str) -> BoxFuture<'a, Result<Vec<DetailRecord>>> {
		Box::pin(async move { Ok(CatalogClient::search_by_name(self, name).await?) })
	}

	fn filter_by_category<'a>(
		&'a self,
		category: &'a str,
	) -> BoxFuture<'a, Result<Vec<ResultSummary>>> {
		Box::pin(async move { Ok(CatalogClient::filter_by_category(self, category).await?) })
	}

	fn filter_by_area<'a>(&'a self, area: &'a str) -> BoxFuture<'a, Result<Vec<ResultSummary>>> {
		Box::pin(async move { Ok(CatalogClient::filter_by_area(self, area).await?) })
	}

	fn lookup<'a>(&'a self, id: &'a str) -> BoxFuture<'a, Result<Option<DetailRecord>>> {
		Box::pin(async move { Ok(CatalogClient::lookup(self, id).await?) })
	}

	fn random(&self) -> BoxFuture<'_, Result<Option<DetailRecord>>> {
		Box::pin(async move { Ok(CatalogClient::random(self).await?) })
	}

	fn list_categories(&self) -> BoxFuture<'_, Result<Vec<String>>> {
		Box::pin(async move { Ok(CatalogClient::list_categories(self).await?) })
	}

	fn list_areas(&self) -> BoxFuture<'_, Result<Vec<String>>> {
		Box::pin(async move { Ok(CatalogClient::list_areas(self).await?) })
	}
}
