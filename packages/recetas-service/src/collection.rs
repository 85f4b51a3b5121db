use serde::{Deserialize, Serialize};

use crate::{RecetasService, Result};
use recetas_domain::{CollectionItem, RecentPointer, clock, validate};
use recetas_storage::queries;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CollectionStats {
	pub total: i64,
	pub personal: usize,
	pub last_modified: Option<CollectionItem>,
	pub recent: Option<RecentPointer>,
	/// The recent pointer was touched within the last 24 hours.
	pub recent_is_fresh: bool,
}

impl RecetasService {
	/// Every saved item, most recently modified first.
	pub async fn collection(&self) -> Result<Vec<CollectionItem>> {
		Ok(queries::list_items(&self.db).await?)
	}

	pub async fn get(&self, id: &str) -> Result<Option<CollectionItem>> {
		let id = validate::required("id", id)?;

		Ok(queries::get_item(&self.db, &id).await?)
	}

	/// Case-insensitive substring match on the name.
	pub async fn find_by_name(&self, needle: &str) -> Result<Vec<CollectionItem>> {
		let needle = validate::required("name", needle)?;

		Ok(queries::find_items_by_name(&self.db, &needle).await?)
	}

	pub async fn find_by_category(&self, category: &str) -> Result<Vec<CollectionItem>> {
		let category = validate::required("category", category)?;

		Ok(queries::find_items_by_category(&self.db, &category).await?)
	}

	pub async fn personal(&self) -> Result<Vec<CollectionItem>> {
		Ok(queries::list_personal_items(&self.db).await?)
	}

	pub async fn count(&self) -> Result<i64> {
		Ok(queries::count_items(&self.db).await?)
	}

	pub async fn last_modified(&self) -> Result<Option<CollectionItem>> {
		Ok(queries::most_recently_modified(&self.db).await?)
	}

	pub fn recent(&self) -> Option<RecentPointer> {
		self.tracker.current()
	}

	pub async fn stats(&self) -> Result<CollectionStats> {
		let recent = self.recent();
		let recent_is_fresh =
			recent.as_ref().is_some_and(|pointer| pointer.is_recent(clock::now()));

		Ok(CollectionStats {
			total: self.count().await?,
			personal: self.personal().await?.len(),
			last_modified: self.last_modified().await?,
			recent,
			recent_is_fresh,
		})
	}
}
