use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, RecetasService, Result};
use recetas_domain::{
	CollectionItem, DetailRecord, PersonalDraft, RecentPointer, clock, ingredients, validate,
};
use recetas_storage::queries;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PersonalRecipeRequest {
	pub name: String,
	pub category: String,
	pub area: String,
	pub instructions: String,
	/// One ingredient per line, optionally `ingredient: measure`.
	pub ingredients: String,
	pub image_url: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SaveResponse {
	pub item: CollectionItem,
	/// An item with the same id was already in the collection.
	pub replaced: bool,
	pub recent: RecentPointer,
}

impl RecetasService {
	/// Imports a catalog record into the collection.
	///
	/// Re-importing a saved record refreshes its catalog fields but keeps the user's notes and the
	/// original creation time.
	pub async fn save_from_catalog(&self, record: &DetailRecord) -> Result<SaveResponse> {
		if record.id.trim().is_empty() {
			return Err(Error::InvalidRequest {
				message: "Record id must not be empty.".to_string(),
			});
		}

		let mut write = self.db.begin_write().await?;
		let now = clock::now();
		let mut item = CollectionItem::from_detail(record, now);
		let existing = queries::get_item_in(&mut write, &item.id).await?;
		let replaced = existing.is_some();

		if let Some(existing) = existing {
			item.notes = existing.notes;
			item.created_at = existing.created_at;
			item.modified_at = existing.modified_at;

			item.touch(now);
		}

		queries::upsert_item_in(&mut write, &item).await?;
		write.commit().await?;

		let recent = self.record_recent(&item, item.modified_at).await?;

		tracing::info!(id = %item.id, replaced, "Saved catalog recipe.");

		Ok(SaveResponse { item, replaced, recent })
	}

	pub async fn save_by_id(&self, id: &str) -> Result<SaveResponse> {
		let id = validate::required("id", id)?;
		let record = self.catalog.lookup(&id).await?.ok_or_else(|| Error::NotFound {
			message: format!("No catalog recipe with id {id}."),
		})?;

		self.save_from_catalog(&record).await
	}

	pub async fn create_personal(&self, req: PersonalRecipeRequest) -> Result<SaveResponse> {
		let name = validate::recipe_name(&req.name)?.to_string();
		let instructions = validate::instructions(&req.instructions)?.to_string();
		let ingredients = ingredients::parse_lines(validate::ingredients_text(&req.ingredients)?);
		let category = validate::required("category", &req.category)?;
		let area = validate::required("area", &req.area)?;
		let image_url =
			req.image_url.map(|url| url.trim().to_string()).filter(|url| !url.is_empty());
		let draft = PersonalDraft { name, category, area, instructions, image_url, ingredients };
		let now = clock::now();
		let item = CollectionItem::from_draft(Uuid::new_v4().to_string(), draft, now);

		queries::insert_item(&self.db, &item).await?;

		let recent = self.record_recent(&item, now).await?;

		tracing::info!(id = %item.id, "Created personal recipe.");

		Ok(SaveResponse { item, replaced: false, recent })
	}
}
