use serde::{Deserialize, Serialize};

use crate::{Error, RecetasService, Result};
use recetas_domain::{CollectionItem, RecentPointer, clock, ingredients, validate};
use recetas_storage::queries;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NotesRequest {
	pub id: String,
	pub notes: String,
}

/// Field edits for a saved item. Absent fields are left unchanged.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct EditRequest {
	pub id: String,
	pub name: Option<String>,
	pub category: Option<String>,
	pub area: Option<String>,
	pub instructions: Option<String>,
	/// An empty string clears the image.
	pub image_url: Option<String>,
	/// One ingredient per line, optionally `ingredient: measure`.
	pub ingredients: Option<String>,
}
impl EditRequest {
	fn is_empty(&self) -> bool {
		self.name.is_none()
			&& self.category.is_none()
			&& self.area.is_none()
			&& self.instructions.is_none()
			&& self.image_url.is_none()
			&& self.ingredients.is_none()
	}
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UpdateResponse {
	pub item: CollectionItem,
	pub recent: RecentPointer,
}

impl RecetasService {
	pub async fn update_notes(&self, req: NotesRequest) -> Result<UpdateResponse> {
		let notes = validate::notes(&req.notes)?.to_string();

		self.store_edit(&req.id, move |item| item.notes = notes).await
	}

	pub async fn edit(&self, req: EditRequest) -> Result<UpdateResponse> {
		if req.is_empty() {
			return Err(Error::InvalidRequest {
				message: "At least one field must be edited.".to_string(),
			});
		}

		let name = req.name.as_deref().map(validate::recipe_name).transpose()?.map(str::to_string);
		let category =
			req.category.as_deref().map(|raw| validate::required("category", raw)).transpose()?;
		let area = req.area.as_deref().map(|raw| validate::required("area", raw)).transpose()?;
		let instructions =
			req.instructions.as_deref().map(validate::instructions).transpose()?.map(str::to_string);
		let image_url = req.image_url.as_deref().map(|raw| raw.trim().to_string());
		let parsed = match req.ingredients.as_deref() {
			Some(text) => Some(ingredients::parse_lines(validate::ingredients_text(text)?)),
			None => None,
		};

		self.store_edit(&req.id, move |item| {
			if let Some(name) = name {
				item.name = name;
			}
			if let Some(category) = category {
				item.category = category;
			}
			if let Some(area) = area {
				item.area = area;
			}
			if let Some(instructions) = instructions {
				item.instructions = instructions;
			}
			if let Some(image_url) = image_url {
				item.image_url = image_url;
			}
			if let Some(parsed) = parsed {
				item.ingredients = parsed;
			}
		})
		.await
	}

	/// Applies `change` to the stored item, refreshes `modified_at` and moves the recent pointer
	/// to it. The read and the write share one write transaction.
	async fn store_edit<F>(&self, id: &str, change: F) -> Result<UpdateResponse>
	where
		F: FnOnce(&mut CollectionItem),
	{
		let id = validate::required("id", id)?;
		let not_found = || Error::NotFound { message: format!("No saved recipe with id {id}.") };
		let mut write = self.db.begin_write().await?;
		let mut item = queries::get_item_in(&mut write, &id).await?.ok_or_else(not_found)?;

		change(&mut item);
		item.touch(clock::now());

		if !queries::update_item_in(&mut write, &item).await? {
			return Err(not_found());
		}

		write.commit().await?;

		let recent = self.record_recent(&item, item.modified_at).await?;

		tracing::info!(id = %item.id, "Updated saved recipe.");

		Ok(UpdateResponse { item, recent })
	}
}
