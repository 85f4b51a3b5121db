use recetas_domain::{CollectionItem, RecentPointer, clock, ingredients};

use crate::{Error, Result};

/// `collection_items` row. Timestamps are Unix milliseconds; ingredients are a JSON array.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct CollectionItemRow {
	pub id: String,
	pub name: String,
	pub category: String,
	pub area: String,
	pub instructions: String,
	pub image_url: String,
	pub ingredients: String,
	pub notes: String,
	pub is_personal: bool,
	pub created_at: i64,
	pub modified_at: i64,
}
impl CollectionItemRow {
	pub fn from_item(item: &CollectionItem) -> Self {
		Self {
			id: item.id.clone(),
			name: item.name.clone(),
			category: item.category.clone(),
			area: item.area.clone(),
			instructions: item.instructions.clone(),
			image_url: item.image_url.clone(),
			ingredients: ingredients::encode(&item.ingredients),
			notes: item.notes.clone(),
			is_personal: item.is_personal,
			created_at: clock::to_millis(item.created_at),
			modified_at: clock::to_millis(item.modified_at),
		}
	}

	pub fn into_item(self) -> Result<CollectionItem> {
		let ingredients = ingredients::decode(&self.ingredients).map_err(|err| {
			Error::InvalidData(format!("Item {} has undecodable ingredients: {err}.", self.id))
		})?;

		Ok(CollectionItem {
			created_at: timestamp(&self.id, self.created_at)?,
			modified_at: timestamp(&self.id, self.modified_at)?,
			id: self.id,
			name: self.name,
			category: self.category,
			area: self.area,
			instructions: self.instructions,
			image_url: self.image_url,
			ingredients,
			notes: self.notes,
			is_personal: self.is_personal,
		})
	}
}

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct RecentPointerRow {
	pub item_id: String,
	pub name: String,
	pub touched_at: i64,
}
impl RecentPointerRow {
	pub fn from_pointer(pointer: &RecentPointer) -> Self {
		Self {
			item_id: pointer.id.clone(),
			name: pointer.name.clone(),
			touched_at: clock::to_millis(pointer.touched_at),
		}
	}

	pub fn into_pointer(self) -> Result<RecentPointer> {
		Ok(RecentPointer {
			touched_at: timestamp(&self.item_id, self.touched_at)?,
			id: self.item_id,
			name: self.name,
		})
	}
}

fn timestamp(id: &str, millis: i64) -> Result<time::OffsetDateTime> {
	clock::from_millis(millis).map_err(|err| {
		Error::InvalidData(format!("Item {id} has an out-of-range timestamp {millis}: {err}."))
	})
}
