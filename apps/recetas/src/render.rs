//! Text and JSON rendering of command results.

use std::fmt::Write;

use serde::Serialize;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

use recetas_domain::{CollectionItem, DetailRecord, Ingredient, RecentPointer, clock};
use recetas_service::{
	CollectionStats, DeleteResponse, SaveResponse, SearchResponse, UpdateResponse,
};

type Result<T = String> = color_eyre::Result<T>;

pub struct Output {
	json: bool,
}
impl Output {
	pub fn new(json: bool) -> Self {
		Self { json }
	}

	pub fn search(&self, res: &SearchResponse) -> Result {
		if self.json {
			return to_json(res);
		}

		let mut out = String::new();

		if let Some(message) = res.message.as_deref() {
			writeln!(out, "{message}")?;
		}

		for record in &res.records {
			let mut line = format!("[{}] {}", record.id, record.name);
			let origin = [record.category.as_deref(), record.area.as_deref()]
				.into_iter()
				.flatten()
				.collect::<Vec<_>>()
				.join(", ");

			if !origin.is_empty() {
				write!(line, " ({origin})")?;
			}
			if record.is_degraded() {
				line.push_str(" [summary only]");
			}

			writeln!(out, "{line}")?;
		}

		Ok(out.trim_end().to_string())
	}

	pub fn record(&self, record: &DetailRecord) -> Result {
		if self.json {
			return to_json(record);
		}

		let mut out = String::new();

		writeln!(out, "[{}] {}", record.id, record.name)?;
		writeln!(out, "Category: {}", record.category.as_deref().unwrap_or("-"))?;
		writeln!(out, "Area: {}", record.area.as_deref().unwrap_or("-"))?;

		if let Some(image_url) = record.image_url.as_deref() {
			writeln!(out, "Image: {image_url}")?;
		}

		write_ingredients(&mut out, &record.ingredients)?;
		writeln!(out, "\n{}", record.instructions)?;

		Ok(out.trim_end().to_string())
	}

	pub fn values(&self, values: &[String]) -> Result {
		if self.json {
			return to_json(&values);
		}

		Ok(values.join("\n"))
	}

	pub fn saved(&self, res: &SaveResponse) -> Result {
		if self.json {
			return to_json(res);
		}

		let verb = if res.replaced { "Updated saved" } else { "Saved" };

		Ok(format!("{verb} {} ({}).", res.item.name, res.item.id))
	}

	pub fn updated(&self, res: &UpdateResponse) -> Result {
		if self.json {
			return to_json(res);
		}

		let at = timestamp(res.item.modified_at)?;

		Ok(format!("Updated {} ({}) at {at}.", res.item.name, res.item.id))
	}

	pub fn deleted(&self, res: &DeleteResponse) -> Result {
		if self.json {
			return to_json(res);
		}
		if !res.deleted {
			return Ok(format!("Nothing saved with id {}.", res.id));
		}

		Ok(format!("Deleted {}.", res.id))
	}

	pub fn items(&self, items: &[CollectionItem]) -> Result {
		if self.json {
			return to_json(&items);
		}
		if items.is_empty() {
			return Ok("No saved recipes.".to_string());
		}

		let mut out = String::new();

		for item in items {
			let marker = if item.is_personal { "*" } else { " " };

			writeln!(
				out,
				"{marker} [{}] {} ({}, {}) {}",
				item.id,
				item.name,
				item.category,
				item.area,
				timestamp(item.modified_at)?
			)?;
		}

		Ok(out.trim_end().to_string())
	}

	pub fn item(&self, item: &CollectionItem) -> Result {
		if self.json {
			return to_json(item);
		}

		let mut out = String::new();

		writeln!(out, "[{}] {}", item.id, item.name)?;
		writeln!(out, "Category: {}", item.category)?;
		writeln!(out, "Area: {}", item.area)?;

		if !item.image_url.is_empty() {
			writeln!(out, "Image: {}", item.image_url)?;
		}

		writeln!(out, "Personal: {}", if item.is_personal { "yes" } else { "no" })?;
		writeln!(out, "Created: {}", timestamp(item.created_at)?)?;
		writeln!(out, "Modified: {}", timestamp(item.modified_at)?)?;
		write_ingredients(&mut out, &item.ingredients)?;
		writeln!(out, "\n{}", item.instructions)?;

		if !item.notes.is_empty() {
			writeln!(out, "\nNotes: {}", item.notes)?;
		}

		Ok(out.trim_end().to_string())
	}

	pub fn recent(&self, pointer: Option<&RecentPointer>) -> Result {
		if self.json {
			return to_json(&pointer);
		}

		let Some(pointer) = pointer else {
			return Ok("No recent recipe.".to_string());
		};
		let age = if pointer.is_recent(clock::now()) { "" } else { " (over a day ago)" };

		Ok(format!(
			"{} ({}) at {}{age}",
			pointer.name,
			pointer.id,
			timestamp(pointer.touched_at)?
		))
	}

	pub fn stats(&self, stats: &CollectionStats) -> Result {
		if self.json {
			return to_json(stats);
		}

		let mut out = format!("{} saved, {} personal", stats.total, stats.personal);

		if let Some(item) = stats.last_modified.as_ref() {
			write!(out, "\nLast modified: {} ({})", item.name, item.id)?;
		}

		Ok(out)
	}
}

fn write_ingredients(out: &mut String, ingredients: &[Ingredient]) -> Result<()> {
	if ingredients.is_empty() {
		return Ok(());
	}

	writeln!(out, "Ingredients:")?;

	for ingredient in ingredients {
		if ingredient.measure.is_empty() {
			writeln!(out, "  - {}", ingredient.ingredient)?;
		} else {
			writeln!(out, "  - {}: {}", ingredient.ingredient, ingredient.measure)?;
		}
	}

	Ok(())
}

fn timestamp(value: OffsetDateTime) -> Result {
	Ok(value.format(&Rfc3339)?)
}

fn to_json<T>(value: &T) -> Result
where
	T: ?Sized + Serialize,
{
	Ok(serde_json::to_string_pretty(value)?)
}
