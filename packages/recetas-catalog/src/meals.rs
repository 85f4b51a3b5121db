//! Parsing of catalog response bodies.
//!
//! Every endpoint wraps its records in a single array (`meals`, or `categories` for the category
//! listing). A `null` array means "no results" and parses as an empty list.

use serde_json::{Map, Value};

use crate::{Error, Result};
use recetas_domain::{DetailLevel, DetailRecord, Ingredient, ResultSummary};

/// Numbered `strIngredientN` / `strMeasureN` slots per record.
pub const INGREDIENT_SLOTS: usize = 20;

pub fn parse_details(json: &Value) -> Result<Vec<DetailRecord>> {
	records(json, "meals")?.into_iter().map(parse_detail).collect()
}

pub fn parse_summaries(json: &Value) -> Result<Vec<ResultSummary>> {
	records(json, "meals")?.into_iter().map(parse_summary).collect()
}

/// Extracts one string field from every record, skipping blanks.
pub fn parse_names(json: &Value, key: &str, field: &str) -> Result<Vec<String>> {
	let names = records(json, key)?
		.into_iter()
		.filter_map(|record| text(record, field))
		.map(str::to_string)
		.collect();

	Ok(names)
}

pub fn parse_detail(record: &Map<String, Value>) -> Result<DetailRecord> {
	let mut ingredients = Vec::new();

	for slot in 1..=INGREDIENT_SLOTS {
		let Some(ingredient) = text(record, &format!("strIngredient{slot}")) else {
			continue;
		};
		let measure = text(record, &format!("strMeasure{slot}")).unwrap_or_default();

		ingredients.push(Ingredient::new(ingredient, measure));
	}

	Ok(DetailRecord {
		id: identifier(record)?,
		name: text(record, "strMeal").unwrap_or_default().to_string(),
		category: text(record, "strCategory").map(str::to_string),
		area: text(record, "strArea").map(str::to_string),
		instructions: text(record, "strInstructions").unwrap_or_default().to_string(),
		image_url: text(record, "strMealThumb").map(str::to_string),
		ingredients,
		detail: DetailLevel::Full,
	})
}

pub fn parse_summary(record: &Map<String, Value>) -> Result<ResultSummary> {
	Ok(ResultSummary {
		id: identifier(record)?,
		name: text(record, "strMeal").unwrap_or_default().to_string(),
		category: text(record, "strCategory").map(str::to_string),
		area: text(record, "strArea").map(str::to_string),
		image_url: text(record, "strMealThumb").map(str::to_string),
	})
}

fn records<'a>(json: &'a Value, key: &str) -> Result<Vec<&'a Map<String, Value>>> {
	let Some(array) = json.get(key).or_else(|| json.get("meals")) else {
		return Err(Error::InvalidResponse {
			message: format!("Catalog response is missing the {key} array."),
		});
	};

	match array {
		Value::Null => Ok(Vec::new()),
		Value::Array(items) => items
			.iter()
			.map(|item| {
				item.as_object().ok_or_else(|| Error::InvalidResponse {
					message: "Catalog record must be an object.".to_string(),
				})
			})
			.collect(),
		_ => Err(Error::InvalidResponse {
			message: format!("Catalog {key} field must be an array or null."),
		}),
	}
}

fn identifier(record: &Map<String, Value>) -> Result<String> {
	match record.get("idMeal") {
		Some(Value::String(id)) if !id.trim().is_empty() => Ok(id.trim().to_string()),
		Some(Value::Number(id)) => Ok(id.to_string()),
		_ => Err(Error::InvalidResponse {
			message: "Catalog record is missing idMeal.".to_string(),
		}),
	}
}

/// Trimmed, non-empty string field.
fn text<'a>(record: &'a Map<String, Value>, field: &str) -> Option<&'a str> {
	record.get(field).and_then(Value::as_str).map(str::trim).filter(|value| !value.is_empty())
}
