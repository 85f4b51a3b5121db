use serde::{Deserialize, Serialize};

/// One `(ingredient, measure)` pair. The measure may be empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
	pub ingredient: String,
	pub measure: String,
}
impl Ingredient {
	pub fn new(ingredient: impl Into<String>, measure: impl Into<String>) -> Self {
		Self { ingredient: ingredient.into(), measure: measure.into() }
	}
}

/// Encodes ingredients as a JSON array of `{"ingredient", "measure"}` objects.
pub fn encode(ingredients: &[Ingredient]) -> String {
	serde_json::to_string(ingredients).unwrap_or_else(|_| "[]".to_string())
}

pub fn decode(raw: &str) -> Result<Vec<Ingredient>, serde_json::Error> {
	if raw.trim().is_empty() {
		return Ok(Vec::new());
	}

	serde_json::from_str(raw)
}

/// Parses user-authored ingredient text, one ingredient per line.
///
/// A line of the form `ingredient: measure` is split on the first colon; any other line becomes an
/// ingredient with an empty measure. Blank lines are skipped.
pub fn parse_lines(text: &str) -> Vec<Ingredient> {
	text.lines()
		.map(str::trim)
		.filter(|line| !line.is_empty())
		.map(|line| match line.split_once(':') {
			Some((ingredient, measure)) if !ingredient.trim().is_empty() =>
				Ingredient::new(ingredient.trim(), measure.trim()),
			_ => Ingredient::new(line, ""),
		})
		.collect()
}
