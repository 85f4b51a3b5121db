use std::fmt;

pub const SEARCH_TERM_MIN_CHARS: usize = 2;
pub const NAME_MIN_CHARS: usize = 3;
pub const NAME_MAX_CHARS: usize = 100;
pub const INSTRUCTIONS_MIN_CHARS: usize = 10;
pub const INGREDIENTS_MIN_CHARS: usize = 5;
pub const NOTES_MAX_CHARS: usize = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectCode {
	RejectEmpty,
	RejectTooShort,
	RejectTooLong,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
	pub field: &'static str,
	pub code: RejectCode,
	pub limit: usize,
}
impl fmt::Display for Rejection {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self.code {
			RejectCode::RejectEmpty => write!(f, "{} must not be empty.", self.field),
			RejectCode::RejectTooShort =>
				write!(f, "{} must be at least {} characters.", self.field, self.limit),
			RejectCode::RejectTooLong =>
				write!(f, "{} must be at most {} characters.", self.field, self.limit),
		}
	}
}

impl std::error::Error for Rejection {}

/// Returns the trimmed search term.
pub fn search_term(raw: &str) -> Result<&str, Rejection> {
	let term = raw.trim();

	bounded("query", term, SEARCH_TERM_MIN_CHARS, None)?;

	Ok(term)
}

pub fn recipe_name(raw: &str) -> Result<&str, Rejection> {
	let name = raw.trim();

	bounded("name", name, NAME_MIN_CHARS, Some(NAME_MAX_CHARS))?;

	Ok(name)
}

pub fn instructions(raw: &str) -> Result<&str, Rejection> {
	let text = raw.trim();

	bounded("instructions", text, INSTRUCTIONS_MIN_CHARS, None)?;

	Ok(text)
}

pub fn ingredients_text(raw: &str) -> Result<&str, Rejection> {
	let text = raw.trim();

	bounded("ingredients", text, INGREDIENTS_MIN_CHARS, None)?;

	Ok(text)
}

pub fn required(field: &'static str, raw: &str) -> Result<String, Rejection> {
	let value = raw.trim();

	bounded(field, value, 1, None)?;

	Ok(value.to_string())
}

/// Notes are optional. Returns the trimmed text once its length is checked.
pub fn notes(raw: &str) -> Result<&str, Rejection> {
	let notes = raw.trim();

	if notes.chars().count() > NOTES_MAX_CHARS {
		return Err(Rejection {
			field: "notes",
			code: RejectCode::RejectTooLong,
			limit: NOTES_MAX_CHARS,
		});
	}

	Ok(notes)
}

fn bounded(
	field: &'static str,
	value: &str,
	min: usize,
	max: Option<usize>,
) -> Result<(), Rejection> {
	let count = value.chars().count();

	if count == 0 {
		return Err(Rejection { field, code: RejectCode::RejectEmpty, limit: min });
	}
	if count < min {
		return Err(Rejection { field, code: RejectCode::RejectTooShort, limit: min });
	}

	if let Some(max) = max
		&& count > max
	{
		return Err(Rejection { field, code: RejectCode::RejectTooLong, limit: max });
	}

	Ok(())
}
