use time::{Duration, macros::datetime};

use recetas_domain::{
	CollectionItem, DetailLevel, DetailRecord, INSTRUCTIONS_UNAVAILABLE, Ingredient, PersonalDraft,
	RecentPointer, ResultSummary, SearchType, UNCATEGORIZED, UNKNOWN_AREA,
	validate::{self, RejectCode},
};

fn summary(id: &str, name: &str) -> ResultSummary {
	ResultSummary {
		id: id.to_string(),
		name: name.to_string(),
		category: Some("Seafood".to_string()),
		area: None,
		image_url: Some(format!("https://img.example/{id}.jpg")),
	}
}

#[test]
fn degraded_record_keeps_summary_fields() {
	let record = DetailRecord::degraded(summary("52959", "Baked salmon"));

	assert_eq!(record.id, "52959");
	assert_eq!(record.name, "Baked salmon");
	assert_eq!(record.category.as_deref(), Some("Seafood"));
	assert!(record.instructions.is_empty());
	assert!(record.ingredients.is_empty());
	assert_eq!(record.detail, DetailLevel::Degraded);
	assert!(record.is_degraded());
}

#[test]
fn import_fills_missing_catalog_fields() {
	let now = datetime!(2024-05-01 10:00 UTC);
	let record = DetailRecord::degraded(summary("1", "Soup"));
	let item = CollectionItem::from_detail(&record, now);

	assert_eq!(item.category, "Seafood");
	assert_eq!(item.area, UNKNOWN_AREA);
	assert_eq!(item.instructions, INSTRUCTIONS_UNAVAILABLE);
	assert_eq!(item.image_url, "https://img.example/1.jpg");
	assert!(item.notes.is_empty());
	assert!(!item.is_personal);
	assert_eq!(item.created_at, now);
	assert_eq!(item.modified_at, now);
}

#[test]
fn import_treats_blank_category_as_missing() {
	let mut record = DetailRecord::degraded(summary("1", "Soup"));

	record.category = Some("  ".to_string());

	let item = CollectionItem::from_detail(&record, datetime!(2024-05-01 10:00 UTC));

	assert_eq!(item.category, UNCATEGORIZED);
}

#[test]
fn draft_becomes_personal_item() {
	let now = datetime!(2024-05-01 10:00 UTC);
	let draft = PersonalDraft {
		name: "Grandma's stew".to_string(),
		category: "Beef".to_string(),
		area: "British".to_string(),
		instructions: "Simmer for three hours.".to_string(),
		image_url: None,
		ingredients: vec![Ingredient::new("Beef", "1kg"), Ingredient::new("Salt", "")],
	};
	let item = CollectionItem::from_draft("local-1".to_string(), draft, now);

	assert!(item.is_personal);
	assert_eq!(item.id, "local-1");
	assert_eq!(item.image_url, "");
	assert_eq!(item.ingredients[1], Ingredient::new("Salt", ""));
}

#[test]
fn touch_never_moves_modified_backwards() {
	let now = datetime!(2024-05-01 10:00 UTC);
	let mut item = CollectionItem::from_detail(&DetailRecord::degraded(summary("1", "Soup")), now);

	item.touch(now - Duration::minutes(5));

	assert_eq!(item.modified_at, now);

	item.touch(now + Duration::seconds(1));

	assert_eq!(item.modified_at, now + Duration::seconds(1));
}

#[test]
fn recent_pointer_window_is_one_day() {
	let touched_at = datetime!(2024-05-01 10:00 UTC);
	let pointer = RecentPointer { id: "1".to_string(), name: "Soup".to_string(), touched_at };

	assert!(pointer.is_recent(touched_at + Duration::hours(23)));
	assert!(!pointer.is_recent(touched_at + Duration::hours(24)));
}

#[test]
fn search_type_parses_case_insensitively() {
	assert_eq!("Category".parse::<SearchType>(), Ok(SearchType::Category));
	assert_eq!(" area ".parse::<SearchType>(), Ok(SearchType::Area));
	assert!("ingredient".parse::<SearchType>().is_err());
	assert!(SearchType::Area.needs_enrichment());
	assert!(!SearchType::Name.needs_enrichment());
}

#[test]
fn search_term_is_trimmed_and_bounded() {
	assert_eq!(validate::search_term("  pie "), Ok("pie"));
	assert_eq!(validate::search_term("   ").map_err(|err| err.code), Err(RejectCode::RejectEmpty));
	assert_eq!(validate::search_term(" a ").map_err(|err| err.code), Err(RejectCode::RejectTooShort));
}

#[test]
fn recipe_name_has_both_bounds() {
	assert!(validate::recipe_name("Pie").is_ok());
	assert_eq!(validate::recipe_name("Pi").map_err(|err| err.code), Err(RejectCode::RejectTooShort));

	let long = "x".repeat(101);
	let err = validate::recipe_name(&long).expect_err("Expected name length rejection.");

	assert_eq!(err.code, RejectCode::RejectTooLong);
	assert_eq!(err.to_string(), "name must be at most 100 characters.");
}

#[test]
fn notes_are_optional_but_capped() {
	assert_eq!(validate::notes(""), Ok(""));
	assert!(validate::notes(&"n".repeat(500)).is_ok());
	assert_eq!(
		validate::notes(&"n".repeat(501)).map_err(|err| err.code),
		Err(RejectCode::RejectTooLong)
	);
}

#[test]
fn notes_limit_applies_to_trimmed_text() {
	let padded = format!("  {}\n\n", "n".repeat(500));

	assert_eq!(validate::notes(&padded), Ok("n".repeat(500).as_str()));
	assert_eq!(validate::notes("  keep me  "), Ok("keep me"));
}

#[test]
fn instructions_and_ingredients_need_minimum_content() {
	assert!(validate::instructions("Boil water.").is_ok());
	assert!(validate::instructions("Boil.").is_err());
	assert!(validate::ingredients_text("Eggs\nMilk").is_ok());
	assert!(validate::ingredients_text("Egg").is_err());
	assert_eq!(validate::required("category", "  Beef "), Ok("Beef".to_string()));
	assert!(validate::required("area", " ").is_err());
}
