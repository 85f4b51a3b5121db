use time::{Duration, OffsetDateTime};

use recetas_domain::{CollectionItem, Ingredient, RecentPointer, clock};
use recetas_storage::{db::Db, queries};
use recetas_testkit::TestDatabase;

async fn open(test_db: &TestDatabase) -> Db {
	let cfg = recetas_config::Sqlite { path: test_db.path_str(), pool_max_conns: 2 };
	let db = Db::connect(&cfg).await.expect("Failed to open SQLite database.");

	db.ensure_schema().await.expect("Failed to ensure schema.");

	db
}

fn item(id: &str, name: &str, category: &str, modified_at: OffsetDateTime) -> CollectionItem {
	CollectionItem {
		id: id.to_string(),
		name: name.to_string(),
		category: category.to_string(),
		area: "British".to_string(),
		instructions: "Mix everything and bake.".to_string(),
		image_url: String::new(),
		ingredients: vec![Ingredient::new("Flour", "200g"), Ingredient::new("Salt", "")],
		notes: String::new(),
		is_personal: false,
		created_at: modified_at,
		modified_at,
	}
}

fn ids(items: &[CollectionItem]) -> Vec<&str> {
	items.iter().map(|item| item.id.as_str()).collect()
}

#[tokio::test]
async fn ensure_schema_is_idempotent() {
	let test_db = TestDatabase::new().await.expect("Failed to create test database.");
	let db = open(&test_db).await;

	db.ensure_schema().await.expect("Second bootstrap must succeed.");

	assert_eq!(queries::count_items(&db).await.expect("Failed to count items."), 0);
}

#[tokio::test]
async fn newest_insert_lists_first() {
	let test_db = TestDatabase::new().await.expect("Failed to create test database.");
	let db = open(&test_db).await;
	let base = clock::now();

	queries::insert_item(&db, &item("a", "Apple pie", "Dessert", base)).await.expect("Insert failed.");
	queries::insert_item(&db, &item("b", "Beef stew", "Beef", base + Duration::seconds(1)))
		.await
		.expect("Insert failed.");

	let listed = queries::list_items(&db).await.expect("List failed.");

	assert_eq!(ids(&listed), vec!["b", "a"]);
	assert_eq!(
		queries::most_recently_modified(&db).await.expect("Query failed.").map(|item| item.id),
		Some("b".to_string())
	);
}

#[tokio::test]
async fn update_with_bumped_timestamp_moves_item_first() {
	let test_db = TestDatabase::new().await.expect("Failed to create test database.");
	let db = open(&test_db).await;
	let base = clock::now();
	let mut older = item("a", "Apple pie", "Dessert", base);

	queries::insert_item(&db, &older).await.expect("Insert failed.");
	queries::insert_item(&db, &item("b", "Beef stew", "Beef", base + Duration::seconds(1)))
		.await
		.expect("Insert failed.");

	older.notes = "Less sugar".to_string();
	older.touch(base + Duration::seconds(2));

	assert!(queries::update_item(&db, &older).await.expect("Update failed."));

	let listed = queries::list_items(&db).await.expect("List failed.");

	assert_eq!(ids(&listed), vec!["a", "b"]);
	assert_eq!(listed[0].notes, "Less sugar");
}

#[tokio::test]
async fn missing_ids_are_no_ops() {
	let test_db = TestDatabase::new().await.expect("Failed to create test database.");
	let db = open(&test_db).await;
	let ghost = item("ghost", "Ghost", "Beef", clock::now());

	assert!(!queries::update_item(&db, &ghost).await.expect("Update failed."));
	assert!(!queries::delete_item(&db, "ghost").await.expect("Delete failed."));
	assert!(queries::get_item(&db, "ghost").await.expect("Get failed.").is_none());
}

#[tokio::test]
async fn upsert_replaces_and_keeps_tie_position() {
	let test_db = TestDatabase::new().await.expect("Failed to create test database.");
	let db = open(&test_db).await;
	let at = clock::now();

	queries::insert_item(&db, &item("a", "Apple pie", "Dessert", at)).await.expect("Insert failed.");
	queries::insert_item(&db, &item("b", "Banana bread", "Dessert", at)).await.expect("Insert failed.");
	queries::insert_item(&db, &item("a", "Apple crumble", "Dessert", at))
		.await
		.expect("Insert failed.");

	let listed = queries::list_items(&db).await.expect("List failed.");

	assert_eq!(ids(&listed), vec!["a", "b"]);
	assert_eq!(listed[0].name, "Apple crumble");
	assert_eq!(queries::count_items(&db).await.expect("Count failed."), 2);
}

#[tokio::test]
async fn ingredients_and_timestamps_round_trip() {
	let test_db = TestDatabase::new().await.expect("Failed to create test database.");
	let db = open(&test_db).await;
	let mut stored = item("a", "Apple pie", "Dessert", clock::now());

	stored.ingredients = vec![
		Ingredient::new("Apples", "6"),
		Ingredient::new("Cinnamon", ""),
		Ingredient::new("Butter", "50g"),
	];

	queries::insert_item(&db, &stored).await.expect("Insert failed.");

	let loaded = queries::get_item(&db, "a").await.expect("Get failed.").expect("Item must exist.");

	assert_eq!(loaded, stored);
}

#[tokio::test]
async fn filters_by_name_category_and_personal_flag() {
	let test_db = TestDatabase::new().await.expect("Failed to create test database.");
	let db = open(&test_db).await;
	let base = clock::now();
	let mut personal = item("p", "Grandma's Apple Tart", "Dessert", base + Duration::seconds(2));

	personal.is_personal = true;

	queries::insert_item(&db, &item("a", "Apple pie", "Dessert", base)).await.expect("Insert failed.");
	queries::insert_item(&db, &item("b", "Beef stew", "Beef", base + Duration::seconds(1)))
		.await
		.expect("Insert failed.");
	queries::insert_item(&db, &personal).await.expect("Insert failed.");
	queries::insert_item(&db, &item("c", "100% Cocoa_cake", "dessert", base))
		.await
		.expect("Insert failed.");

	let by_name = queries::find_items_by_name(&db, "APPLE").await.expect("Search failed.");
	let wildcard = queries::find_items_by_name(&db, "%").await.expect("Search failed.");
	let by_category = queries::find_items_by_category(&db, "Dessert").await.expect("Filter failed.");
	let personal = queries::list_personal_items(&db).await.expect("Filter failed.");

	assert_eq!(ids(&by_name), vec!["p", "a"]);
	assert_eq!(ids(&wildcard), vec!["c"]);
	assert_eq!(ids(&by_category), vec!["p", "a"]);
	assert_eq!(ids(&personal), vec!["p"]);
}

#[tokio::test]
async fn recent_pointer_persists_and_clears_only_on_match() {
	let test_db = TestDatabase::new().await.expect("Failed to create test database.");
	let db = open(&test_db).await;
	let pointer =
		RecentPointer { id: "a".to_string(), name: "Apple pie".to_string(), touched_at: clock::now() };

	assert!(queries::load_recent(&db).await.expect("Load failed.").is_none());

	queries::save_recent(&db, &pointer).await.expect("Save failed.");

	assert!(!queries::clear_recent_matching(&db, "b").await.expect("Clear failed."));
	assert_eq!(queries::load_recent(&db).await.expect("Load failed."), Some(pointer));
	assert!(queries::clear_recent_matching(&db, "a").await.expect("Clear failed."));
	assert!(queries::load_recent(&db).await.expect("Load failed.").is_none());
}

#[tokio::test]
async fn concurrent_writers_are_serialized() {
	let test_db = TestDatabase::new().await.expect("Failed to create test database.");
	let db = std::sync::Arc::new(open(&test_db).await);
	let base = clock::now();
	let mut handles = Vec::new();

	for idx in 0..16_i64 {
		let db = db.clone();

		handles.push(tokio::spawn(async move {
			let stored =
				item(&format!("id-{idx}"), &format!("Dish {idx}"), "Beef", base + Duration::milliseconds(idx));

			queries::insert_item(&db, &stored).await
		}));
	}
	for handle in handles {
		handle.await.expect("Writer task panicked.").expect("Insert failed.");
	}

	assert_eq!(queries::count_items(&db).await.expect("Count failed."), 16);
	assert_eq!(
		queries::most_recently_modified(&db).await.expect("Query failed.").map(|item| item.id),
		Some("id-15".to_string())
	);
}
