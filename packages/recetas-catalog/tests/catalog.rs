use recetas_catalog::{CatalogClient, Error};
use recetas_domain::{DetailLevel, Ingredient};
use recetas_testkit::{CatalogFixture, StubCatalog, meal};

fn catalog_cfg(api_base: &str) -> recetas_config::Catalog {
	recetas_config::Catalog {
		api_base: api_base.to_string(),
		timeout_ms: 5_000,
		user_agent: Some("recetas-tests".to_string()),
	}
}

fn fixture() -> CatalogFixture {
	CatalogFixture {
		meals: vec![
			meal("52772", "Teriyaki Chicken Casserole", "Chicken", "Japanese"),
			meal("52959", "Baked salmon with fennel", "Seafood", "British"),
			meal("52802", "Fish pie", "Seafood", "British"),
		],
		categories: vec!["Chicken".to_string(), "Seafood".to_string()],
		areas: vec!["British".to_string(), "Japanese".to_string()],
		..Default::default()
	}
	.failing("52802")
}

#[tokio::test]
async fn name_search_returns_full_records() {
	let stub = StubCatalog::start(fixture()).await.expect("Failed to start stub catalog.");
	let client = CatalogClient::new(&catalog_cfg(stub.api_base())).expect("Failed to build client.");
	let records = client.search_by_name("salmon").await.expect("Search failed.");

	assert_eq!(records.len(), 1);
	assert_eq!(records[0].id, "52959");
	assert_eq!(records[0].detail, DetailLevel::Full);
	assert_eq!(
		records[0].ingredients,
		vec![Ingredient::new("Salt", "1 pinch"), Ingredient::new("Water", "")]
	);
}

#[tokio::test]
async fn empty_search_is_not_an_error() {
	let stub = StubCatalog::start(fixture()).await.expect("Failed to start stub catalog.");
	let client = CatalogClient::new(&catalog_cfg(stub.api_base())).expect("Failed to build client.");

	assert!(client.search_by_name("zzz").await.expect("Search failed.").is_empty());
}

#[tokio::test]
async fn filters_return_summaries() {
	let stub = StubCatalog::start(fixture()).await.expect("Failed to start stub catalog.");
	let client = CatalogClient::new(&catalog_cfg(stub.api_base())).expect("Failed to build client.");
	let by_category = client.filter_by_category("Seafood").await.expect("Filter failed.");
	let by_area = client.filter_by_area("Japanese").await.expect("Filter failed.");

	assert_eq!(
		by_category.iter().map(|summary| summary.id.as_str()).collect::<Vec<_>>(),
		vec!["52959", "52802"]
	);
	assert_eq!(by_category[0].category, None);
	assert_eq!(by_area.len(), 1);
	assert_eq!(by_area[0].image_url.as_deref(), Some("https://img.example/52772.jpg"));
}

#[tokio::test]
async fn lookup_distinguishes_missing_from_failing() {
	let stub = StubCatalog::start(fixture()).await.expect("Failed to start stub catalog.");
	let client = CatalogClient::new(&catalog_cfg(stub.api_base())).expect("Failed to build client.");

	assert!(client.lookup("52772").await.expect("Lookup failed.").is_some());
	assert!(client.lookup("404").await.expect("Lookup failed.").is_none());
	assert!(matches!(client.lookup("52802").await, Err(Error::Reqwest(_))));
	assert_eq!(stub.lookups(), 3);
}

#[tokio::test]
async fn lists_categories_and_areas() {
	let stub = StubCatalog::start(fixture()).await.expect("Failed to start stub catalog.");
	let client = CatalogClient::new(&catalog_cfg(stub.api_base())).expect("Failed to build client.");

	assert_eq!(
		client.list_categories().await.expect("Listing categories failed."),
		vec!["Chicken".to_string(), "Seafood".to_string()]
	);
	assert_eq!(
		client.list_areas().await.expect("Listing areas failed."),
		vec!["British".to_string(), "Japanese".to_string()]
	);
}

#[tokio::test]
async fn random_returns_one_record() {
	let stub = StubCatalog::start(fixture()).await.expect("Failed to start stub catalog.");
	let client = CatalogClient::new(&catalog_cfg(stub.api_base())).expect("Failed to build client.");
	let record = client.random().await.expect("Random failed.").expect("Missing random record.");

	assert_eq!(record.id, "52772");

	let empty = StubCatalog::start(CatalogFixture::default())
		.await
		.expect("Failed to start stub catalog.");
	let client = CatalogClient::new(&catalog_cfg(empty.api_base())).expect("Failed to build client.");

	assert!(client.random().await.expect("Random failed.").is_none());
}
