use std::{
	collections::{HashMap, HashSet},
	sync::{
		Arc,
		atomic::{AtomicUsize, Ordering},
	},
};

use axum::{
	Json, Router,
	extract::{Query, State},
	http::StatusCode,
	response::{IntoResponse, Response},
	routing,
};
use serde_json::{Map, Value};
use tokio::{
	net::TcpListener,
	sync::{oneshot, oneshot::Sender},
};

use crate::{Error, Result};

/// Canned catalog contents served by [`StubCatalog`].
#[derive(Debug, Clone, Default)]
pub struct CatalogFixture {
	/// Full meal records in the catalog wire shape, see [`meal`].
	pub meals: Vec<Value>,
	pub categories: Vec<String>,
	pub areas: Vec<String>,
	/// Lookups of these ids answer `500`.
	pub failing_ids: HashSet<String>,
	/// Every endpoint answers `500`.
	pub fail_all: bool,
}
impl CatalogFixture {
	pub fn with_meals(meals: Vec<Value>) -> Self {
		Self { meals, ..Default::default() }
	}

	pub fn failing(mut self, id: &str) -> Self {
		self.failing_ids.insert(id.to_string());

		self
	}
}

/// Builds a full meal record with two ingredients in the catalog wire shape.
pub fn meal(id: &str, name: &str, category: &str, area: &str) -> Value {
	serde_json::json!({
		"idMeal": id,
		"strMeal": name,
		"strCategory": category,
		"strArea": area,
		"strInstructions": format!("Cook the {name} until done."),
		"strMealThumb": format!("https://img.example/{id}.jpg"),
		"strIngredient1": "Salt",
		"strMeasure1": "1 pinch",
		"strIngredient2": "Water",
		"strMeasure2": "",
		"strIngredient3": "",
		"strMeasure3": null,
	})
}

/// A local HTTP server speaking the catalog's JSON API.
pub struct StubCatalog {
	api_base: String,
	requests: Arc<AtomicUsize>,
	lookups: Arc<AtomicUsize>,
	shutdown: Option<Sender<()>>,
}
impl StubCatalog {
	pub async fn start(fixture: CatalogFixture) -> Result<Self> {
		let requests = Arc::new(AtomicUsize::new(0));
		let lookups = Arc::new(AtomicUsize::new(0));
		let state = StubState {
			fixture: Arc::new(fixture),
			requests: requests.clone(),
			lookups: lookups.clone(),
		};
		let app = Router::new()
			.route("/search.php", routing::get(search))
			.route("/filter.php", routing::get(filter))
			.route("/lookup.php", routing::get(lookup))
			.route("/random.php", routing::get(random))
			.route("/categories.php", routing::get(categories))
			.route("/list.php", routing::get(areas))
			.with_state(state);
		let listener = TcpListener::bind("127.0.0.1:0")
			.await
			.map_err(|err| Error::Message(format!("Failed to bind stub catalog: {err}.")))?;
		let addr = listener.local_addr()?;
		let (tx, rx) = oneshot::channel();
		let server = axum::serve(listener, app).with_graceful_shutdown(async move {
			let _ = rx.await;
		});

		tokio::spawn(async move {
			let _ = server.into_future().await;
		});

		Ok(Self { api_base: format!("http://{addr}/"), requests, lookups, shutdown: Some(tx) })
	}

	/// Base URL with a trailing slash.
	pub fn api_base(&self) -> &str {
		&self.api_base
	}

	/// Requests served so far, across all endpoints.
	pub fn requests(&self) -> usize {
		self.requests.load(Ordering::SeqCst)
	}

	pub fn lookups(&self) -> usize {
		self.lookups.load(Ordering::SeqCst)
	}
}
impl Drop for StubCatalog {
	fn drop(&mut self) {
		if let Some(tx) = self.shutdown.take() {
			let _ = tx.send(());
		}
	}
}

#[derive(Clone)]
struct StubState {
	fixture: Arc<CatalogFixture>,
	requests: Arc<AtomicUsize>,
	lookups: Arc<AtomicUsize>,
}
impl StubState {
	fn begin(&self) -> Option<Response> {
		self.requests.fetch_add(1, Ordering::SeqCst);

		self.fixture.fail_all.then(server_error)
	}
}

type Params = Query<HashMap<String, String>>;

async fn search(State(state): State<StubState>, Query(params): Params) -> Response {
	if let Some(res) = state.begin() {
		return res;
	}

	let needle = params.get("s").map(|s| s.to_lowercase()).unwrap_or_default();
	let found = state
		.fixture
		.meals
		.iter()
		.filter(|meal| field(meal, "strMeal").to_lowercase().contains(&needle))
		.cloned()
		.collect();

	meals(found)
}

async fn filter(State(state): State<StubState>, Query(params): Params) -> Response {
	if let Some(res) = state.begin() {
		return res;
	}

	let (key, value) = match (params.get("c"), params.get("a")) {
		(Some(category), _) => ("strCategory", category),
		(None, Some(area)) => ("strArea", area),
		(None, None) => return StatusCode::BAD_REQUEST.into_response(),
	};
	let found = state
		.fixture
		.meals
		.iter()
		.filter(|meal| field(meal, key).eq_ignore_ascii_case(value))
		.map(|meal| {
			serde_json::json!({
				"idMeal": field(meal, "idMeal"),
				"strMeal": field(meal, "strMeal"),
				"strMealThumb": field(meal, "strMealThumb"),
			})
		})
		.collect();

	meals(found)
}

async fn lookup(State(state): State<StubState>, Query(params): Params) -> Response {
	if let Some(res) = state.begin() {
		return res;
	}

	state.lookups.fetch_add(1, Ordering::SeqCst);

	let id = params.get("i").cloned().unwrap_or_default();

	if state.fixture.failing_ids.contains(&id) {
		return server_error();
	}

	let found =
		state.fixture.meals.iter().filter(|meal| field(meal, "idMeal") == id).cloned().collect();

	meals(found)
}

async fn random(State(state): State<StubState>) -> Response {
	if let Some(res) = state.begin() {
		return res;
	}

	meals(state.fixture.meals.iter().take(1).cloned().collect())
}

async fn categories(State(state): State<StubState>) -> Response {
	if let Some(res) = state.begin() {
		return res;
	}

	let categories: Vec<Value> = state
		.fixture
		.categories
		.iter()
		.enumerate()
		.map(|(idx, name)| {
			serde_json::json!({ "idCategory": (idx + 1).to_string(), "strCategory": name })
		})
		.collect();

	Json(serde_json::json!({ "categories": categories })).into_response()
}

async fn areas(State(state): State<StubState>) -> Response {
	if let Some(res) = state.begin() {
		return res;
	}

	let areas: Vec<Value> =
		state.fixture.areas.iter().map(|name| serde_json::json!({ "strArea": name })).collect();

	meals(areas)
}

fn meals(found: Vec<Value>) -> Response {
	let body = if found.is_empty() { Value::Null } else { Value::Array(found) };
	let mut map = Map::new();

	map.insert("meals".to_string(), body);

	Json(Value::Object(map)).into_response()
}

fn server_error() -> Response {
	(StatusCode::INTERNAL_SERVER_ERROR, "stub failure").into_response()
}

fn field<'a>(meal: &'a Value, key: &str) -> &'a str {
	meal.get(key).and_then(Value::as_str).unwrap_or_default()
}
