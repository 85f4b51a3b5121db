use serde::Deserialize;

pub const DEFAULT_API_BASE: &str = "https://www.themealdb.com/api/json/v1/1/";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
	pub service: Service,
	pub storage: Storage,
	pub catalog: Catalog,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Service {
	#[serde(default = "default_log_level")]
	pub log_level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Storage {
	pub sqlite: Sqlite,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Sqlite {
	/// Database file. Created on first connect.
	pub path: String,
	#[serde(default = "default_pool_max_conns")]
	pub pool_max_conns: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Catalog {
	#[serde(default = "default_api_base")]
	pub api_base: String,
	/// Per-request timeout; also bounds every enrichment lookup.
	#[serde(default = "default_timeout_ms")]
	pub timeout_ms: u64,
	pub user_agent: Option<String>,
}
impl Default for Catalog {
	fn default() -> Self {
		Self { api_base: default_api_base(), timeout_ms: default_timeout_ms(), user_agent: None }
	}
}

fn default_log_level() -> String {
	"info".to_string()
}

fn default_pool_max_conns() -> u32 {
	4
}

fn default_api_base() -> String {
	DEFAULT_API_BASE.to_string()
}

fn default_timeout_ms() -> u64 {
	30_000
}
