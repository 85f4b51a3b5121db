pub const INIT_SQL: &str = include_str!("../sql/init.sql");

/// Splits the bootstrap script into individual statements.
pub fn statements() -> impl Iterator<Item = &'static str> {
	INIT_SQL.split(';').map(str::trim).filter(|statement| !statement.is_empty())
}
