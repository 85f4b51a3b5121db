//! Collection queries.
//!
//! Ordered reads sort by `modified_at` descending and break ties by insertion order (`rowid`). An
//! upsert keeps the row's original `rowid`, so a replaced item keeps its position among ties.

use recetas_domain::{CollectionItem, RecentPointer};

use crate::{
	Result,
	db::{Db, WriteTx},
	models::{CollectionItemRow, RecentPointerRow},
};

const ITEM_COLUMNS: &str = "\
id, name, category, area, instructions, image_url, ingredients, notes, is_personal, created_at, \
modified_at";

/// Inserts the item, replacing any item with the same id. Timestamps are stored as given.
pub async fn insert_item(db: &Db, item: &CollectionItem) -> Result<()> {
	let mut write = db.begin_write().await?;

	upsert_item_in(&mut write, item).await?;
	write.commit().await?;

	tracing::debug!(id = %item.id, "Inserted collection item.");

	Ok(())
}

/// [`insert_item`] inside an open write transaction.
pub async fn upsert_item_in(write: &mut WriteTx<'_>, item: &CollectionItem) -> Result<()> {
	let row = CollectionItemRow::from_item(item);

	sqlx::query(
		"\
INSERT INTO collection_items (
	id,
	name,
	category,
	area,
	instructions,
	image_url,
	ingredients,
	notes,
	is_personal,
	created_at,
	modified_at
)
VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
ON CONFLICT(id) DO UPDATE SET
	name = excluded.name,
	category = excluded.category,
	area = excluded.area,
	instructions = excluded.instructions,
	image_url = excluded.image_url,
	ingredients = excluded.ingredients,
	notes = excluded.notes,
	is_personal = excluded.is_personal,
	created_at = excluded.created_at,
	modified_at = excluded.modified_at",
	)
	.bind(&row.id)
	.bind(&row.name)
	.bind(&row.category)
	.bind(&row.area)
	.bind(&row.instructions)
	.bind(&row.image_url)
	.bind(&row.ingredients)
	.bind(&row.notes)
	.bind(row.is_personal)
	.bind(row.created_at)
	.bind(row.modified_at)
	.execute(&mut *write.tx)
	.await?;

	Ok(())
}

/// Overwrites every stored field of an existing item. Returns `false` when no item has this id.
pub async fn update_item(db: &Db, item: &CollectionItem) -> Result<bool> {
	let mut write = db.begin_write().await?;
	let updated = update_item_in(&mut write, item).await?;

	write.commit().await?;

	Ok(updated)
}

/// [`update_item`] inside an open write transaction.
pub async fn update_item_in(write: &mut WriteTx<'_>, item: &CollectionItem) -> Result<bool> {
	let row = CollectionItemRow::from_item(item);
	let result = sqlx::query(
		"\
UPDATE collection_items
SET
	name = ?,
	category = ?,
	area = ?,
	instructions = ?,
	image_url = ?,
	ingredients = ?,
	notes = ?,
	is_personal = ?,
	created_at = ?,
	modified_at = ?
WHERE id = ?",
	)
	.bind(&row.name)
	.bind(&row.category)
	.bind(&row.area)
	.bind(&row.instructions)
	.bind(&row.image_url)
	.bind(&row.ingredients)
	.bind(&row.notes)
	.bind(row.is_personal)
	.bind(row.created_at)
	.bind(row.modified_at)
	.bind(&row.id)
	.execute(&mut *write.tx)
	.await?;

	Ok(result.rows_affected() > 0)
}

/// Returns `false` when no item has this id.
pub async fn delete_item(db: &Db, id: &str) -> Result<bool> {
	let mut write = db.begin_write().await?;
	let result = sqlx::query("DELETE FROM collection_items WHERE id = ?")
		.bind(id)
		.execute(&mut *write.tx)
		.await?;

	write.commit().await?;

	Ok(result.rows_affected() > 0)
}

pub async fn get_item(db: &Db, id: &str) -> Result<Option<CollectionItem>> {
	let sql = format!("SELECT {ITEM_COLUMNS} FROM collection_items WHERE id = ?");
	let row: Option<CollectionItemRow> =
		sqlx::query_as(&sql).bind(id).fetch_optional(&db.pool).await?;

	row.map(CollectionItemRow::into_item).transpose()
}

/// Reads an item through an open write transaction, so no other writer can change it before the
/// transaction commits.
pub async fn get_item_in(write: &mut WriteTx<'_>, id: &str) -> Result<Option<CollectionItem>> {
	let sql = format!("SELECT {ITEM_COLUMNS} FROM collection_items WHERE id = ?");
	let row: Option<CollectionItemRow> =
		sqlx::query_as(&sql).bind(id).fetch_optional(&mut *write.tx).await?;

	row.map(CollectionItemRow::into_item).transpose()
}

pub async fn list_items(db: &Db) -> Result<Vec<CollectionItem>> {
	let sql = format!(
		"SELECT {ITEM_COLUMNS} FROM collection_items ORDER BY modified_at DESC, rowid ASC"
	);
	let rows: Vec<CollectionItemRow> = sqlx::query_as(&sql).fetch_all(&db.pool).await?;

	into_items(rows)
}

pub async fn most_recently_modified(db: &Db) -> Result<Option<CollectionItem>> {
	let sql = format!(
		"SELECT {ITEM_COLUMNS} FROM collection_items ORDER BY modified_at DESC, rowid ASC LIMIT 1"
	);
	let row: Option<CollectionItemRow> = sqlx::query_as(&sql).fetch_optional(&db.pool).await?;

	row.map(CollectionItemRow::into_item).transpose()
}

/// Case-insensitive substring match on the name. SQLite folds ASCII letters only.
pub async fn find_items_by_name(db: &Db, needle: &str) -> Result<Vec<CollectionItem>> {
	let sql = format!(
		"\
SELECT {ITEM_COLUMNS}
FROM collection_items
WHERE name LIKE '%' || ? || '%' ESCAPE '\\'
ORDER BY modified_at DESC, rowid ASC"
	);
	let rows: Vec<CollectionItemRow> =
		sqlx::query_as(&sql).bind(escape_like(needle)).fetch_all(&db.pool).await?;

	into_items(rows)
}

pub async fn find_items_by_category(db: &Db, category: &str) -> Result<Vec<CollectionItem>> {
	let sql = format!(
		"\
SELECT {ITEM_COLUMNS}
FROM collection_items
WHERE category = ?
ORDER BY modified_at DESC, rowid ASC"
	);
	let rows: Vec<CollectionItemRow> =
		sqlx::query_as(&sql).bind(category).fetch_all(&db.pool).await?;

	into_items(rows)
}

pub async fn list_personal_items(db: &Db) -> Result<Vec<CollectionItem>> {
	let sql = format!(
		"\
SELECT {ITEM_COLUMNS}
FROM collection_items
WHERE is_personal = 1
ORDER BY modified_at DESC, rowid ASC"
	);
	let rows: Vec<CollectionItemRow> = sqlx::query_as(&sql).fetch_all(&db.pool).await?;

	into_items(rows)
}

pub async fn count_items(db: &Db) -> Result<i64> {
	let count: i64 =
		sqlx::query_scalar("SELECT count(*) FROM collection_items").fetch_one(&db.pool).await?;

	Ok(count)
}

pub async fn save_recent(db: &Db, pointer: &RecentPointer) -> Result<()> {
	let row = RecentPointerRow::from_pointer(pointer);
	let mut write = db.begin_write().await?;

	sqlx::query(
		"\
INSERT INTO recent_pointer (slot, item_id, name, touched_at)
VALUES (1, ?, ?, ?)
ON CONFLICT(slot) DO UPDATE SET
	item_id = excluded.item_id,
	name = excluded.name,
	touched_at = excluded.touched_at",
	)
	.bind(&row.item_id)
	.bind(&row.name)
	.bind(row.touched_at)
	.execute(&mut *write.tx)
	.await?;

	write.commit().await?;

	Ok(())
}

pub async fn load_recent(db: &Db) -> Result<Option<RecentPointer>> {
	let row: Option<RecentPointerRow> =
		sqlx::query_as("SELECT item_id, name, touched_at FROM recent_pointer WHERE slot = 1")
			.fetch_optional(&db.pool)
			.await?;

	row.map(RecentPointerRow::into_pointer).transpose()
}

/// Clears the stored pointer only when it refers to `id`.
pub async fn clear_recent_matching(db: &Db, id: &str) -> Result<bool> {
	let mut write = db.begin_write().await?;
	let result = sqlx::query("DELETE FROM recent_pointer WHERE slot = 1 AND item_id = ?")
		.bind(id)
		.execute(&mut *write.tx)
		.await?;

	write.commit().await?;

	Ok(result.rows_affected() > 0)
}

fn into_items(rows: Vec<CollectionItemRow>) -> Result<Vec<CollectionItem>> {
	rows.into_iter().map(CollectionItemRow::into_item).collect()
}

fn escape_like(raw: &str) -> String {
	let mut out = String::with_capacity(raw.len());

	for ch in raw.chars() {
		if matches!(ch, '\\' | '%' | '_') {
			out.push('\\');
		}

		out.push(ch);
	}

	out
}

#[cfg(test)]
mod tests {
	#[test]
	fn like_wildcards_are_escaped() {
		assert_eq!(super::escape_like(r"50%_off\"), r"50\%\_off\\");
		assert_eq!(super::escape_like("plain"), "plain");
	}
}
