use serde::{Deserialize, Serialize};

use crate::{RecetasService, Result};
use recetas_domain::validate;
use recetas_storage::queries;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DeleteRequest {
	pub id: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DeleteResponse {
	pub id: String,
	/// `false` when nothing with this id was saved.
	pub deleted: bool,
	/// The recent pointer referred to this item and was cleared.
	pub recent_cleared: bool,
}

impl RecetasService {
	pub async fn delete(&self, req: DeleteRequest) -> Result<DeleteResponse> {
		let id = validate::required("id", &req.id)?;
		let deleted = queries::delete_item(&self.db, &id).await?;
		let recent_cleared = self.tracker.clear_if_matches(&id);

		queries::clear_recent_matching(&self.db, &id).await?;

		if deleted {
			tracing::info!(id = %id, recent_cleared, "Deleted saved recipe.");
		} else {
			tracing::debug!(id = %id, "Nothing to delete.");
		}

		Ok(DeleteResponse { id, deleted, recent_cleared })
	}
}
