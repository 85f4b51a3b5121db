//! Upgrades filter-style summaries to full detail records.
//!
//! One lookup is spawned per summary and every lookup reports `(index, outcome)` over a channel.
//! The aggregate is assembled only after all dispatched lookups have reported (or their tasks have
//! gone away), and a failed slot falls back to its summary instead of failing the whole call.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use crate::{CatalogProvider, Result};
use recetas_domain::{DetailRecord, ResultSummary};

/// Upper bound on lookups issued for a single search.
pub const ENRICH_CAP: usize = 10;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enrichment {
	/// In input order, one per dispatched lookup.
	pub records: Vec<DetailRecord>,
	/// Summaries received before the cap was applied.
	pub available: usize,
	/// Lookups dispatched.
	pub requested: usize,
	/// Lookups that produced a full record.
	pub enriched: usize,
}
impl Enrichment {
	pub fn summary(&self) -> String {
		format!("retrieved {} of {} records with full detail", self.enriched, self.requested)
	}

	pub fn degraded(&self) -> usize {
		self.requested - self.enriched
	}
}

pub async fn enrich(
	catalog: &Arc<dyn CatalogProvider>,
	summaries: Vec<ResultSummary>,
) -> Enrichment {
	let available = summaries.len();
	let mut summaries = summaries;

	summaries.truncate(ENRICH_CAP);

	if summaries.is_empty() {
		return Enrichment { available, ..Default::default() };
	}

	let dispatched = summaries.len();
	let (tx, mut rx) = mpsc::channel::<(usize, Result<Option<DetailRecord>>)>(dispatched);

	for (index, summary) in summaries.iter().enumerate() {
		let tx = tx.clone();
		let catalog = catalog.clone();
		let id = summary.id.clone();

		tokio::spawn(async move {
			let outcome = catalog.lookup(&id).await;
			let _ = tx.send((index, outcome)).await;
		});
	}

	drop(tx);

	let mut slots: Vec<Option<DetailRecord>> = vec![None; dispatched];
	let mut received = 0;

	while received < dispatched {
		// `None` once every sender is gone, which only happens early if a lookup task died.
		let Some((index, outcome)) = rx.recv().await else {
			break;
		};
		let expected = &summaries[index].id;

		received += 1;

		match outcome {
			Ok(Some(record)) if &record.id == expected => {
				tracing::debug!(id = %expected, "Lookup returned a full record.");

				slots[index] = Some(record);
			},
			Ok(Some(record)) => {
				tracing::warn!(
					id = %expected,
					returned = %record.id,
					"Lookup returned a different record. Falling back to summary."
				);
			},
			Ok(None) => {
				tracing::warn!(id = %expected, "Lookup found no record. Falling back to summary.");
			},
			Err(err) => {
				tracing::warn!(
					id = %expected,
					error = %err,
					"Lookup failed. Falling back to summary."
				);
			},
		}
	}

	if received < dispatched {
		tracing::warn!(
			missing = dispatched - received,
			"Lookup tasks ended without reporting. Falling back to summaries."
		);
	}

	let mut enriched = 0;
	let records = summaries
		.into_iter()
		.zip(slots)
		.map(|(summary, slot)| match slot {
			Some(record) => {
				enriched += 1;

				record
			},
			None => DetailRecord::degraded(summary),
		})
		.collect();

	Enrichment { records, available, requested: dispatched, enriched }
}
