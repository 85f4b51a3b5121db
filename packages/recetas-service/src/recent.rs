use std::sync::Mutex;

use time::OffsetDateTime;

use recetas_domain::{RecentPointer, clock};

/// Single-slot, last-write-wins register of the most recently inserted or edited item.
#[derive(Debug, Default)]
pub struct RecentItemTracker {
	slot: Mutex<Option<RecentPointer>>,
}
impl RecentItemTracker {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn restore(&self, pointer: Option<RecentPointer>) {
		*self.slot.lock().unwrap_or_else(|err| err.into_inner()) = pointer;
	}

	pub fn record_touch(&self, id: &str, name: &str) -> RecentPointer {
		self.record_touch_at(id, name, clock::now())
	}

	pub fn record_touch_at(&self, id: &str, name: &str, at: OffsetDateTime) -> RecentPointer {
		let pointer = RecentPointer { id: id.to_string(), name: name.to_string(), touched_at: at };

		*self.slot.lock().unwrap_or_else(|err| err.into_inner()) = Some(pointer.clone());

		pointer
	}

	/// Clears the pointer only when it refers to `id`.
	pub fn clear_if_matches(&self, id: &str) -> bool {
		let mut slot = self.slot.lock().unwrap_or_else(|err| err.into_inner());

		if slot.as_ref().is_some_and(|pointer| pointer.id == id) {
			*slot = None;

			return true;
		}

		false
	}

	pub fn current(&self) -> Option<RecentPointer> {
		self.slot.lock().unwrap_or_else(|err| err.into_inner()).clone()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn last_write_wins() {
		let tracker = RecentItemTracker::new();

		assert!(tracker.current().is_none());

		tracker.record_touch("1", "Arrabiata");
		tracker.record_touch("2", "Big Mac");

		let current = tracker.current().expect("Pointer must be set.");

		assert_eq!(current.id, "2");
		assert_eq!(current.name, "Big Mac");
	}

	#[test]
	fn clear_only_when_ids_match() {
		let tracker = RecentItemTracker::new();

		tracker.record_touch("1", "Arrabiata");

		assert!(!tracker.clear_if_matches("2"));
		assert!(tracker.current().is_some());
		assert!(tracker.clear_if_matches("1"));
		assert!(tracker.current().is_none());
		assert!(!tracker.clear_if_matches("1"));
	}

	#[test]
	fn restore_replaces_the_slot() {
		let tracker = RecentItemTracker::new();
		let pointer =
			RecentPointer { id: "7".to_string(), name: "Kedgeree".to_string(), touched_at: clock::now() };

		tracker.record_touch("1", "Arrabiata");
		tracker.restore(Some(pointer.clone()));

		assert_eq!(tracker.current(), Some(pointer));
	}
}
