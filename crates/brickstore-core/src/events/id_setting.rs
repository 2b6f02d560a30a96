//! Identifier assignment for new aggregates
//!
//! The schema has no autoincrement keys; ids come from a process-wide
//! counter handed out just before the first save.

use std::sync::atomic::{AtomicI32, Ordering};

use super::{ApplicationListener, RelationalEvent};
use crate::model::LegoSet;

/// Assigns ids to [`LegoSet`] roots and propagates them to the manual
#[derive(Debug, Default)]
pub struct IdSettingListener {
    last_id: AtomicI32,
}

impl IdSettingListener {
    /// Counter starting at 0; the first assigned id is 1
    pub fn new() -> Self {
        Self::default()
    }

    /// Counter that resumes after `last_id`, e.g. the highest id already stored
    pub fn starting_after(last_id: i32) -> Self {
        Self {
            last_id: AtomicI32::new(last_id),
        }
    }

    /// The most recently assigned id (0 if none)
    pub fn last_assigned(&self) -> i32 {
        self.last_id.load(Ordering::SeqCst)
    }

    /// Next id, or `None` once `i32::MAX` has been handed out
    fn next_id(&self) -> Option<i32> {
        self.last_id
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| last.checked_add(1))
            .ok()
            .map(|last| last + 1)
    }

    /// Give `lego_set` an id if it has none, then copy it onto the manual
    ///
    /// The manual's id is overwritten even when the set was already
    /// identified. Ids never wrap: after `i32::MAX` a new set keeps id 0,
    /// which the repository rejects as unassigned.
    pub fn set_ids(&self, lego_set: &mut LegoSet) {
        if lego_set.id == 0 {
            match self.next_id() {
                Some(id) => {
                    lego_set.id = id;
                    tracing::debug!(lego_set_id = id, "assigned id");
                }
                None => tracing::warn!(last_id = i32::MAX, "id counter exhausted"),
            }
        }

        if let Some(manual) = lego_set.manual.as_mut() {
            manual.id = i64::from(lego_set.id);
        }
    }
}

impl ApplicationListener for IdSettingListener {
    fn on_event(&self, event: &mut RelationalEvent<'_>) {
        if let RelationalEvent::BeforeSave { entity } = event {
            if let Some(lego_set) = entity.downcast_mut::<LegoSet>() {
                self.set_ids(lego_set);
            }
        }
    }
}
