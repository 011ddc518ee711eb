//! In-memory timetable store.

use async_trait::async_trait;
use dashmap::DashMap;
use tokio::sync::Mutex;
use uuid::Uuid;

use campusdesk_core::result::AppResult;
use campusdesk_entity::timetable::{ClashProbe, TimetableSlot, Weekday, find_clash};

use crate::store::{TimetableStore, clash_error, missing};

/// Timetable store backed by a concurrent map.
///
/// Checked writes hold `write` across the clash scan and the insert.
#[derive(Debug, Default)]
pub struct MemoryTimetableStore {
    rows: DashMap<Uuid, TimetableSlot>,
    write: Mutex<()>,
}

impl MemoryTimetableStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn scan(&self, slot: &TimetableSlot, ignore: Option<Uuid>) -> AppResult<()> {
        let snapshot: Vec<TimetableSlot> = self
            .rows
            .iter()
            .filter(|r| r.day == slot.day)
            .map(|r| r.clone())
            .collect();
        match find_clash(&snapshot, &ClashProbe::from(slot), ignore) {
            Some(hit) => Err(clash_error(hit)),
            None => Ok(()),
        }
    }
}

fn ordered(mut slots: Vec<TimetableSlot>) -> Vec<TimetableSlot> {
    slots.sort_by(|a, b| {
        (a.day, a.start_time, &a.room).cmp(&(b.day, b.start_time, &b.room))
    });
    slots
}

#[async_trait]
impl TimetableStore for MemoryTimetableStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<TimetableSlot>> {
        Ok(self.rows.get(&id).map(|r| r.clone()))
    }

    async fn list(&self) -> AppResult<Vec<TimetableSlot>> {
        Ok(ordered(self.rows.iter().map(|r| r.clone()).collect()))
    }

    async fn list_by_day(&self, day: Weekday) -> AppResult<Vec<TimetableSlot>> {
        Ok(ordered(
            self.rows
                .iter()
                .filter(|r| r.day == day)
                .map(|r| r.clone())
                .collect(),
        ))
    }

    async fn create_checked(&self, slot: &TimetableSlot) -> AppResult<TimetableSlot> {
        let _guard = self.write.lock().await;
        self.scan(slot, None)?;
        self.rows.insert(slot.id, slot.clone());
        Ok(slot.clone())
    }

    async fn update_checked(&self, slot: &TimetableSlot) -> AppResult<TimetableSlot> {
        let _guard = self.write.lock().await;
        if !self.rows.contains_key(&slot.id) {
            return Err(missing("Timetable slot", slot.id));
        }
        self.scan(slot, Some(slot.id))?;
        self.rows.insert(slot.id, slot.clone());
        Ok(slot.clone())
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let _guard = self.write.lock().await;
        Ok(self.rows.remove(&id).is_some())
    }

    async fn count_by_day(&self, day: Weekday) -> AppResult<i64> {
        Ok(self.rows.iter().filter(|r| r.day == day).count() as i64)
    }
}
