//! Room clash detection over weekly slots.
//!
//! Two bookings clash when they share a day and a room and their half-open
//! `[start, end)` windows intersect. Back-to-back slots do not clash.

use uuid::Uuid;

use super::model::{NewSlot, TimetableSlot};
use super::time::TimeOfDay;
use super::weekday::Weekday;

/// The part of a booking the clash scan looks at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClashProbe {
    pub day: Weekday,
    pub room: String,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
}

impl From<&NewSlot> for ClashProbe {
    fn from(slot: &NewSlot) -> Self {
        Self {
            day: slot.day,
            room: slot.room.clone(),
            start_time: slot.start_time,
            end_time: slot.end_time,
        }
    }
}

impl From<&TimetableSlot> for ClashProbe {
    fn from(slot: &TimetableSlot) -> Self {
        Self {
            day: slot.day,
            room: slot.room.clone(),
            start_time: slot.start_time,
            end_time: slot.end_time,
        }
    }
}

/// Whether two half-open windows intersect.
pub fn overlaps(a_start: TimeOfDay, a_end: TimeOfDay, b_start: TimeOfDay, b_end: TimeOfDay) -> bool {
    a_start.max(b_start) < a_end.min(b_end)
}

/// Room labels are free text; compare them trimmed and case-insensitively.
pub fn same_room(a: &str, b: &str) -> bool {
    a.trim().eq_ignore_ascii_case(b.trim())
}

/// Return the first slot that clashes with `probe`, skipping `ignore`.
pub fn find_clash<'a, I>(slots: I, probe: &ClashProbe, ignore: Option<Uuid>) -> Option<&'a TimetableSlot>
where
    I: IntoIterator<Item = &'a TimetableSlot>,
{
    slots.into_iter().find(|slot| {
        Some(slot.id) != ignore
            && slot.day == probe.day
            && same_room(&slot.room, &probe.room)
            && overlaps(slot.start_time, slot.end_time, probe.start_time, probe.end_time)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> TimeOfDay {
        s.parse().unwrap()
    }

    fn slot(day: Weekday, room: &str, start: &str, end: &str) -> TimetableSlot {
        TimetableSlot::from_new(NewSlot::new("CS101", "Dr. Rao", room, day, t(start), t(end)).unwrap())
    }

    fn probe(day: Weekday, room: &str, start: &str, end: &str) -> ClashProbe {
        ClashProbe {
            day,
            room: room.to_string(),
            start_time: t(start),
            end_time: t(end),
        }
    }

    #[test]
    fn test_overlapping_window_clashes() {
        let existing = vec![slot(Weekday::Monday, "R1", "09:00", "10:00")];
        let hit = find_clash(&existing, &probe(Weekday::Monday, "R1", "09:30", "10:30"), None);
        assert_eq!(hit.map(|s| s.id), Some(existing[0].id));
    }

    #[test]
    fn test_back_to_back_is_allowed() {
        let existing = vec![slot(Weekday::Monday, "R1", "09:00", "10:00")];
        assert!(find_clash(&existing, &probe(Weekday::Monday, "R1", "10:00", "11:00"), None).is_none());
        assert!(find_clash(&existing, &probe(Weekday::Monday, "R1", "08:00", "09:00"), None).is_none());
    }

    #[test]
    fn test_other_day_or_room_is_allowed() {
        let existing = vec![slot(Weekday::Monday, "R1", "09:00", "10:00")];
        assert!(find_clash(&existing, &probe(Weekday::Tuesday, "R1", "09:30", "10:30"), None).is_none());
        assert!(find_clash(&existing, &probe(Weekday::Monday, "R2", "09:30", "10:30"), None).is_none());
    }

    #[test]
    fn test_room_label_ignores_case_and_padding() {
        let existing = vec![slot(Weekday::Monday, "Lab 1", "09:00", "10:00")];
        assert!(find_clash(&existing, &probe(Weekday::Monday, " lab 1", "09:15", "09:45"), None).is_some());
    }

    #[test]
    fn test_ignore_id_skips_self() {
        let existing = vec![slot(Weekday::Monday, "R1", "09:00", "10:00")];
        let moved = probe(Weekday::Monday, "R1", "09:30", "10:30");
        assert!(find_clash(&existing, &moved, Some(existing[0].id)).is_none());
    }

    #[test]
    fn test_containment_clashes() {
        let existing = vec![slot(Weekday::Friday, "R1", "09:00", "12:00")];
        assert!(find_clash(&existing, &probe(Weekday::Friday, "R1", "10:00", "11:00"), None).is_some());
        assert!(find_clash(&existing, &probe(Weekday::Friday, "R1", "08:00", "13:00"), None).is_some());
    }
}
