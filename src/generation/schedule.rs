//! Posting slots. A slot depends only on the item's position in its batch.

pub const POSTING_DAYS: [&str; 5] = ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday"];
pub const POSTING_TIMES: [&str; 4] = ["09:00", "11:00", "14:00", "16:00"];

/// Slot for batch position `position`; day and time cycle independently, so the
/// pairing repeats every 20 positions.
pub fn scheduled_slot(position: usize) -> String {
    format!(
        "{} {}",
        POSTING_DAYS[position % POSTING_DAYS.len()],
        POSTING_TIMES[position % POSTING_TIMES.len()]
    )
}
