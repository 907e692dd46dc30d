pub mod countdown;
pub mod unlock;

pub use countdown::{TimeRemaining, reunion_target, time_remaining};
pub use unlock::{MediaKind, SurpriseItem, SurpriseView, days_remaining, gate, is_unlocked};
