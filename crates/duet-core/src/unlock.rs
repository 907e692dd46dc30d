//! Surprise unlock gate.
//!
//! Decides whether a time-locked surprise may be rendered. The gate is the
//! only path from a stored item to an outward-facing view: a locked item
//! yields a view that carries no content and no media reference, so a
//! payload cannot leak before its unlock date.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Declared content type of a surprise's attached file, or `text` when the
/// surprise is message-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Text,
    Image,
    Video,
    Audio,
}

impl MediaKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Text => "text",
            MediaKind::Image => "image",
            MediaKind::Video => "video",
            MediaKind::Audio => "audio",
        }
    }

    pub fn parse(s: &str) -> Option<MediaKind> {
        match s {
            "text" => Some(MediaKind::Text),
            "image" => Some(MediaKind::Image),
            "video" => Some(MediaKind::Video),
            "audio" => Some(MediaKind::Audio),
            _ => None,
        }
    }
}

/// A stored surprise as the gate sees it. Created once by a user submission
/// and never mutated afterwards; `unlocked` is the advisory stored flag, and
/// the date comparison wins over it.
#[derive(Debug, Clone)]
pub struct SurpriseItem {
    pub title: String,
    pub content: Option<String>,
    pub media_url: Option<String>,
    pub media_kind: MediaKind,
    pub unlock_date: NaiveDate,
    pub unlocked: bool,
}

/// What a caller may render for a surprise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurpriseView {
    Unlocked {
        content: Option<String>,
        media_url: Option<String>,
    },
    Locked {
        days_remaining: i64,
    },
}

/// `stored_flag || today >= unlock_date`. Monotonic: once true for some
/// `today`, true for every later date.
pub fn is_unlocked(stored_flag: bool, unlock_date: NaiveDate, today: NaiveDate) -> bool {
    stored_flag || today >= unlock_date
}

/// Whole days until `unlock_date`, never negative.
pub fn days_remaining(unlock_date: NaiveDate, today: NaiveDate) -> i64 {
    (unlock_date - today).num_days().max(0)
}

/// Gate an item for rendering on `today`. Pure and idempotent.
pub fn gate(item: &SurpriseItem, today: NaiveDate) -> SurpriseView {
    if is_unlocked(item.unlocked, item.unlock_date, today) {
        SurpriseView::Unlocked {
            content: item.content.clone(),
            media_url: item.media_url.clone(),
        }
    } else {
        SurpriseView::Locked {
            days_remaining: days_remaining(item.unlock_date, today),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn item(unlock: NaiveDate, unlocked: bool) -> SurpriseItem {
        SurpriseItem {
            title: "for day 50".into(),
            content: Some("see you soon".into()),
            media_url: Some("/files/abc".into()),
            media_kind: MediaKind::Image,
            unlock_date: unlock,
            unlocked,
        }
    }

    #[test]
    fn unlocks_on_the_unlock_date_itself() {
        let today = date(2025, 6, 1);
        assert!(is_unlocked(false, date(2025, 6, 1), today));
        assert_eq!(days_remaining(date(2025, 6, 1), today), 0);
    }

    #[test]
    fn unlock_is_monotonic_in_today() {
        let unlock = date(2025, 6, 1);
        let mut seen_unlocked = false;
        let mut day = date(2025, 5, 25);
        while day <= date(2025, 6, 10) {
            let unlocked = is_unlocked(false, unlock, day);
            if seen_unlocked {
                assert!(unlocked, "unlock regressed on {day}");
            }
            seen_unlocked |= unlocked;
            day = day.succ_opt().unwrap();
        }
        assert!(seen_unlocked);
    }

    #[test]
    fn stored_flag_wins_even_before_the_date() {
        let today = date(2025, 1, 1);
        assert!(is_unlocked(true, date(2030, 1, 1), today));
    }

    #[test]
    fn days_remaining_never_negative() {
        let unlock = date(2025, 6, 1);
        assert_eq!(days_remaining(unlock, date(2025, 5, 30)), 2);
        assert_eq!(days_remaining(unlock, date(2025, 6, 1)), 0);
        assert_eq!(days_remaining(unlock, date(2027, 1, 1)), 0);
    }

    #[test]
    fn locked_view_carries_no_payload() {
        let today = date(2025, 5, 20);
        let view = gate(&item(date(2025, 6, 1), false), today);
        match view {
            SurpriseView::Locked { days_remaining } => assert_eq!(days_remaining, 12),
            SurpriseView::Unlocked { .. } => panic!("item should be locked"),
        }
    }

    #[test]
    fn unlocked_view_exposes_full_payload() {
        let today = date(2025, 6, 2);
        let view = gate(&item(date(2025, 6, 1), false), today);
        assert_eq!(
            view,
            SurpriseView::Unlocked {
                content: Some("see you soon".into()),
                media_url: Some("/files/abc".into()),
            }
        );
    }

    #[test]
    fn gate_is_idempotent() {
        let today = date(2025, 5, 20);
        let it = item(date(2025, 6, 1), false);
        assert_eq!(gate(&it, today), gate(&it, today));
    }

    #[test]
    fn media_kind_round_trips_through_str() {
        for kind in [MediaKind::Text, MediaKind::Image, MediaKind::Video, MediaKind::Audio] {
            assert_eq!(MediaKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(MediaKind::parse("gif"), None);
    }
}
