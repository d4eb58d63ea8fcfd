use crate::models::{ChartPoint, DashboardStats, Emotion, JournalEntry};
use crate::store::EntryStore;

pub const CHART_WINDOW: usize = 10;
const STREAK_CAP: usize = 7;

pub fn recompute(entries: &[JournalEntry]) -> DashboardStats {
    let count = entries.len();
    let avg = if count == 0 {
        0.0
    } else {
        let total: u32 = entries.iter().map(|entry| u32::from(entry.score)).sum();
        round_tenth(f64::from(total) / count as f64)
    };

    DashboardStats {
        avg,
        count,
        // Entry count capped at a week, not consecutive days.
        streak: count.min(STREAK_CAP),
        top_emotion: top_emotion(entries),
    }
}

/// Most frequent label. On a tie the label met first while walking the list
/// (newest first) wins.
pub fn top_emotion(entries: &[JournalEntry]) -> Option<Emotion> {
    let mut counts: Vec<(Emotion, usize)> = Vec::new();
    for entry in entries {
        match counts.iter_mut().find(|(emotion, _)| *emotion == entry.emotion) {
            Some((_, n)) => *n += 1,
            None => counts.push((entry.emotion, 1)),
        }
    }

    let mut best: Option<(Emotion, usize)> = None;
    for (emotion, n) in counts {
        if best.is_none_or(|(_, top)| n > top) {
            best = Some((emotion, n));
        }
    }
    best.map(|(emotion, _)| emotion)
}

pub fn chart_feed(store: &EntryStore) -> Vec<ChartPoint> {
    store
        .windowed(CHART_WINDOW)
        .into_iter()
        .map(|entry| ChartPoint {
            label: entry.date.format("%Y-%m-%d").to_string(),
            score: entry.score,
        })
        .collect()
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::default_entries;
    use chrono::{Duration, NaiveDate};

    fn entry(emotion: Emotion, score: u8) -> JournalEntry {
        JournalEntry {
            date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            text: String::new(),
            emotion,
            score,
        }
    }

    #[test]
    fn seed_stats() {
        let stats = recompute(&default_entries());
        // (85 + 40 + 78 + 65 + 90) / 5 = 71.6
        assert_eq!(stats.avg, 71.6);
        assert_eq!(stats.count, 5);
        assert_eq!(stats.streak, 5);
        // All labels tie at one; the newest entry's label wins.
        assert_eq!(stats.top_emotion, Some(Emotion::Happy));
    }

    #[test]
    fn average_rounds_to_one_decimal() {
        let entries = vec![entry(Emotion::Sad, 10), entry(Emotion::Sad, 10), entry(Emotion::Sad, 11)];
        assert_eq!(recompute(&entries).avg, 10.3);
    }

    #[test]
    fn streak_is_capped_at_seven() {
        let entries = vec![entry(Emotion::Neutral, 50); 12];
        let stats = recompute(&entries);
        assert_eq!(stats.count, 12);
        assert_eq!(stats.streak, 7);
    }

    #[test]
    fn top_emotion_prefers_higher_count_then_first_seen() {
        let entries = vec![
            entry(Emotion::Sad, 30),
            entry(Emotion::Happy, 80),
            entry(Emotion::Happy, 85),
            entry(Emotion::Sad, 35),
            entry(Emotion::Angry, 30),
        ];
        assert_eq!(top_emotion(&entries), Some(Emotion::Sad));

        let entries = vec![
            entry(Emotion::Sad, 30),
            entry(Emotion::Happy, 80),
            entry(Emotion::Happy, 85),
        ];
        assert_eq!(top_emotion(&entries), Some(Emotion::Happy));
    }

    #[test]
    fn empty_list() {
        let stats = recompute(&[]);
        assert_eq!(stats.avg, 0.0);
        assert_eq!(stats.count, 0);
        assert_eq!(stats.streak, 0);
        assert_eq!(stats.top_emotion, None);
    }

    #[test]
    fn recompute_is_idempotent() {
        let entries = default_entries();
        assert_eq!(recompute(&entries), recompute(&entries));
    }

    #[test]
    fn chart_uses_ten_newest_oldest_first() {
        let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let entries = (0..15)
            .rev()
            .map(|i| JournalEntry {
                date: start + Duration::days(i),
                text: String::new(),
                emotion: Emotion::Neutral,
                score: i as u8,
            })
            .collect();
        let store = EntryStore::new(entries);

        let feed = chart_feed(&store);
        assert_eq!(feed.len(), CHART_WINDOW);
        assert_eq!(feed.first().map(|p| p.score), Some(5));
        assert_eq!(feed.last().map(|p| p.score), Some(14));
        assert_eq!(feed[0].label, "2025-01-06");
    }
}
