use crate::models::{Emotion, JournalEntry};
use crate::storage::{JOURNAL_ENTRIES_KEY, LocalStorage};
use chrono::NaiveDate;
use tracing::warn;

const MAX_SCORE: u8 = 100;

#[derive(Debug, Clone, PartialEq)]
pub struct EntryStore {
    entries: Vec<JournalEntry>,
}

impl EntryStore {
    pub fn new(entries: Vec<JournalEntry>) -> Self {
        Self { entries }
    }

    pub fn load_or_seed(storage: &LocalStorage) -> Self {
        Self::new(load(storage).unwrap_or_else(default_entries))
    }

    pub fn entries(&self) -> &[JournalEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn prepend(&mut self, entry: JournalEntry) {
        self.entries.insert(0, entry);
    }

    pub fn recent(&self, n: usize) -> &[JournalEntry] {
        &self.entries[..n.min(self.entries.len())]
    }

    pub fn windowed(&self, n: usize) -> Vec<&JournalEntry> {
        self.recent(n).iter().rev().collect()
    }

    // The in-memory list stays authoritative when the write fails.
    pub async fn save(&self, storage: &mut LocalStorage) {
        let payload = match serde_json::to_string(&self.entries) {
            Ok(payload) => payload,
            Err(err) => {
                warn!("failed to serialize journal entries: {err}");
                return;
            }
        };
        if let Err(err) = storage.set(JOURNAL_ENTRIES_KEY, payload).await {
            warn!("failed to persist journal entries: {err}");
        }
    }
}

pub fn load(storage: &LocalStorage) -> Option<Vec<JournalEntry>> {
    let raw = storage.get(JOURNAL_ENTRIES_KEY)?;
    match serde_json::from_str::<Vec<JournalEntry>>(raw) {
        Ok(entries) if entries.iter().any(|entry| entry.score > MAX_SCORE) => {
            warn!("ignoring journal entries with scores above {MAX_SCORE}");
            None
        }
        Ok(entries) => Some(entries),
        Err(err) => {
            warn!("ignoring unreadable journal entries: {err}");
            None
        }
    }
}

pub fn default_entries() -> Vec<JournalEntry> {
    let seed = [
        ((2024, 8, 28), "Had a great day at work, feeling accomplished!", Emotion::Happy, 85),
        ((2024, 8, 27), "Feeling a bit anxious about the upcoming presentation.", Emotion::Anxious, 40),
        ((2024, 8, 26), "Relaxing weekend with family, very content.", Emotion::Content, 78),
        ((2024, 8, 25), "Challenging day but learned a lot.", Emotion::Mixed, 65),
        ((2024, 8, 24), "Excited about new opportunities!", Emotion::Excited, 90),
    ];
    seed.into_iter()
        .filter_map(|((y, m, d), text, emotion, score)| {
            Some(JournalEntry {
                date: NaiveDate::from_ymd_opt(y, m, d)?,
                text: text.to_string(),
                emotion,
                score,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(day: u32, score: u8) -> JournalEntry {
        JournalEntry {
            date: NaiveDate::from_ymd_opt(2025, 1, day).unwrap(),
            text: format!("day {day}"),
            emotion: Emotion::Neutral,
            score,
        }
    }

    #[tokio::test]
    async fn save_then_load_round_trips() {
        let mut storage = LocalStorage::in_memory();
        let store = EntryStore::new(vec![entry(3, 70), entry(2, 10), entry(1, 100)]);
        store.save(&mut storage).await;
        assert_eq!(load(&storage), Some(store.entries().to_vec()));
    }

    #[test]
    fn missing_key_loads_nothing() {
        let storage = LocalStorage::in_memory();
        assert_eq!(load(&storage), None);
        assert_eq!(EntryStore::load_or_seed(&storage).len(), 5);
    }

    #[tokio::test]
    async fn corrupt_json_falls_back_to_seed() {
        let mut storage = LocalStorage::in_memory();
        storage
            .set(JOURNAL_ENTRIES_KEY, "{not json".to_string())
            .await
            .unwrap();
        assert_eq!(load(&storage), None);
        let store = EntryStore::load_or_seed(&storage);
        assert_eq!(store.entries(), default_entries().as_slice());
        assert_eq!(store.entries()[0].emotion, Emotion::Happy);
    }

    #[tokio::test]
    async fn non_array_payload_is_rejected() {
        let mut storage = LocalStorage::in_memory();
        storage
            .set(JOURNAL_ENTRIES_KEY, r#"{"date":"2025-01-01"}"#.to_string())
            .await
            .unwrap();
        assert_eq!(load(&storage), None);
    }

    #[tokio::test]
    async fn scores_above_one_hundred_fall_back_to_seed() {
        let mut storage = LocalStorage::in_memory();
        storage
            .set(
                JOURNAL_ENTRIES_KEY,
                r#"[{"date":"2025-01-01","text":"x","emotion":"Happy","score":250}]"#.to_string(),
            )
            .await
            .unwrap();
        assert_eq!(load(&storage), None);
        assert_eq!(EntryStore::load_or_seed(&storage).entries(), default_entries().as_slice());

        storage
            .set(
                JOURNAL_ENTRIES_KEY,
                r#"[{"date":"2025-01-01","text":"x","emotion":"Happy","score":100}]"#.to_string(),
            )
            .await
            .unwrap();
        assert_eq!(load(&storage).map(|entries| entries.len()), Some(1));
    }

    #[tokio::test]
    async fn empty_array_is_kept() {
        let mut storage = LocalStorage::in_memory();
        storage.set(JOURNAL_ENTRIES_KEY, "[]".to_string()).await.unwrap();
        assert!(EntryStore::load_or_seed(&storage).is_empty());
    }

    #[test]
    fn prepend_recent_and_windowed() {
        let mut store = EntryStore::new(vec![entry(2, 20), entry(1, 10)]);
        store.prepend(entry(3, 30));

        let recent: Vec<u8> = store.recent(2).iter().map(|e| e.score).collect();
        assert_eq!(recent, vec![30, 20]);

        let windowed: Vec<u8> = store.windowed(10).iter().map(|e| e.score).collect();
        assert_eq!(windowed, vec![10, 20, 30]);

        assert_eq!(store.recent(0).len(), 0);
    }
}
