use anyhow::Result;
use chrono::{DateTime, Local, Utc};
use rand::Rng;
use tracing::{info, instrument};

use crate::{
    seed::generate_seed_entries,
    store::{
        draft::EntryDraft,
        entities::{Entry, EntryPatch},
        entry_store::{EntryStorage, EntryStore},
        id::generate_id,
    },
    utils::clock::Clock,
};

/// Bridges a caller to the [EntryStore]: supplies the current time for new entries and fills an
/// empty store with demo data when a session starts.
pub struct Session<S> {
    store: EntryStore<S>,
    clock: Box<dyn Clock>,
}

impl<S: EntryStorage> Session<S> {
    pub fn new(store: EntryStore<S>, clock: Box<dyn Clock>) -> Self {
        Self { store, clock }
    }

    pub fn store(&self) -> &EntryStore<S> {
        &self.store
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.time()
    }

    pub fn local_now(&self) -> DateTime<Local> {
        self.now().with_timezone(&Local)
    }

    /// Snapshot of the store. An empty store is seeded first.
    #[instrument(skip_all)]
    pub async fn initialize<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Vec<Entry>> {
        let entries = self.store.read_entries().await?;
        if !entries.is_empty() {
            return Ok(entries);
        }

        info!("Store is empty, generating demo data");
        self.load_seed_data(rng).await?;
        Ok(self.store.read_entries().await?)
    }

    /// Replaces whatever is stored with freshly generated demo data.
    pub async fn load_seed_data<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<usize> {
        let entries = generate_seed_entries(&self.local_now(), rng);
        let count = entries.len();
        self.store.save(entries).await?;
        info!("Stored {count} demo entries");
        Ok(count)
    }

    /// Stores a new entry dated now.
    pub async fn add_entry<R: Rng + ?Sized>(&self, draft: EntryDraft, rng: &mut R) -> Result<Entry> {
        let now = self.now();
        let entry = draft.into_entry(generate_id(now, rng), now);
        self.store.append(entry.clone()).await?;
        Ok(entry)
    }

    pub async fn edit_entry(&self, id: &str, patch: EntryPatch) -> Result<bool> {
        self.store.update(id, patch).await
    }

    pub async fn delete_entry(&self, id: &str) -> Result<usize> {
        self.store.remove(id).await
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use anyhow::Result;
    use chrono::{Local, TimeZone, Utc};
    use rand::{rngs::StdRng, SeedableRng};

    use crate::{
        seed::SEED_DAYS,
        store::{
            draft::EntryDraft,
            entities::Entry,
            entry_store::{
                test_storage::UnreadableStorage, EntryStorage, EntryStore, MemoryStorage,
                STORAGE_KEY,
            },
        },
        utils::{
            clock::{FixedClock, MockClock},
            logging::TEST_LOGGING,
            time::calendar_day,
        },
    };

    use super::Session;

    fn mock_clock() -> MockClock {
        let mut clock = MockClock::new();
        clock
            .expect_time()
            .returning(|| Utc.with_ymd_and_hms(2025, 6, 17, 12, 0, 0).unwrap());
        clock
    }

    #[tokio::test]
    async fn test_initialize_seeds_empty_store() -> Result<()> {
        *TEST_LOGGING;
        let session = Session::new(EntryStore::new(MemoryStorage::new()), Box::new(mock_clock()));

        let entries = session.initialize(&mut StdRng::seed_from_u64(5)).await?;

        let days = entries
            .iter()
            .map(|v| calendar_day(&v.date, &Local))
            .collect::<HashSet<_>>();
        assert_eq!(days.len(), SEED_DAYS as usize);
        assert_eq!(session.store().get_all().await, entries);
        Ok(())
    }

    #[tokio::test]
    async fn test_initialize_keeps_existing_entries() -> Result<()> {
        let session = Session::new(EntryStore::new(MemoryStorage::new()), Box::new(mock_clock()));
        let mut rng = StdRng::seed_from_u64(5);
        let draft = EntryDraft::parse("読書", None, Some("学習"), Some("40"))?;
        let added = session.add_entry(draft, &mut rng).await?;

        let entries = session.initialize(&mut rng).await?;

        assert_eq!(entries, vec![added]);
        Ok(())
    }

    #[tokio::test]
    async fn test_initialize_does_not_seed_over_unreadable_store() -> Result<()> {
        let storage = UnreadableStorage::default();
        let session = Session::new(EntryStore::new(&storage), Box::new(mock_clock()));
        let mut rng = StdRng::seed_from_u64(4);
        session
            .add_entry(EntryDraft::parse("読書", None, None, Some("80"))?, &mut rng)
            .await?;
        let before = storage.inner.read(STORAGE_KEY).await?;

        storage.fail_reads(true);
        assert!(session.initialize(&mut rng).await.is_err());

        assert_eq!(storage.inner.read(STORAGE_KEY).await?, before);
        Ok(())
    }

    #[tokio::test]
    async fn test_add_entry_uses_clock() -> Result<()> {
        let now = Utc.with_ymd_and_hms(2025, 6, 17, 12, 0, 0).unwrap();
        let session = Session::new(EntryStore::new(MemoryStorage::new()), Box::new(FixedClock(now)));

        let draft = EntryDraft::parse("朝のランニング", Some("5km"), Some("運動, 健康"), Some("30"))?;
        let entry = session
            .add_entry(draft, &mut StdRng::seed_from_u64(9))
            .await?;

        assert_eq!(entry.date, now);
        assert!(entry
            .id
            .starts_with(&format!("{}-", now.timestamp_millis())));
        assert_eq!(entry.tags, vec!["運動", "健康"]);
        assert_eq!(entry.value, 30.);
        assert_eq!(session.store().get_all().await, vec![entry]);
        Ok(())
    }

    #[tokio::test]
    async fn test_edit_and_delete() -> Result<()> {
        let session = Session::new(EntryStore::new(MemoryStorage::new()), Box::new(mock_clock()));
        let mut rng = StdRng::seed_from_u64(1);
        let entry = session
            .add_entry(EntryDraft::parse("瞑想", Some("朝"), None, Some("10"))?, &mut rng)
            .await?;

        let patch = EntryDraft::parse("瞑想 20分", None, Some("健康"), Some("20"))?.into_patch();
        assert!(session.edit_entry(&entry.id, patch).await?);

        let edited: Vec<Entry> = session.store().get_all().await;
        assert_eq!(edited[0].title, "瞑想 20分");
        assert_eq!(edited[0].note, None);
        assert_eq!(edited[0].date, entry.date);

        assert_eq!(session.delete_entry("unknown").await?, 0);
        assert_eq!(session.delete_entry(&entry.id).await?, 1);
        assert!(session.store().get_all().await.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_load_seed_data_overwrites() -> Result<()> {
        let session = Session::new(EntryStore::new(MemoryStorage::new()), Box::new(mock_clock()));
        let mut rng = StdRng::seed_from_u64(2);
        session
            .add_entry(EntryDraft::parse("筋トレ", None, None, None)?, &mut rng)
            .await?;

        let count = session.load_seed_data(&mut rng).await?;

        let entries = session.store().get_all().await;
        assert_eq!(entries.len(), count);
        assert!(entries.iter().all(|v| v.id.contains('-')));
        assert!((SEED_DAYS as usize..=SEED_DAYS as usize * 3).contains(&count));
        Ok(())
    }
}
