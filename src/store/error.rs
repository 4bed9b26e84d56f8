use thiserror::Error;

/// Why the persisted record couldn't be read. [load](super::entry_store::EntryStore::load) reports
/// every case, writes only fail on `Io` and [get_all](super::entry_store::EntryStore::get_all)
/// degrades to an empty collection.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("No record stored under {0}")]
    Missing(String),

    #[error("Stored record is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),

    #[error("Failed to read stored record: {0}")]
    Io(#[from] std::io::Error),
}

/// Why an import was rejected. The store is untouched in every case.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Import is not valid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),

    #[error("Import has no `entries` field")]
    MissingEntries,

    #[error("Import field `entries` is not an array")]
    EntriesNotArray,

    #[error("Entry {index} can't be imported: {source}")]
    InvalidEntry {
        index: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to persist imported entries: {0}")]
    Write(#[from] std::io::Error),
}
