use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::error;

use crate::{session::Session, store::entry_store::EntryStorage};

pub async fn process_export_command<S: EntryStorage>(
    output: Option<PathBuf>,
    session: &Session<S>,
) -> Result<()> {
    let exported = session.store().export().await?;
    match output {
        Some(path) => {
            tokio::fs::write(&path, exported)
                .await
                .with_context(|| format!("Failed to write export into {path:?}"))?;
            println!("Exported into {path:?}");
        }
        None => println!("{exported}"),
    }
    Ok(())
}

pub async fn process_import_command<S: EntryStorage>(
    file: &Path,
    session: &Session<S>,
) -> Result<()> {
    let text = tokio::fs::read_to_string(file)
        .await
        .with_context(|| format!("Failed to read {file:?}"))?;

    match session.store().try_import(&text).await {
        Ok(count) => {
            println!("Imported {count} entries");
            Ok(())
        }
        Err(e) => {
            error!("Import of {file:?} failed {e}");
            Err(e).context("Import failed, check the file format. Nothing was changed")
        }
    }
}

pub async fn process_seed_command<S: EntryStorage>(session: &Session<S>) -> Result<()> {
    let count = session.load_seed_data(&mut rand::rng()).await?;
    println!("Replaced all entries with {count} demo entries");
    Ok(())
}

pub async fn process_reset_command<S: EntryStorage>(yes: bool, session: &Session<S>) -> Result<()> {
    if !yes {
        let count = session.store().get_all().await.len();
        println!("This deletes all {count} entries. Run again with --yes to confirm");
        return Ok(());
    }

    session.store().reset().await?;
    println!("All entries deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use chrono::{TimeZone, Utc};
    use tempfile::tempdir;

    use crate::{
        session::Session,
        store::{
            draft::EntryDraft,
            entry_store::{EntryStore, MemoryStorage},
        },
        utils::clock::FixedClock,
    };

    use super::{process_export_command, process_import_command, process_reset_command};

    fn session() -> Session<MemoryStorage> {
        Session::new(
            EntryStore::new(MemoryStorage::new()),
            Box::new(FixedClock(Utc.with_ymd_and_hms(2025, 6, 17, 12, 0, 0).unwrap())),
        )
    }

    #[tokio::test]
    async fn test_export_then_import_file() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("export.json");

        let source = session();
        source
            .add_entry(EntryDraft::parse("読書", None, Some("学習"), Some("80"))?, &mut rand::rng())
            .await?;
        process_export_command(Some(path.clone()), &source).await?;

        let target = session();
        process_import_command(&path, &target).await?;
        assert_eq!(target.store().get_all().await, source.store().get_all().await);
        Ok(())
    }

    #[tokio::test]
    async fn test_import_bad_file_fails() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("bad.json");
        std::fs::write(&path, r#"{"foo": []}"#)?;

        let target = session();
        target
            .add_entry(EntryDraft::parse("瞑想", None, None, None)?, &mut rand::rng())
            .await?;

        assert!(process_import_command(&path, &target).await.is_err());
        assert_eq!(target.store().get_all().await.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_reset_requires_confirmation() -> Result<()> {
        let target = session();
        target
            .add_entry(EntryDraft::parse("瞑想", None, None, None)?, &mut rand::rng())
            .await?;

        process_reset_command(false, &target).await?;
        assert_eq!(target.store().get_all().await.len(), 1);

        process_reset_command(true, &target).await?;
        assert!(target.store().get_all().await.is_empty());
        Ok(())
    }
}
