use std::fmt::Write;

use ansi_term::Colour;
use anyhow::{bail, Result};
use chrono::Local;
use clap::Parser;

use crate::{
    config::EngineConfig,
    query::{distinct_tags, sort::SortOption, EntryFilter, EntryQuery},
    session::Session,
    store::{
        draft::{parse_patch, EntryDraft},
        entities::Entry,
        entry_store::EntryStorage,
    },
};

#[derive(Debug, Parser)]
pub struct ListCommand {
    #[arg(short, long, help = "Only entries whose title or note contains this text")]
    search: Option<String>,
    #[arg(short, long, help = "Only entries with this tag")]
    tag: Option<String>,
    #[arg(
        short,
        long,
        value_parser = clap::value_parser!(u32).range(1..),
        help = "Only entries from the last N days, for example 7, 30 or 90"
    )]
    days: Option<u32>,
    #[arg(
        long,
        default_value_t = SortOption::DateDesc.to_string(),
        help = "One of date-desc, date-asc, value-desc, value-asc, title-asc, title-desc"
    )]
    sort: String,
}

#[derive(Debug, Parser)]
pub struct AddCommand {
    title: String,
    #[arg(short, long)]
    note: Option<String>,
    #[arg(short, long, help = "Comma separated tags")]
    tags: Option<String>,
    #[arg(short, long, help = "Numeric score, anything unparsable counts as 0")]
    value: Option<String>,
}

#[derive(Debug, Parser)]
pub struct EditCommand {
    id: String,
    #[arg(long)]
    title: Option<String>,
    #[arg(short, long, help = "New note. An empty note removes it")]
    note: Option<String>,
    #[arg(short, long, help = "Comma separated tags, replaces the previous ones")]
    tags: Option<String>,
    #[arg(short, long)]
    value: Option<String>,
}

pub async fn process_list_command<S: EntryStorage>(
    ListCommand {
        search,
        tag,
        days,
        sort,
    }: ListCommand,
    session: &Session<S>,
    config: &EngineConfig,
) -> Result<()> {
    let collation = config.collation()?;
    let entries = session.initialize(&mut rand::rng()).await?;

    let query = EntryQuery::new(
        EntryFilter {
            search,
            tag,
            recent_days: days,
        },
        SortOption::from(sort.as_str()),
    );
    let listed = query.run(&entries, &session.local_now(), &collation);

    if listed.is_empty() {
        println!("No entries found");
    }
    for entry in listed {
        print!("{}", format_entry_block(entry));
    }
    Ok(())
}

pub async fn process_tags_command<S: EntryStorage>(session: &Session<S>) -> Result<()> {
    let entries = session.store().get_all().await;
    for tag in distinct_tags(&entries) {
        println!("{tag}");
    }
    Ok(())
}

pub async fn process_add_command<S: EntryStorage>(
    AddCommand {
        title,
        note,
        tags,
        value,
    }: AddCommand,
    session: &Session<S>,
) -> Result<()> {
    let draft = EntryDraft::parse(&title, note.as_deref(), tags.as_deref(), value.as_deref())?;
    let entry = session.add_entry(draft, &mut rand::rng()).await?;
    println!("Added {}", entry.id);
    Ok(())
}

pub async fn process_edit_command<S: EntryStorage>(
    EditCommand {
        id,
        title,
        note,
        tags,
        value,
    }: EditCommand,
    session: &Session<S>,
) -> Result<()> {
    let patch = parse_patch(
        title.as_deref(),
        note.as_deref(),
        tags.as_deref(),
        value.as_deref(),
    )?;
    if patch.is_empty() {
        bail!("Nothing to change, pass at least one of --title, --note, --tags or --value");
    }

    if session.edit_entry(&id, patch).await? {
        println!("Updated {id}");
    } else {
        println!("No entry with id {id}");
    }
    Ok(())
}

pub async fn process_delete_command<S: EntryStorage>(id: &str, session: &Session<S>) -> Result<()> {
    match session.delete_entry(id).await? {
        0 => println!("No entry with id {id}"),
        _ => println!("Deleted {id}"),
    }
    Ok(())
}

/// Single line summary: local date, title, value and tags.
pub fn format_entry(entry: &Entry) -> String {
    let mut line = format!(
        "{}\t{}\t{}",
        entry.date.with_timezone(&Local).format("%Y/%-m/%-d %H:%M"),
        entry.title,
        entry.value
    );
    for tag in &entry.tags {
        let _ = write!(line, " {}", Colour::Cyan.paint(format!("#{tag}")));
    }
    line
}

fn format_entry_block(entry: &Entry) -> String {
    let mut block = format!(
        "{}  {}\n",
        format_entry(entry),
        Colour::Fixed(244).paint(entry.id.as_str())
    );
    if let Some(note) = &entry.note {
        let _ = writeln!(block, "\t{note}");
    }
    block
}
