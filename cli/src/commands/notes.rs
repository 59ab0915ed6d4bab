//! NOTES command - Search, create, and rename notes.

use anyhow::Result;
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use clap::{Args, Subcommand};
use colored::Colorize;
use serde::Serialize;

use evernote_client::{Client, NoteSearchOptions};
use evernote_core::types::{Note, NoteGuid, NotePage, NotebookGuid};

use super::{HumanReadable, format_timestamp_opt, output, truncate};

/// Arguments for the notes command.
#[derive(Args)]
pub struct NotesArgs {
    #[command(subcommand)]
    pub action: NotesAction,
}

#[derive(Subcommand)]
pub enum NotesAction {
    /// Search note metadata
    Find {
        /// Restrict the search to one notebook
        #[arg(long)]
        notebook: Option<NotebookGuid>,

        /// Words to filter the search
        #[arg(short, long)]
        keywords: Option<String>,

        /// Offset to start the result window at
        #[arg(long, default_value_t = 0)]
        offset: u32,

        /// Maximum number of notes to return
        #[arg(long, default_value_t = 50)]
        max: u32,

        /// Return results in ascending order
        #[arg(long)]
        ascending: bool,
    },

    /// Create a new note
    Create {
        /// Notebook to create the note in
        notebook: NotebookGuid,

        /// Note title
        title: String,

        /// Pre-formatted ENML fragment for the note body
        #[arg(short, long)]
        body: Option<String>,

        /// Image attachment as a data URI, or @path to read a file
        #[arg(short, long)]
        attachment: Option<String>,

        /// MIME type used when --attachment reads from a file
        #[arg(long, default_value = "image/png")]
        mime: String,
    },

    /// Rename an existing note
    Rename {
        /// Note to rename
        note: NoteGuid,

        /// New note title
        title: String,
    },
}

/// One window of search results.
#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct FindResponse(pub NotePage);

/// A note returned from create or rename.
#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct SavedNote(pub Note);

impl HumanReadable for FindResponse {
    fn print_human(&self) {
        println!("{}", "Notes".green().bold());
        println!("{}", "=".repeat(70));
        println!();

        if self.0.notes.is_empty() {
            println!("  {}", "(No matching notes)".dimmed());
            return;
        }

        for note in &self.0.notes {
            let title = note.title.as_deref().unwrap_or("(untitled)");
            println!("  {}", truncate(title, 50).bold());
            println!("    {} {}", "GUID:".cyan(), note.guid);
            println!(
                "    {} {}",
                "Updated:".cyan(),
                format_timestamp_opt(&note.updated)
            );
            if let Some(mime) = &note.largest_resource_mime {
                let size = note
                    .largest_resource_size
                    .map(|s| format!("{} bytes", s))
                    .unwrap_or_else(|| "-".to_string());
                println!("    {} {} ({})", "Attachment:".cyan(), mime, size);
            }
            println!();
        }

        println!(
            "  {} {} of {} (from {})",
            "Showing:".cyan(),
            self.0.notes.len(),
            self.0.total_notes,
            self.0.start_index
        );
    }
}

impl HumanReadable for SavedNote {
    fn print_human(&self) {
        println!("{}", "Note saved!".green().bold());
        println!();
        println!("  {} {}", "GUID:".cyan(), self.0.guid);
        println!("  {} {}", "Title:".cyan(), self.0.title);
        println!("  {} {}", "Notebook:".cyan(), self.0.notebook_guid);
    }
}

/// Resolve an --attachment value: pass data URIs through, wrap @path file
/// contents into one.
fn resolve_attachment(value: &str, mime: &str) -> Result<String> {
    if let Some(path) = value.strip_prefix('@') {
        let bytes = std::fs::read(path)?;
        Ok(format!("data:{};base64,{}", mime, BASE64.encode(&bytes)))
    } else {
        Ok(value.to_string())
    }
}

/// Execute the notes command.
pub async fn execute(client: &Client, token: &str, human: bool, args: NotesArgs) -> Result<()> {
    match args.action {
        NotesAction::Find {
            notebook,
            keywords,
            offset,
            max,
            ascending,
        } => {
            let options = NoteSearchOptions {
                offset,
                keywords,
                ascending,
                max_results: max,
            };
            let page = client.find_notes_metadata(token, notebook, options).await?;
            output(&FindResponse(page), human)
        }

        NotesAction::Create {
            notebook,
            title,
            body,
            attachment,
            mime,
        } => {
            let attachment = attachment
                .as_deref()
                .map(|value| resolve_attachment(value, &mime))
                .transpose()?;
            let note = client
                .create_note(token, notebook, &title, body.as_deref(), attachment.as_deref())
                .await?;
            output(&SavedNote(note), human)
        }

        NotesAction::Rename { note, title } => {
            let note = client.update_note(token, note, &title).await?;
            output(&SavedNote(note), human)
        }
    }
}
