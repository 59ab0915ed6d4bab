//! NOTEBOOKS command - List, create, and rename notebooks.

use anyhow::Result;
use clap::{Args, Subcommand};
use colored::Colorize;
use serde::Serialize;

use evernote_client::Client;
use evernote_core::types::{LinkedNotebook, Notebook, NotebookGuid, SharedNotebook};

use super::{HumanReadable, format_timestamp_opt, output};

/// Arguments for the notebooks command.
#[derive(Args)]
pub struct NotebooksArgs {
    #[command(subcommand)]
    pub action: NotebooksAction,
}

#[derive(Subcommand)]
pub enum NotebooksAction {
    /// List the account's own notebooks
    List,

    /// List notebooks other accounts have shared with this one
    Linked,

    /// List share grants on notebooks this account is sharing
    Shared,

    /// Create a new notebook
    Create {
        /// Name for the new notebook
        name: String,
    },

    /// Rename an existing notebook
    Rename {
        /// Notebook to rename
        guid: NotebookGuid,

        /// New notebook name
        name: String,
    },
}

/// Response from listing the account's notebooks.
#[derive(Debug, Serialize)]
pub struct NotebookListResponse {
    pub notebooks: Vec<Notebook>,
}

/// Response from listing linked notebooks.
#[derive(Debug, Serialize)]
pub struct LinkedListResponse {
    pub notebooks: Vec<LinkedNotebook>,
}

/// Response from listing share grants.
#[derive(Debug, Serialize)]
pub struct SharedListResponse {
    pub notebooks: Vec<SharedNotebook>,
}

/// A notebook returned from create or rename.
#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct SavedNotebook(pub Notebook);

impl HumanReadable for NotebookListResponse {
    fn print_human(&self) {
        println!("{}", "Notebooks".green().bold());
        println!("{}", "=".repeat(60));
        println!();

        if self.notebooks.is_empty() {
            println!("  {}", "(No notebooks)".dimmed());
            return;
        }

        for notebook in &self.notebooks {
            let default_marker = if notebook.default_notebook {
                "*".yellow()
            } else {
                " ".normal()
            };

            println!("  {} {}", default_marker, notebook.name.bold());
            println!("    {} {}", "GUID:".cyan(), notebook.guid);
            println!(
                "    {} {}",
                "Updated:".cyan(),
                format_timestamp_opt(&notebook.updated)
            );
            println!();
        }

        println!("  {} {}", "Total:".cyan(), self.notebooks.len());
        println!();
        println!("  {}", "* = default notebook".dimmed());
    }
}

impl HumanReadable for LinkedListResponse {
    fn print_human(&self) {
        println!("{}", "Linked Notebooks".green().bold());
        println!("{}", "=".repeat(60));
        println!();

        if self.notebooks.is_empty() {
            println!("  {}", "(No linked notebooks)".dimmed());
            return;
        }

        for notebook in &self.notebooks {
            println!("  {}", notebook.share_name.bold());
            println!("    {} {}", "GUID:".cyan(), notebook.guid);
            println!("    {} {}", "Shared by:".cyan(), notebook.username);
            println!("    {} {}", "Shard:".cyan(), notebook.shard_id);
            println!();
        }

        println!("  {} {}", "Total:".cyan(), self.notebooks.len());
    }
}

impl HumanReadable for SharedListResponse {
    fn print_human(&self) {
        println!("{}", "Share Grants".green().bold());
        println!("{}", "=".repeat(60));
        println!();

        if self.notebooks.is_empty() {
            println!("  {}", "(Nothing shared)".dimmed());
            return;
        }

        for shared in &self.notebooks {
            println!("  {} {}", shared.email.bold(), shared.privilege.as_str().dimmed());
            println!("    {} {}", "Notebook:".cyan(), shared.notebook_guid);
            println!(
                "    {} {}",
                "Granted:".cyan(),
                format_timestamp_opt(&shared.created)
            );
            println!();
        }

        println!("  {} {}", "Total:".cyan(), self.notebooks.len());
    }
}

impl HumanReadable for SavedNotebook {
    fn print_human(&self) {
        println!("{}", "Notebook saved!".green().bold());
        println!();
        println!("  {} {}", "GUID:".cyan(), self.0.guid);
        println!("  {} {}", "Name:".cyan(), self.0.name);
    }
}

/// Execute the notebooks command.
pub async fn execute(
    client: &Client,
    token: &str,
    human: bool,
    args: NotebooksArgs,
) -> Result<()> {
    match args.action {
        NotebooksAction::List => {
            let notebooks = client.list_notebooks(token).await?;
            output(&NotebookListResponse { notebooks }, human)
        }

        NotebooksAction::Linked => {
            let notebooks = client.list_linked_notebooks(token).await?;
            output(&LinkedListResponse { notebooks }, human)
        }

        NotebooksAction::Shared => {
            let notebooks = client.list_shared_notebooks(token).await?;
            output(&SharedListResponse { notebooks }, human)
        }

        NotebooksAction::Create { name } => {
            let notebook = client.create_notebook(token, &name).await?;
            output(&SavedNotebook(notebook), human)
        }

        NotebooksAction::Rename { guid, name } => {
            let notebook = client.update_notebook(token, guid, &name).await?;
            output(&SavedNotebook(notebook), human)
        }
    }
}
