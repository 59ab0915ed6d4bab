//! Domain types for the Evernote API client.
//!
//! GUIDs are wrapped in dedicated newtypes so a note id can never be handed
//! to an operation expecting a notebook id. Entity models carry only the
//! fields the client operations exchange; everything serializes to snake_case
//! JSON with optional fields omitted when absent.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

// ============================================================================
// GUID Types
// ============================================================================

/// Unique identifier for a note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteGuid(pub Uuid);

impl NoteGuid {
    /// Creates a new random NoteGuid using UUID v4.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a NoteGuid from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for NoteGuid {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NoteGuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for NoteGuid {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Unique identifier for a notebook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NotebookGuid(pub Uuid);

impl NotebookGuid {
    /// Creates a new random NotebookGuid using UUID v4.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a NotebookGuid from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for NotebookGuid {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NotebookGuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for NotebookGuid {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

// ============================================================================
// Shared-notebook privilege
// ============================================================================

/// A privilege key that is not one of the six defined levels.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown privilege level: {0}")]
pub struct UnknownPrivilege(pub String);

/// Access level granted when sharing a notebook.
///
/// Unrecognized keys are rejected by [`FromStr`]; an omitted level defaults
/// to [`SharedNotebookPrivilege::FullAccess`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SharedNotebookPrivilege {
    ReadNotebook,
    ModifyNotebookPlusActivity,
    ReadNotebookPlusActivity,
    Group,
    #[default]
    FullAccess,
    BusinessFullAccess,
}

impl SharedNotebookPrivilege {
    /// The wire key for this level.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ReadNotebook => "READ_NOTEBOOK",
            Self::ModifyNotebookPlusActivity => "MODIFY_NOTEBOOK_PLUS_ACTIVITY",
            Self::ReadNotebookPlusActivity => "READ_NOTEBOOK_PLUS_ACTIVITY",
            Self::Group => "GROUP",
            Self::FullAccess => "FULL_ACCESS",
            Self::BusinessFullAccess => "BUSINESS_FULL_ACCESS",
        }
    }
}

impl fmt::Display for SharedNotebookPrivilege {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SharedNotebookPrivilege {
    type Err = UnknownPrivilege;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "READ_NOTEBOOK" => Ok(Self::ReadNotebook),
            "MODIFY_NOTEBOOK_PLUS_ACTIVITY" => Ok(Self::ModifyNotebookPlusActivity),
            "READ_NOTEBOOK_PLUS_ACTIVITY" => Ok(Self::ReadNotebookPlusActivity),
            "GROUP" => Ok(Self::Group),
            "FULL_ACCESS" => Ok(Self::FullAccess),
            "BUSINESS_FULL_ACCESS" => Ok(Self::BusinessFullAccess),
            other => Err(UnknownPrivilege(other.to_string())),
        }
    }
}

// ============================================================================
// Service entities
// ============================================================================

/// Account profile of the authenticated user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Shard the account's data lives on.
    pub shard_id: String,
}

/// A notebook owned by the account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notebook {
    pub guid: NotebookGuid,
    pub name: String,
    #[serde(default)]
    pub default_notebook: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<DateTime<Utc>>,
}

/// A notebook another account has shared with this one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkedNotebook {
    pub guid: NotebookGuid,
    pub share_name: String,
    /// Username of the sharing account.
    pub username: String,
    /// Shard the sharing account's data lives on.
    pub shard_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub share_key: Option<String>,
}

/// A share grant on one of the account's own notebooks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SharedNotebook {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub notebook_guid: NotebookGuid,
    /// Invitee email address.
    pub email: String,
    #[serde(default)]
    pub privilege: SharedNotebookPrivilege,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub share_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shard_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
}

/// Result of authenticating to a shared notebook.
///
/// The `auth_token` is the share token subsequent shared-notebook calls
/// authenticate with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SharedNotebookAuth {
    pub auth_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note_store_url: Option<String>,
}

/// A note as returned from create/update operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Note {
    pub guid: NoteGuid,
    pub title: String,
    pub notebook_guid: NotebookGuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<DateTime<Utc>>,
}

/// Metadata for one note in a search result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoteMetadata {
    pub guid: NoteGuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notebook_guid: Option<NotebookGuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub largest_resource_mime: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub largest_resource_size: Option<u64>,
}

/// One window of a note metadata search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotePage {
    /// Total notes matching the filter, beyond this window.
    pub total_notes: u32,
    /// Offset this window starts at.
    pub start_index: u32,
    pub notes: Vec<NoteMetadata>,
}
