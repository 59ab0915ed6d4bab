//! Core types and note-content assembly for the Evernote API client.
//!
//! This crate holds everything that does not touch the network:
//!
//! - [`types`]: typed GUIDs, the shared-notebook privilege enumeration, and
//!   the serde models for service entities (users, notebooks, notes).
//! - [`content`]: the note-content builder, which turns a [`NoteDraft`] into
//!   an ENML document plus at most one binary resource referenced by its MD5
//!   content hash.
//!
//! All of it is pure and synchronous; the client crate layers the remote
//! operations on top.

pub mod content;
pub mod types;

pub use content::{ContentError, NoteContent, NoteDraft, Resource, build_note_content};
pub use types::{
    LinkedNotebook, Note, NoteGuid, NoteMetadata, NotePage, Notebook, NotebookGuid,
    SharedNotebook, SharedNotebookAuth, SharedNotebookPrivilege, UnknownPrivilege, User,
};
