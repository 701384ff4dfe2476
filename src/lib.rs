//! Mailbox query library
//!
//! The read side of a threaded email client. Folders hold threads
//! (many-to-many), threads hold ordered emails, and users send them.
//! [`MailboxClient`] reshapes those tables, stored in SQLite, into the
//! aggregates a mail UI renders: folder counts, folder listings,
//! search previews, single-thread lookups, full conversations, the
//! address book and user profiles.
//!
//! All operations are stateless reads. Absence is reported as `None`
//! or an empty `Vec`; [`Error`] is reserved for real failures.

mod client;
mod config;
mod error;
mod folder;
mod model;
mod query;
mod schema;
mod store;

pub use client::MailboxClient;
pub use config::StoreConfig;
pub use error::{Error, Result};
pub use folder::{FolderName, SpecialFolder};
pub use model::{
    AuthoredThread, ConversationEmail, Contact, EmailId, FolderCount, FolderEmail, FolderSummary,
    FolderThread, LatestEmail, SearchHit, SenderName, SenderRef, ThreadDetail, ThreadId,
    ThreadSummary, UserId, UserProfile,
};
pub use store::Store;
