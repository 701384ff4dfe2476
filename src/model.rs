//! Identifiers and result shapes
//!
//! Each query returns its own shape. Folder listings nest full email
//! lists under each thread, search flattens each thread to a preview,
//! and thread detail carries the conversation in reading order. The
//! shapes share field names but are deliberately separate types.

use crate::error::Error;
use chrono::{DateTime, Utc};
use rusqlite::types::{FromSql, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl FromStr for $name {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim()
                    .parse()
                    .map(Self)
                    .map_err(|e| Error::InvalidInput(format!("Invalid {} id '{s}': {e}", $kind)))
            }
        }

        impl ToSql for $name {
            fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
                self.0.to_sql()
            }
        }

        impl FromSql for $name {
            fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
                i64::column_result(value).map(Self)
            }
        }
    };
}

id_type!(
    /// Primary key of a user.
    UserId,
    "user"
);
id_type!(
    /// Primary key of a thread.
    ThreadId,
    "thread"
);
id_type!(
    /// Primary key of an email.
    EmailId,
    "email"
);

/// A folder name with the number of distinct threads filed in it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FolderCount {
    pub name: String,
    pub thread_count: usize,
}

/// All folders, with the special ones split out and ordered first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FolderSummary {
    pub special_folders: Vec<FolderCount>,
    pub other_folders: Vec<FolderCount>,
}

impl FolderSummary {
    /// Number of folders across both lists.
    #[must_use]
    pub fn len(&self) -> usize {
        self.special_folders.len() + self.other_folders.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Special folders first, then the rest.
    pub fn iter(&self) -> impl Iterator<Item = &FolderCount> {
        self.special_folders.iter().chain(&self.other_folders)
    }
}

/// Sender projection attached to emails in a folder listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SenderRef {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// A thread in a folder listing, carrying every one of its emails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FolderThread {
    pub id: ThreadId,
    pub subject: Option<String>,
    pub last_activity_date: Option<DateTime<Utc>>,
    /// Newest first. May be empty if the thread has no emails, so
    /// readers of "the latest email" must handle `None` from
    /// [`FolderThread::latest_email`].
    pub emails: Vec<FolderEmail>,
}

impl FolderThread {
    /// The most recent email, if the thread has any.
    #[must_use]
    pub fn latest_email(&self) -> Option<&FolderEmail> {
        self.emails.first()
    }
}

/// An email inside a [`FolderThread`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FolderEmail {
    pub id: EmailId,
    pub thread_id: Option<ThreadId>,
    pub subject: Option<String>,
    pub body: Option<String>,
    pub sent_date: Option<DateTime<Utc>>,
    pub sender_id: Option<UserId>,
    pub recipient_id: Option<UserId>,
    /// `None` when the email has no sender or the sender row is gone.
    pub sender: Option<SenderRef>,
}

/// Name and address of a user, as shown in previews and the address
/// book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Contact {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl fmt::Display for Contact {
    /// `First Last <email>`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} <{}>", self.first_name, self.last_name, self.email)
    }
}

/// One search result: a thread flattened to what a result row shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    pub id: ThreadId,
    pub subject: Option<String>,
    pub last_activity_date: Option<DateTime<Utc>>,
    /// First folder the thread is filed in, if any.
    pub folder_name: Option<String>,
    pub latest_email: Option<LatestEmail>,
}

/// The most recent email of a [`SearchHit`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LatestEmail {
    pub id: EmailId,
    pub subject: Option<String>,
    pub body: Option<String>,
    pub sent_date: Option<DateTime<Utc>>,
    pub sender: Option<Contact>,
}

/// A thread looked up inside a specific folder, with the sender of
/// its most recent email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThreadSummary {
    pub id: ThreadId,
    pub subject: Option<String>,
    pub last_activity_date: Option<DateTime<Utc>>,
    pub sender_first_name: Option<String>,
    pub sender_last_name: Option<String>,
    pub sender_email: Option<String>,
}

/// A full conversation, oldest email first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThreadDetail {
    pub id: ThreadId,
    pub subject: Option<String>,
    pub emails: Vec<ConversationEmail>,
}

/// An email inside a [`ThreadDetail`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversationEmail {
    pub id: EmailId,
    pub body: Option<String>,
    pub sent_date: Option<DateTime<Utc>>,
    pub sender: Option<SenderName>,
    pub recipient_id: Option<UserId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SenderName {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
}

/// A user's profile together with their most recent authored threads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserProfile {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub job_title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub avatar_url: Option<String>,
    pub linkedin: Option<String>,
    pub twitter: Option<String>,
    pub github: Option<String>,
    /// Most recent first.
    pub latest_threads: Vec<AuthoredThread>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthoredThread {
    pub subject: Option<String>,
}
