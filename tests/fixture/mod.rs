#![allow(dead_code)]

//! Seeded mailbox databases for integration testing
//!
//! Provides a builder-style API for constructing mailbox state:
//!
//! ```ignore
//! let mailbox = MailboxBuilder::new()
//!     .user(1, "Ada", "Lovelace", "ada@example.com")
//!     .folder(1, "Inbox")
//!     .thread(10, "Engines", "2024-02-01T09:00:00Z")
//!         .filed_in(1)
//!     .email(EmailSeed::new(100, 10, "2024-02-01T09:00:00Z").from(1).body("Hi"))
//!     .build()
//!     .await;
//! ```
//!
//! `build` creates a fresh SQLite file in a temporary directory,
//! provisions the schema through the library, then inserts the rows
//! directly with `rusqlite`. The directory lives as long as the
//! returned [`TestMailbox`].

use chrono::{DateTime, Utc};
use mailbox_query::{MailboxClient, StoreConfig};
use rusqlite::{Connection, params};
use std::path::PathBuf;
use tempfile::TempDir;

/// Parse an RFC 3339 timestamp used in test data.
pub fn at(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .expect("test timestamps are RFC 3339")
        .with_timezone(&Utc)
}

fn millis(s: Option<&str>) -> Option<i64> {
    s.map(|s| at(s).timestamp_millis())
}

#[derive(Debug, Clone)]
struct UserSeed {
    id: i64,
    first_name: String,
    last_name: String,
    email: String,
    job_title: Option<String>,
    company: Option<String>,
    location: Option<String>,
    avatar_url: Option<String>,
    github: Option<String>,
}

#[derive(Debug, Clone)]
struct ThreadSeed {
    id: i64,
    subject: Option<String>,
    last_activity: Option<String>,
    folders: Vec<i64>,
}

/// One email row. Start with [`EmailSeed::new`] and chain the
/// optional columns.
#[derive(Debug, Clone)]
pub struct EmailSeed {
    id: i64,
    thread_id: i64,
    sent: Option<String>,
    sender_id: Option<i64>,
    recipient_id: Option<i64>,
    subject: Option<String>,
    body: Option<String>,
}

impl EmailSeed {
    pub fn new(id: i64, thread_id: i64, sent: &str) -> Self {
        Self {
            id,
            thread_id,
            sent: Some(sent.to_string()),
            sender_id: None,
            recipient_id: None,
            subject: None,
            body: None,
        }
    }

    /// An email with no sent date.
    pub fn undated(id: i64, thread_id: i64) -> Self {
        Self {
            sent: None,
            ..Self::new(id, thread_id, "1970-01-01T00:00:00Z")
        }
    }

    pub fn from(mut self, user_id: i64) -> Self {
        self.sender_id = Some(user_id);
        self
    }

    pub fn to(mut self, user_id: i64) -> Self {
        self.recipient_id = Some(user_id);
        self
    }

    pub fn subject(mut self, subject: &str) -> Self {
        self.subject = Some(subject.to_string());
        self
    }

    pub fn body(mut self, body: &str) -> Self {
        self.body = Some(body.to_string());
        self
    }
}

/// Builder for a seeded mailbox.
///
/// `.filed_in()` applies to the most recently added thread;
/// `.profile()` and `.avatar()` to the most recently added user.
#[derive(Default)]
pub struct MailboxBuilder {
    users: Vec<UserSeed>,
    folders: Vec<(i64, String)>,
    threads: Vec<ThreadSeed>,
    emails: Vec<EmailSeed>,
}

impl MailboxBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user(mut self, id: i64, first_name: &str, last_name: &str, email: &str) -> Self {
        self.users.push(UserSeed {
            id,
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email: email.to_string(),
            job_title: None,
            company: None,
            location: None,
            avatar_url: None,
            github: None,
        });
        self
    }

    /// Fill in profile fields of the most recently added user.
    ///
    /// # Panics
    ///
    /// Panics if called before any `.user()` call.
    pub fn profile(mut self, job_title: &str, company: &str, location: &str, github: &str) -> Self {
        let user = self.users.last_mut().expect("call .user() before .profile()");
        user.job_title = Some(job_title.to_string());
        user.company = Some(company.to_string());
        user.location = Some(location.to_string());
        user.github = Some(github.to_string());
        self
    }

    /// Set the avatar URL of the most recently added user.
    ///
    /// # Panics
    ///
    /// Panics if called before any `.user()` call.
    pub fn avatar(mut self, url: &str) -> Self {
        let user = self.users.last_mut().expect("call .user() before .avatar()");
        user.avatar_url = Some(url.to_string());
        self
    }

    pub fn folder(mut self, id: i64, name: &str) -> Self {
        self.folders.push((id, name.to_string()));
        self
    }

    pub fn thread(mut self, id: i64, subject: &str, last_activity: &str) -> Self {
        self.threads.push(ThreadSeed {
            id,
            subject: Some(subject.to_string()),
            last_activity: Some(last_activity.to_string()),
            folders: Vec::new(),
        });
        self
    }

    /// A thread with no last-activity date.
    pub fn undated_thread(mut self, id: i64, subject: &str) -> Self {
        self.threads.push(ThreadSeed {
            id,
            subject: Some(subject.to_string()),
            last_activity: None,
            folders: Vec::new(),
        });
        self
    }

    /// File the most recently added thread in a folder.
    ///
    /// # Panics
    ///
    /// Panics if called before any `.thread()` call.
    pub fn filed_in(mut self, folder_id: i64) -> Self {
        self.threads
            .last_mut()
            .expect("call .thread() before .filed_in()")
            .folders
            .push(folder_id);
        self
    }

    pub fn email(mut self, email: EmailSeed) -> Self {
        self.emails.push(email);
        self
    }

    /// Create the database and return a client pointed at it.
    pub async fn build(self) -> TestMailbox {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("mailbox.db");

        let client = MailboxClient::open(&StoreConfig::new(&path)).expect("open store");
        client
            .store()
            .initialize_schema()
            .await
            .expect("initialize schema");

        let conn = Connection::open(&path).expect("open seed connection");
        self.seed(&conn).expect("seed mailbox");

        TestMailbox {
            _dir: dir,
            path,
            client,
        }
    }

    fn seed(&self, conn: &Connection) -> rusqlite::Result<()> {
        for u in &self.users {
            conn.execute(
                "INSERT INTO users (id, first_name, last_name, email, job_title, company, location, avatar_url, github)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                params![
                    u.id,
                    u.first_name,
                    u.last_name,
                    u.email,
                    u.job_title,
                    u.company,
                    u.location,
                    u.avatar_url,
                    u.github
                ],
            )?;
        }

        for (id, name) in &self.folders {
            conn.execute(
                "INSERT INTO folders (id, name) VALUES (?1, ?2)",
                params![id, name],
            )?;
        }

        for t in &self.threads {
            conn.execute(
                "INSERT INTO threads (id, subject, last_activity_date) VALUES (?1, ?2, ?3)",
                params![t.id, t.subject, millis(t.last_activity.as_deref())],
            )?;
            for folder_id in &t.folders {
                conn.execute(
                    "INSERT INTO thread_folders (thread_id, folder_id) VALUES (?1, ?2)",
                    params![t.id, folder_id],
                )?;
            }
        }

        for e in &self.emails {
            conn.execute(
                "INSERT INTO emails (id, thread_id, sender_id, recipient_id, subject, body, sent_date)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    e.id,
                    e.thread_id,
                    e.sender_id,
                    e.recipient_id,
                    e.subject,
                    e.body,
                    millis(e.sent.as_deref())
                ],
            )?;
        }

        Ok(())
    }
}

/// A seeded database and a client for it.
pub struct TestMailbox {
    _dir: TempDir,
    pub path: PathBuf,
    pub client: MailboxClient,
}
