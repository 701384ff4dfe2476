//! Relational schema of the mailbox store
//!
//! Timestamps are Unix epoch milliseconds. `thread_folders` is a set:
//! its composite key makes a thread's membership in a folder either
//! present or absent, never duplicated.

use rusqlite::Connection;

pub fn initialize_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS users (
            id              INTEGER PRIMARY KEY,
            first_name      TEXT NOT NULL,
            last_name       TEXT NOT NULL,
            email           TEXT NOT NULL UNIQUE,
            job_title       TEXT,
            company         TEXT,
            location        TEXT,
            avatar_url      TEXT,
            linkedin        TEXT,
            twitter         TEXT,
            github          TEXT
        );

        CREATE TABLE IF NOT EXISTS threads (
            id                  INTEGER PRIMARY KEY,
            subject             TEXT,
            last_activity_date  INTEGER     -- max(emails.sent_date), maintained by writers
        );

        CREATE TABLE IF NOT EXISTS emails (
            id              INTEGER PRIMARY KEY,
            thread_id       INTEGER REFERENCES threads(id) ON DELETE CASCADE,
            sender_id       INTEGER REFERENCES users(id) ON DELETE SET NULL,
            recipient_id    INTEGER REFERENCES users(id) ON DELETE SET NULL,
            subject         TEXT,
            body            TEXT,
            sent_date       INTEGER
        );

        CREATE TABLE IF NOT EXISTS folders (
            id      INTEGER PRIMARY KEY,
            name    TEXT NOT NULL UNIQUE
        );

        CREATE TABLE IF NOT EXISTS thread_folders (
            thread_id   INTEGER NOT NULL REFERENCES threads(id) ON DELETE CASCADE,
            folder_id   INTEGER NOT NULL REFERENCES folders(id) ON DELETE CASCADE,
            PRIMARY KEY (thread_id, folder_id)
        );

        CREATE INDEX IF NOT EXISTS idx_emails_thread        ON emails(thread_id, sent_date DESC);
        CREATE INDEX IF NOT EXISTS idx_emails_sender        ON emails(sender_id);
        CREATE INDEX IF NOT EXISTS idx_threads_activity     ON threads(last_activity_date DESC);
        CREATE INDEX IF NOT EXISTS idx_thread_folders_folder ON thread_folders(folder_id, thread_id);
        ",
    )
}
