use super::{LATEST_EMAIL_ID, timestamp};
use crate::error::Result;
use crate::folder::FolderName;
use crate::model::{
    ConversationEmail, FolderEmail, FolderThread, SenderName, SenderRef, ThreadDetail, ThreadId,
    ThreadSummary, UserId,
};
use rusqlite::{Connection, OptionalExtension, Row, params};
use std::collections::HashMap;

/// Threads filed in `folder`, latest activity first, each with all of
/// its emails newest first.
///
/// Runs two statements (threads, then every email of those threads)
/// and stitches them together, rather than one query per thread.
pub(crate) fn threads_for_folder(
    conn: &Connection,
    folder: &FolderName,
) -> Result<Vec<FolderThread>> {
    let mut stmt = conn.prepare(
        "SELECT t.id, t.subject, t.last_activity_date
         FROM threads t
         JOIN thread_folders tf ON tf.thread_id = t.id
         JOIN folders f ON f.id = tf.folder_id
         WHERE f.name = ?1
         ORDER BY t.last_activity_date DESC, t.id DESC",
    )?;

    let mut threads = stmt
        .query_map([folder.as_str()], |row| {
            Ok(FolderThread {
                id: row.get(0)?,
                subject: row.get(1)?,
                last_activity_date: timestamp(row, 2)?,
                emails: Vec::new(),
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    if threads.is_empty() {
        return Ok(threads);
    }

    let mut stmt = conn.prepare(
        "SELECT e.id, e.thread_id, e.subject, e.body, e.sent_date, e.sender_id, e.recipient_id,
                u.id, u.first_name, u.last_name, u.email
         FROM emails e
         JOIN thread_folders tf ON tf.thread_id = e.thread_id
         JOIN folders f ON f.id = tf.folder_id
         LEFT JOIN users u ON u.id = e.sender_id
         WHERE f.name = ?1
         ORDER BY e.sent_date DESC, e.id DESC",
    )?;

    let mut by_thread: HashMap<ThreadId, Vec<FolderEmail>> = HashMap::new();
    let rows = stmt.query_map([folder.as_str()], folder_email)?;
    for email in rows {
        let email = email?;
        if let Some(thread_id) = email.thread_id {
            by_thread.entry(thread_id).or_default().push(email);
        }
    }

    for thread in &mut threads {
        thread.emails = by_thread.remove(&thread.id).unwrap_or_default();
    }

    Ok(threads)
}

fn folder_email(row: &Row<'_>) -> rusqlite::Result<FolderEmail> {
    let sender = match row.get::<_, Option<UserId>>(7)? {
        Some(id) => Some(SenderRef {
            id,
            first_name: row.get(8)?,
            last_name: row.get(9)?,
            email: row.get(10)?,
        }),
        None => None,
    };

    Ok(FolderEmail {
        id: row.get(0)?,
        thread_id: row.get(1)?,
        subject: row.get(2)?,
        body: row.get(3)?,
        sent_date: timestamp(row, 4)?,
        sender_id: row.get(5)?,
        recipient_id: row.get(6)?,
        sender,
    })
}

/// A thread by id, but only if it is filed in `folder`.
pub(crate) fn thread_in_folder(
    conn: &Connection,
    folder: &FolderName,
    thread_id: ThreadId,
) -> Result<Option<ThreadSummary>> {
    let sql = format!(
        "SELECT t.id, t.subject, t.last_activity_date, u.first_name, u.last_name, u.email
         FROM threads t
         LEFT JOIN emails e ON e.id = {LATEST_EMAIL_ID}
         LEFT JOIN users u ON u.id = e.sender_id
         WHERE t.id = ?1
           AND EXISTS (
               SELECT 1 FROM thread_folders tf
               JOIN folders f ON f.id = tf.folder_id
               WHERE tf.thread_id = t.id AND f.name = ?2
           )"
    );

    let summary = conn
        .query_row(&sql, params![thread_id, folder.as_str()], |row| {
            Ok(ThreadSummary {
                id: row.get(0)?,
                subject: row.get(1)?,
                last_activity_date: timestamp(row, 2)?,
                sender_first_name: row.get(3)?,
                sender_last_name: row.get(4)?,
                sender_email: row.get(5)?,
            })
        })
        .optional()?;

    Ok(summary)
}

/// A thread and its whole conversation, oldest email first.
pub(crate) fn emails_for_thread(
    conn: &Connection,
    thread_id: ThreadId,
) -> Result<Option<ThreadDetail>> {
    let Some((id, subject)) = conn
        .query_row(
            "SELECT id, subject FROM threads WHERE id = ?1",
            [thread_id],
            |row| Ok((row.get::<_, ThreadId>(0)?, row.get::<_, Option<String>>(1)?)),
        )
        .optional()?
    else {
        return Ok(None);
    };

    let mut stmt = conn.prepare(
        "SELECT e.id, e.body, e.sent_date, e.recipient_id, u.id, u.first_name, u.last_name
         FROM emails e
         LEFT JOIN users u ON u.id = e.sender_id
         WHERE e.thread_id = ?1
         ORDER BY e.sent_date ASC, e.id ASC",
    )?;

    let emails = stmt
        .query_map([thread_id], |row| {
            let sender = match row.get::<_, Option<UserId>>(4)? {
                Some(id) => Some(SenderName {
                    id,
                    first_name: row.get(5)?,
                    last_name: row.get(6)?,
                }),
                None => None,
            };
            Ok(ConversationEmail {
                id: row.get(0)?,
                body: row.get(1)?,
                sent_date: timestamp(row, 2)?,
                sender,
                recipient_id: row.get(3)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(Some(ThreadDetail {
        id,
        subject,
        emails,
    }))
}
