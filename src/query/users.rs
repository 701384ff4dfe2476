use crate::error::Result;
use crate::model::{AuthoredThread, Contact, UserId, UserProfile};
use rusqlite::{Connection, OptionalExtension, params};

/// How many authored threads a profile lists.
pub(crate) const LATEST_THREADS_LIMIT: u32 = 3;

/// Name and address of every user, in store order.
pub(crate) fn all_email_addresses(conn: &Connection) -> Result<Vec<Contact>> {
    let mut stmt = conn.prepare("SELECT first_name, last_name, email FROM users ORDER BY id")?;

    let contacts = stmt
        .query_map([], |row| {
            Ok(Contact {
                first_name: row.get(0)?,
                last_name: row.get(1)?,
                email: row.get(2)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(contacts)
}

pub(crate) fn user_profile(conn: &Connection, user_id: UserId) -> Result<Option<UserProfile>> {
    let profile = conn
        .query_row(
            "SELECT id, first_name, last_name, email, job_title, company, location,
                    avatar_url, linkedin, twitter, github
             FROM users WHERE id = ?1",
            [user_id],
            |row| {
                Ok(UserProfile {
                    id: row.get(0)?,
                    first_name: row.get(1)?,
                    last_name: row.get(2)?,
                    email: row.get(3)?,
                    job_title: row.get(4)?,
                    company: row.get(5)?,
                    location: row.get(6)?,
                    avatar_url: row.get(7)?,
                    linkedin: row.get(8)?,
                    twitter: row.get(9)?,
                    github: row.get(10)?,
                    latest_threads: Vec::new(),
                })
            },
        )
        .optional()?;

    let Some(mut profile) = profile else {
        return Ok(None);
    };

    // A thread is "authored" if the user sent at least one of its emails.
    let mut stmt = conn.prepare(
        "SELECT t.subject
         FROM threads t
         WHERE EXISTS (SELECT 1 FROM emails e WHERE e.thread_id = t.id AND e.sender_id = ?1)
         ORDER BY t.last_activity_date DESC, t.id DESC
         LIMIT ?2",
    )?;

    profile.latest_threads = stmt
        .query_map(params![user_id, LATEST_THREADS_LIMIT], |row| {
            Ok(AuthoredThread {
                subject: row.get(0)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(Some(profile))
}
