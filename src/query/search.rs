use super::{LATEST_EMAIL_ID, timestamp};
use crate::error::Result;
use crate::model::{Contact, EmailId, LatestEmail, SearchHit};
use rusqlite::{Connection, Row};

/// Threads whose subject, or any email's body or sender name/address,
/// contains `needle` (case-insensitive). Latest activity first, with
/// no relevance weighting between the matched fields.
pub(crate) fn search_threads(conn: &Connection, needle: &str) -> Result<Vec<SearchHit>> {
    let sql = format!(
        "SELECT t.id, t.subject, t.last_activity_date,
                (SELECT f.name FROM thread_folders tf
                 JOIN folders f ON f.id = tf.folder_id
                 WHERE tf.thread_id = t.id
                 ORDER BY f.id
                 LIMIT 1),
                e.id, e.subject, e.body, e.sent_date,
                u.first_name, u.last_name, u.email
         FROM threads t
         LEFT JOIN emails e ON e.id = {LATEST_EMAIL_ID}
         LEFT JOIN users u ON u.id = e.sender_id
         WHERE icontains(t.subject, ?1)
            OR EXISTS (
                SELECT 1 FROM emails m
                LEFT JOIN users s ON s.id = m.sender_id
                WHERE m.thread_id = t.id
                  AND (icontains(m.body, ?1)
                       OR icontains(s.first_name, ?1)
                       OR icontains(s.last_name, ?1)
                       OR icontains(s.email, ?1))
            )
         ORDER BY t.last_activity_date DESC, t.id DESC"
    );

    let mut stmt = conn.prepare(&sql)?;
    let hits = stmt
        .query_map([needle], search_hit)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(hits)
}

fn search_hit(row: &Row<'_>) -> rusqlite::Result<SearchHit> {
    let latest_email = match row.get::<_, Option<EmailId>>(4)? {
        Some(id) => Some(LatestEmail {
            id,
            subject: row.get(5)?,
            body: row.get(6)?,
            sent_date: timestamp(row, 7)?,
            sender: contact(row, 8)?,
        }),
        None => None,
    };

    Ok(SearchHit {
        id: row.get(0)?,
        subject: row.get(1)?,
        last_activity_date: timestamp(row, 2)?,
        folder_name: row.get(3)?,
        latest_email,
    })
}

/// A left-joined user, present only when the join matched.
fn contact(row: &Row<'_>, first: usize) -> rusqlite::Result<Option<Contact>> {
    let first_name: Option<String> = row.get(first)?;
    let last_name: Option<String> = row.get(first + 1)?;
    let email: Option<String> = row.get(first + 2)?;

    Ok(match (first_name, last_name, email) {
        (Some(first_name), Some(last_name), Some(email)) => Some(Contact {
            first_name,
            last_name,
            email,
        }),
        _ => None,
    })
}
