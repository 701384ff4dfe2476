use crate::error::Result;
use crate::model::FolderCount;
use rusqlite::Connection;

/// Every folder with its distinct thread count, in store order
/// (ascending folder id). Folders with no threads count zero.
pub(crate) fn folders_with_thread_count(conn: &Connection) -> Result<Vec<FolderCount>> {
    let mut stmt = conn.prepare(
        "SELECT f.name, COUNT(DISTINCT tf.thread_id)
         FROM folders f
         LEFT JOIN thread_folders tf ON tf.folder_id = f.id
         GROUP BY f.id, f.name
         ORDER BY f.id",
    )?;

    let folders = stmt
        .query_map([], |row| {
            Ok(FolderCount {
                name: row.get(0)?,
                thread_count: row.get(1)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(folders)
}
