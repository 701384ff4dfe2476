//! Mailbox aggregation client

use crate::config::StoreConfig;
use crate::error::Result;
use crate::folder::{FolderName, partition_folders};
use crate::model::{
    Contact, FolderSummary, FolderThread, SearchHit, ThreadDetail, ThreadId, ThreadSummary,
    UserId, UserProfile,
};
use crate::query::{folders, search, threads, users};
use crate::store::Store;
use tracing::{debug, info};

/// Read-only view of a mailbox store, shaped for a mail UI
///
/// Every method is an independent read: no state is kept between
/// calls, so any number may run concurrently. Lookups that find
/// nothing return `None`, listings that find nothing return an empty
/// `Vec`, and only real failures are errors.
#[derive(Clone)]
pub struct MailboxClient {
    store: Store,
}

impl MailboxClient {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }

    /// Open the store described by `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection pool cannot be built.
    pub fn open(config: &StoreConfig) -> Result<Self> {
        Ok(Self::new(Store::open(config)?))
    }

    #[must_use]
    pub const fn store(&self) -> &Store {
        &self.store
    }

    /// Thread counts for every folder, with Inbox, Flagged and Sent
    /// (those that exist) split out first.
    ///
    /// # Errors
    ///
    /// Returns an error if the store query fails.
    pub async fn folders_with_thread_count(&self) -> Result<FolderSummary> {
        let counts = self
            .store
            .read("folders_with_thread_count", folders::folders_with_thread_count)
            .await?;

        let summary = partition_folders(counts);
        debug!(
            "Folder summary: {} special, {} other",
            summary.special_folders.len(),
            summary.other_folders.len()
        );
        Ok(summary)
    }

    /// Every thread in a folder, latest activity first, with all of
    /// its emails (newest first) and their senders.
    ///
    /// `folder_name` may be percent-encoded and in any case. An unknown
    /// or empty folder gives an empty list.
    ///
    /// # Errors
    ///
    /// Returns an error if the folder name does not decode to UTF-8 or
    /// the store query fails.
    pub async fn threads_for_folder(&self, folder_name: &str) -> Result<Vec<FolderThread>> {
        let folder = FolderName::canonicalize(folder_name)?;
        debug!("Listing threads in '{}'", folder);

        let label = folder.to_string();
        let threads = self
            .store
            .read("threads_for_folder", move |conn| {
                threads::threads_for_folder(conn, &folder)
            })
            .await?;

        info!("Found {} threads in '{}'", threads.len(), label);
        Ok(threads)
    }

    /// Threads whose subject, email bodies, or sender names/addresses
    /// contain `query`, ignoring case. Latest activity first.
    ///
    /// A missing or empty query returns no results without touching
    /// the store.
    ///
    /// # Errors
    ///
    /// Returns an error if the store query fails.
    pub async fn search_threads(&self, query: Option<&str>) -> Result<Vec<SearchHit>> {
        let Some(query) = query.filter(|q| !q.is_empty()) else {
            return Ok(Vec::new());
        };

        let needle = query.to_string();
        let hits = self
            .store
            .read("search_threads", move |conn| {
                search::search_threads(conn, &needle)
            })
            .await?;

        info!("Found {} threads matching '{}'", hits.len(), query);
        Ok(hits)
    }

    /// A single thread, only if it is filed in `folder_name`.
    ///
    /// Sender fields come from the thread's most recent email and are
    /// `None` if the thread has no emails.
    ///
    /// # Errors
    ///
    /// Returns an error if `thread_id` is not an integer, the folder
    /// name does not decode to UTF-8, or the store query fails.
    pub async fn thread_in_folder(
        &self,
        folder_name: &str,
        thread_id: &str,
    ) -> Result<Option<ThreadSummary>> {
        let thread_id: ThreadId = thread_id.parse()?;
        let folder = FolderName::canonicalize(folder_name)?;
        debug!("Looking up thread {} in '{}'", thread_id, folder);

        self.store
            .read("thread_in_folder", move |conn| {
                threads::thread_in_folder(conn, &folder, thread_id)
            })
            .await
    }

    /// A thread with its full conversation, oldest email first.
    ///
    /// # Errors
    ///
    /// Returns an error if `thread_id` is not an integer or the store
    /// query fails.
    pub async fn emails_for_thread(&self, thread_id: &str) -> Result<Option<ThreadDetail>> {
        let thread_id: ThreadId = thread_id.parse()?;

        let detail = self
            .store
            .read("emails_for_thread", move |conn| {
                threads::emails_for_thread(conn, thread_id)
            })
            .await?;

        if let Some(detail) = &detail {
            debug!("Thread {} has {} emails", thread_id, detail.emails.len());
        }
        Ok(detail)
    }

    /// Name and address of every user, for the address book.
    ///
    /// # Errors
    ///
    /// Returns an error if the store query fails.
    pub async fn all_email_addresses(&self) -> Result<Vec<Contact>> {
        self.store
            .read("all_email_addresses", users::all_email_addresses)
            .await
    }

    /// A user's profile and the subjects of the three threads they
    /// most recently took part in as a sender.
    ///
    /// # Errors
    ///
    /// Returns an error if `user_id` is not an integer or the store
    /// query fails.
    pub async fn user_profile(&self, user_id: &str) -> Result<Option<UserProfile>> {
        let user_id: UserId = user_id.parse()?;

        self.store
            .read("user_profile", move |conn| users::user_profile(conn, user_id))
            .await
    }
}
