//! Folder naming rules
//!
//! Folder names double as routing identifiers, so callers may hand
//! us `inbox`, `INBOX` or a percent-encoded `my%20projects`. Stored
//! names are always in title case; [`FolderName::canonicalize`]
//! turns caller input into that form before it reaches a query.
//!
//! A small fixed set of folders is "special" and always listed first,
//! in the order given by [`SpecialFolder::ORDER`].

use crate::error::{Error, Result};
use crate::model::{FolderCount, FolderSummary};
use percent_encoding::percent_decode_str;
use std::fmt;

/// A folder that is pinned to the top of the folder list.
///
/// # Examples
///
/// ```
/// use mailbox_query::SpecialFolder;
///
/// assert_eq!(SpecialFolder::Inbox.as_str(), "Inbox");
/// assert_eq!(SpecialFolder::from_name("Sent"), Some(SpecialFolder::Sent));
/// assert_eq!(SpecialFolder::from_name("Work"), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecialFolder {
    Inbox,
    Flagged,
    Sent,
}

impl SpecialFolder {
    /// Display order of the special folders.
    pub const ORDER: [Self; 3] = [Self::Inbox, Self::Flagged, Self::Sent];

    /// The stored folder name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Inbox => "Inbox",
            Self::Flagged => "Flagged",
            Self::Sent => "Sent",
        }
    }

    /// Match a stored (already canonical) folder name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ORDER.into_iter().find(|f| f.as_str() == name)
    }
}

impl fmt::Display for SpecialFolder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A folder name in the canonical form used by the store.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FolderName(String);

impl FolderName {
    /// Percent-decode `raw`, then title-case every whitespace
    /// separated word.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if a `%` is not followed by two
    /// hex digits, or if the decoded bytes are not valid UTF-8.
    ///
    /// # Examples
    ///
    /// ```
    /// use mailbox_query::FolderName;
    ///
    /// let name = FolderName::canonicalize("my%20PROJECTS").unwrap();
    /// assert_eq!(name.as_str(), "My Projects");
    /// ```
    pub fn canonicalize(raw: &str) -> Result<Self> {
        check_escapes(raw)?;
        let decoded = percent_decode_str(raw)
            .decode_utf8()
            .map_err(|e| Error::InvalidInput(format!("Folder name '{raw}' is not UTF-8: {e}")))?;
        Ok(Self(title_case(&decoded)))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FolderName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// `percent_decode_str` keeps a broken escape such as `%zz` as literal
/// text; reject it instead.
fn check_escapes(raw: &str) -> Result<()> {
    let bytes = raw.as_bytes();
    for (i, _) in raw.match_indices('%') {
        let valid = bytes
            .get(i + 1..i + 3)
            .is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit));
        if !valid {
            return Err(Error::InvalidInput(format!(
                "Folder name '{raw}' has a malformed escape at byte {i}"
            )));
        }
    }
    Ok(())
}

fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut word_start = true;
    for c in s.chars() {
        if c.is_whitespace() {
            word_start = true;
            out.push(c);
        } else if word_start {
            word_start = false;
            out.extend(c.to_uppercase());
        } else {
            out.extend(c.to_lowercase());
        }
    }
    out
}

/// Split per-folder counts into the pinned special folders (in
/// [`SpecialFolder::ORDER`], skipping missing ones) and everything
/// else (in the order given).
#[must_use]
pub fn partition_folders(folders: Vec<FolderCount>) -> FolderSummary {
    let special_folders = SpecialFolder::ORDER
        .iter()
        .filter_map(|special| {
            folders
                .iter()
                .find(|f| f.name == special.as_str())
                .cloned()
        })
        .collect();

    let other_folders = folders
        .into_iter()
        .filter(|f| SpecialFolder::from_name(&f.name).is_none())
        .collect();

    FolderSummary {
        special_folders,
        other_folders,
    }
}
