//! Items that can be placed in a transfer.

use std::fmt::Debug;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

/// Trait for items shown in a transfer's panes.
///
/// Only the key and the disabled flag matter to the engine. The label is
/// what the search filter matches against.
///
/// # Example
///
/// ```
/// use transfer::TransferItem;
///
/// struct Permission {
///     id: u32,
///     name: String,
///     locked: bool,
/// }
///
/// impl TransferItem for Permission {
///     type Key = u32;
///
///     fn key(&self) -> u32 {
///         self.id
///     }
///
///     fn disabled(&self) -> bool {
///         self.locked
///     }
///
///     fn label(&self) -> String {
///         self.name.clone()
///     }
/// }
/// ```
pub trait TransferItem {
    /// The key type identifying an item.
    type Key: Clone + Eq + Hash + Debug;

    /// Return the unique key for this item.
    fn key(&self) -> Self::Key;

    /// Disabled items are shown but can never be moved.
    fn disabled(&self) -> bool {
        false
    }

    /// Text the search filter matches against.
    fn label(&self) -> String {
        format!("{:?}", self.key())
    }
}

/// Caller-supplied key derivation, applied instead of [`TransferItem::key`].
///
/// The item itself is never touched; the derived key lives on the
/// [`Row`](crate::Row) built from it.
pub type RowKey<T> = Box<dyn Fn(&T) -> <T as TransferItem>::Key>;

/// Key of `item`, through `row_key` when one is given.
pub(crate) fn derive_key<T: TransferItem>(item: &T, row_key: Option<&RowKey<T>>) -> T::Key {
    match row_key {
        Some(f) => f(item),
        None => item.key(),
    }
}

/// A plain string-keyed record.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Record {
    pub key: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub disabled: bool,
}

impl Record {
    /// Create an enabled record.
    pub fn new(key: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
            description: None,
            disabled: false,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }
}

impl TransferItem for Record {
    type Key = String;

    fn key(&self) -> String {
        self.key.clone()
    }

    fn disabled(&self) -> bool {
        self.disabled
    }

    fn label(&self) -> String {
        if self.title.is_empty() {
            self.key.clone()
        } else {
            self.title.clone()
        }
    }
}
