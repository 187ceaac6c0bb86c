//! # Domain Model
//!
//! This module defines the core data structures for dragly: [`Item`], [`ItemId`]
//! and [`ItemState`], plus the on-disk record shape they serialize to.
//!
//! ## Text Normalization
//!
//! Snippet text is trimmed before it is stored. Input that is empty after trimming
//! is rejected by [`normalize_text`], so a stored item never holds blank text.
//!
//! ## Record Format
//!
//! Each item is persisted as one JSON object:
//!
//! ```text
//! { "id": "<uuid>", "text": "...", "isUsed": false, "createdAt": "2024-05-01T09:30:00Z" }
//! ```
//!
//! - `createdAt` is optional. Records without it load with `created_at == None`.
//!   Older data stored it as seconds since 2001-01-01 UTC; those numbers are
//!   converted. Any other shape loads as `None` instead of failing the record.
//! - `isUsed` is the canonical flag. Older data written as `isChecked` is still read.
//! - Unknown fields are ignored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Opaque, never-reused identity of a queued item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(Uuid);

impl ItemId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for ItemId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ItemId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Consumption state of an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ItemState {
    #[default]
    Active,
    Used,
}

impl ItemState {
    pub fn is_used(self) -> bool {
        matches!(self, ItemState::Used)
    }

    pub fn toggled(self) -> Self {
        match self {
            ItemState::Active => ItemState::Used,
            ItemState::Used => ItemState::Active,
        }
    }
}

impl From<bool> for ItemState {
    fn from(is_used: bool) -> Self {
        if is_used {
            ItemState::Used
        } else {
            ItemState::Active
        }
    }
}

/// Trims snippet text, returning `None` when nothing is left.
pub fn normalize_text(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// One queued text snippet.
///
/// `text` and `state` are only changed through the repository, which keeps the
/// non-blank text invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    id: ItemId,
    pub(crate) text: String,
    pub(crate) state: ItemState,
    created_at: Option<DateTime<Utc>>,
}

impl Item {
    /// Creates a fresh `Active` item, or `None` if the text is blank.
    pub fn new(text: &str) -> Option<Self> {
        let text = normalize_text(text)?;
        Some(Self {
            id: ItemId::new(),
            text,
            state: ItemState::Active,
            created_at: Some(Utc::now()),
        })
    }

    /// Rebuilds an item from stored parts. Blank text yields `None`.
    pub fn from_parts(
        id: ItemId,
        text: &str,
        state: ItemState,
        created_at: Option<DateTime<Utc>>,
    ) -> Option<Self> {
        Some(Self {
            id,
            text: normalize_text(text)?,
            state,
            created_at,
        })
    }

    pub fn id(&self) -> ItemId {
        self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn state(&self) -> ItemState {
        self.state
    }

    pub fn is_used(&self) -> bool {
        self.state.is_used()
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ItemRecord<'a> {
    id: ItemId,
    text: &'a str,
    is_used: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    created_at: Option<DateTime<Utc>>,
}

impl Serialize for Item {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        ItemRecord {
            id: self.id,
            text: &self.text,
            is_used: self.state.is_used(),
            created_at: self.created_at,
        }
        .serialize(serializer)
    }
}

// Custom deserializer to handle data written with the older `isChecked` flag.
// `isUsed` wins when both are present; neither means the item is still active.
impl<'de> Deserialize<'de> for Item {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let helper = ItemHelper::deserialize(deserializer)?;
        let is_used = helper.is_used.or(helper.is_checked).unwrap_or(false);

        Ok(Item {
            id: helper.id,
            text: helper.text,
            state: ItemState::from(is_used),
            created_at: helper.created_at.and_then(RawTimestamp::into_datetime),
        })
    }
}

/// Seconds between the Unix epoch and 2001-01-01T00:00:00Z.
const REFERENCE_DATE_OFFSET: f64 = 978_307_200.0;

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTimestamp {
    Text(String),
    Seconds(f64),
    Other(serde::de::IgnoredAny),
}

impl RawTimestamp {
    fn into_datetime(self) -> Option<DateTime<Utc>> {
        match self {
            RawTimestamp::Text(s) => DateTime::parse_from_rfc3339(&s)
                .ok()
                .map(|dt| dt.with_timezone(&Utc)),
            RawTimestamp::Seconds(secs) => {
                let unix = secs + REFERENCE_DATE_OFFSET;
                if !unix.is_finite() {
                    return None;
                }
                let whole = unix.floor();
                let nanos = (((unix - whole) * 1e9).round() as u32).min(999_999_999);
                DateTime::from_timestamp(whole as i64, nanos)
            }
            RawTimestamp::Other(_) => None,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ItemHelper {
    id: ItemId,
    text: String,
    #[serde(default)]
    is_used: Option<bool>,
    #[serde(default)]
    is_checked: Option<bool>,
    #[serde(default)]
    created_at: Option<RawTimestamp>,
}
