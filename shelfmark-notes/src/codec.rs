use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::NoteError;

/// Reading state stored in a note's `status` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadingStatus {
    PlanToRead,
    Reading,
    Completed,
    OnHold,
    Dropped,
    None,
}

impl ReadingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PlanToRead => "plan_to_read",
            Self::Reading => "reading",
            Self::Completed => "completed",
            Self::OnHold => "on_hold",
            Self::Dropped => "dropped",
            Self::None => "none",
        }
    }

    pub const ALL: [ReadingStatus; 6] = [
        Self::PlanToRead,
        Self::Reading,
        Self::Completed,
        Self::OnHold,
        Self::Dropped,
        Self::None,
    ];
}

impl fmt::Display for ReadingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReadingStatus {
    type Err = NoteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| NoteError::InvalidStatus(s.to_owned()))
    }
}

/// Field name of the per-volume completion map.
pub const VOLUME_FIELD: &str = "volume_status";

/// Token marking a volume as completed.
pub const VOLUME_COMPLETED: &str = "completed";

/// Sparse per-volume completion map from the `volume_status` field.
///
/// Keys are parsed to integers on insertion, so serialization orders `10`
/// after `9` rather than lexically. An absent entry means "not completed";
/// an empty map serializes to nothing at all (the header is omitted too).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VolumeMap {
    entries: BTreeMap<u32, String>,
}

impl VolumeMap {
    /// Parse one indented `index: token` body line. Returns `None` for
    /// lines that are not map-shaped.
    pub fn parse_entry(line: &str) -> Option<(u32, &str)> {
        let (key, value) = line.trim().split_once(':')?;
        let index: u32 = key.trim().parse().ok()?;
        let token = value.trim();
        if token.is_empty() {
            return None;
        }
        Some((index, token))
    }

    pub fn insert(&mut self, index: u32, token: &str) {
        self.entries.insert(index, token.to_owned());
    }

    pub fn complete(&mut self, index: u32) {
        self.insert(index, VOLUME_COMPLETED);
    }

    pub fn clear(&mut self, index: u32) {
        self.entries.remove(&index);
    }

    pub fn is_completed(&self, index: u32) -> bool {
        self.entries.get(&index).map(String::as_str) == Some(VOLUME_COMPLETED)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn indices(&self) -> impl Iterator<Item = u32> + '_ {
        self.entries.keys().copied()
    }

    /// Render the canonical field region: the header line plus one
    /// two-space-indented entry per key in ascending numeric order, every
    /// line terminated with `eol`. Empty maps render to an empty string.
    pub fn render(&self, eol: &str) -> String {
        if self.entries.is_empty() {
            return String::new();
        }
        let mut out = String::with_capacity(16 + self.entries.len() * 16);
        out.push_str(VOLUME_FIELD);
        out.push(':');
        out.push_str(eol);
        for (index, token) in &self.entries {
            out.push_str("  ");
            out.push_str(&index.to_string());
            out.push_str(": ");
            out.push_str(token);
            out.push_str(eol);
        }
        out
    }
}
