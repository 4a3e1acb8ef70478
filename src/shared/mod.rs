//! Shared newtypes and utilities used across all domain modules.
//!
//! These types are serialization-transparent: they serialize/deserialize identically
//! to the raw format the backend sends, so they can be used directly in wire types
//! without conversion overhead.

pub mod serde_util;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Cow;
use std::str::FromStr;

/// Currency every balance and ledger amount is denominated in.
pub const CURRENCY: &str = "USDT";

// ─── Username ────────────────────────────────────────────────────────────────

/// Newtype for backend usernames.
///
/// Serializes transparently as a JSON string. Can be used as a HashMap key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Username(String);

impl Username {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Percent-encoded form for use as a single URL path segment.
    pub fn path_segment(&self) -> Cow<'_, str> {
        urlencoding::encode(&self.0)
    }
}

impl std::fmt::Display for Username {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Username {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Username {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl FromStr for Username {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Username(s.to_string()))
    }
}

impl Serialize for Username {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Username {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Username(s))
    }
}

// ─── Page ────────────────────────────────────────────────────────────────────

/// One page of a `page`/`limit` listing.
///
/// The backend sends no total count, so "more pages exist" is inferred from
/// whether this page came back full. A last page holding exactly `limit`
/// items therefore still reports `has_next()`; only fetching the next (empty)
/// page resolves it.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub page: u32,
    pub limit: u32,
    pub items: Vec<T>,
}

impl<T> Page<T> {
    pub fn new(page: u32, limit: u32, items: Vec<T>) -> Self {
        Self { page, limit, items }
    }

    pub fn has_next(&self) -> bool {
        self.limit > 0 && self.items.len() == self.limit as usize
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
