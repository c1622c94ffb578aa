//! Database record IDs.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Primary key of a `redirect_settings` row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(feature = "postgres", sqlx(transparent))]
#[serde(transparent)]
pub struct RedirectSettingId(i32);

impl RedirectSettingId {
    /// Create an ID from the raw `SERIAL` value.
    #[must_use]
    pub const fn new(id: i32) -> Self {
        Self(id)
    }
}

impl fmt::Display for RedirectSettingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
