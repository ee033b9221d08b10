//! Reference tables: countries, states, cities and streams

use serde::Serialize;

/// Row of any reference table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct ReferenceEntry {
    pub id: i64,
    pub name: String,
    pub slug: String,
}

/// Reference tables a college can point at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    Country,
    State,
    City,
    Stream,
}

impl ReferenceKind {
    pub fn table(&self) -> &'static str {
        match self {
            Self::Country => "countries",
            Self::State => "states",
            Self::City => "cities",
            Self::Stream => "streams",
        }
    }

    /// Column on `colleges` that references this table
    pub fn college_column(&self) -> &'static str {
        match self {
            Self::Country => "country_id",
            Self::State => "state_id",
            Self::City => "city_id",
            Self::Stream => "stream_id",
        }
    }
}
