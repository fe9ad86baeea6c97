/// Shared types used across the codebase

use serde::{Deserialize, Deserializer};

/// Tri-state optional request field.
///
/// Distinguishes a key that was left out of the JSON body (`Absent`) from one
/// that was sent as `null` (`Null`) and one that carries a value (`Present`).
/// Use with `#[serde(default)]` so a missing key decodes to `Absent`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Field<T> {
    #[default]
    Absent,
    Null,
    Present(T),
}

impl<T> Field<T> {
    /// Value to bind on a full replace: both `Absent` and `Null` write NULL.
    pub fn into_option(self) -> Option<T> {
        match self {
            Field::Present(value) => Some(value),
            Field::Absent | Field::Null => None,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Field::Absent)
    }
}

impl<'de, T> Deserialize<'de> for Field<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Only reached when the key exists; `#[serde(default)]` covers the missing case
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(value) => Field::Present(value),
            None => Field::Null,
        })
    }
}
