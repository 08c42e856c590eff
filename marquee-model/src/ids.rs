use std::str::FromStr;

use crate::error::ModelError;
use uuid::Uuid;

/// Strongly typed ID for library items (movies, episodes, albums, ...).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ItemId(pub Uuid);

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl ItemId {
    pub fn new() -> Self {
        ItemId(Uuid::now_v7())
    }

    pub fn as_str(&self) -> String {
        self.0.to_string()
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    pub fn to_uuid(&self) -> Uuid {
        self.0
    }

    /// Dash-less lowercase form used in server paths.
    pub fn as_path_segment(&self) -> String {
        self.0.simple().to_string()
    }
}

impl AsRef<Uuid> for ItemId {
    fn as_ref(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for ItemId {
    fn from(value: Uuid) -> Self {
        ItemId(value)
    }
}

impl FromStr for ItemId {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(ItemId)
            .map_err(|_| ModelError::InvalidItemId(s.to_string()))
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::ItemId;

    #[test]
    fn parses_both_hyphenated_and_simple_forms() {
        let hyphenated: ItemId =
            "0191e9c2-7a3b-7c44-8a1e-3f0e5b2d9c10".parse().unwrap();
        let simple: ItemId = "0191e9c27a3b7c448a1e3f0e5b2d9c10".parse().unwrap();

        assert_eq!(hyphenated, simple);
        assert_eq!(
            hyphenated.as_path_segment(),
            "0191e9c27a3b7c448a1e3f0e5b2d9c10"
        );
    }

    #[test]
    fn rejects_garbage() {
        assert!("not-an-id".parse::<ItemId>().is_err());
    }
}
