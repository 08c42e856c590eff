use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use crate::error::ModelError;

/// Image roles an item may carry on the server.
///
/// Ordering between variants is a policy decision made by the selector; the
/// declaration order here carries no priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ImageVariant {
    /// Poster-style key art.
    Primary,
    Art,
    /// Wide background imagery. Items may have several.
    Backdrop,
    Banner,
    Logo,
    /// 16:9 landscape still. Episodic items may inherit one from a parent.
    Thumb,
    Disc,
    Box,
    BoxRear,
    Screenshot,
    Menu,
    Chapter,
}

impl ImageVariant {
    pub const ALL: [ImageVariant; 12] = [
        Self::Primary,
        Self::Art,
        Self::Backdrop,
        Self::Banner,
        Self::Logo,
        Self::Thumb,
        Self::Disc,
        Self::Box,
        Self::BoxRear,
        Self::Screenshot,
        Self::Menu,
        Self::Chapter,
    ];

    /// Canonical server name, used in URLs and configuration files.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Primary => "Primary",
            Self::Art => "Art",
            Self::Backdrop => "Backdrop",
            Self::Banner => "Banner",
            Self::Logo => "Logo",
            Self::Thumb => "Thumb",
            Self::Disc => "Disc",
            Self::Box => "Box",
            Self::BoxRear => "BoxRear",
            Self::Screenshot => "Screenshot",
            Self::Menu => "Menu",
            Self::Chapter => "Chapter",
        }
    }

    /// Parses a variant name using ASCII-case-insensitive matching.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|variant| variant.as_str().eq_ignore_ascii_case(value))
    }

    pub const fn is_primary(&self) -> bool {
        matches!(self, Self::Primary)
    }
}

impl Display for ImageVariant {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImageVariant {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| ModelError::UnknownVariant(s.to_string()))
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for ImageVariant {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for ImageVariant {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        value.parse().map_err(serde::de::Error::custom)
    }
}
