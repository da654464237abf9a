use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Names one of a trainer's collections.
///
/// `Available`, `Party`, `Boxed` and `Custom` are persistent homes: a pokemon
/// lives in exactly one of them. `Training` is a transient overlay.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CollectionKind {
    Available,
    Party,
    Boxed,
    Training,
    /// A trainer-defined group, identified by the slug of its folder name
    Custom(String),
}

impl CollectionKind {
    pub fn is_persistent(&self) -> bool {
        !matches!(self, CollectionKind::Training)
    }

    /// Whether `slug` parses to one of the built-in collections
    pub fn is_builtin_slug(slug: &str) -> bool {
        !matches!(slug.parse::<Self>(), Ok(CollectionKind::Custom(_)))
    }

    pub fn slug(&self) -> &str {
        match self {
            CollectionKind::Available => "available",
            CollectionKind::Party => "party",
            CollectionKind::Boxed => "boxed",
            CollectionKind::Training => "training",
            CollectionKind::Custom(slug) => slug,
        }
    }
}

impl fmt::Display for CollectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for CollectionKind {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "available" => CollectionKind::Available,
            "party" => CollectionKind::Party,
            "boxed" | "box" => CollectionKind::Boxed,
            "training" => CollectionKind::Training,
            other => CollectionKind::Custom(other.to_string()),
        })
    }
}
