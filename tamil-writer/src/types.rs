//! Content category types shared by the prompt builder, the renderer and the HTTP layer.
//!
//! This module defines:
//! - [`Genre`]: top-level category, a poem or a story
//! - [`Subgenre`]: one of five fixed forms within each genre
//!
//! Both types carry a stable ASCII wire id (used in forms and JSON) and a Tamil display label
//! (used in prompts, the rendered document and its filename).
//!
//! ## Example
//!
//! ```
//! use tamil_writer::types::{Genre, Subgenre};
//!
//! let subgenre: Subgenre = "venba".parse().unwrap();
//! assert_eq!(subgenre.genre(), Genre::Poem);
//! assert_eq!(subgenre.label(), "வெண்பா");
//! ```

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Genre {
    Poem,
    Story,
}

impl Genre {
    pub const ALL: [Genre; 2] = [Genre::Poem, Genre::Story];

    pub fn id(self) -> &'static str {
        match self {
            Genre::Poem => "poem",
            Genre::Story => "story",
        }
    }

    /// Tamil noun for the genre
    pub fn label(self) -> &'static str {
        match self {
            Genre::Poem => "கவிதை",
            Genre::Story => "கதை",
        }
    }

    /// The five subgenres offered for this genre, in display order
    pub fn subgenres(self) -> &'static [Subgenre] {
        match self {
            Genre::Poem => &[
                Subgenre::EnseerViruttam,
                Subgenre::Kuraladi,
                Subgenre::Venba,
                Subgenre::Asiriyappa,
                Subgenre::FreeVerse,
            ],
            Genre::Story => &[
                Subgenre::Moral,
                Subgenre::ScienceFiction,
                Subgenre::Romance,
                Subgenre::Horror,
                Subgenre::Historical,
            ],
        }
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Genre {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Genre::ALL
            .into_iter()
            .find(|g| g.id() == s)
            .ok_or_else(|| UnknownVariant::new("genre", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Subgenre {
    // Poem forms
    EnseerViruttam,
    Kuraladi,
    Venba,
    Asiriyappa,
    FreeVerse,
    // Story styles
    Moral,
    ScienceFiction,
    Romance,
    Horror,
    Historical,
}

impl Subgenre {
    pub fn id(self) -> &'static str {
        match self {
            Subgenre::EnseerViruttam => "enseer_viruttam",
            Subgenre::Kuraladi => "kuraladi",
            Subgenre::Venba => "venba",
            Subgenre::Asiriyappa => "asiriyappa",
            Subgenre::FreeVerse => "free_verse",
            Subgenre::Moral => "moral",
            Subgenre::ScienceFiction => "science_fiction",
            Subgenre::Romance => "romance",
            Subgenre::Horror => "horror",
            Subgenre::Historical => "historical",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Subgenre::EnseerViruttam => "எண்சீர் விருத்தம்",
            Subgenre::Kuraladi => "குறளடி",
            Subgenre::Venba => "வெண்பா",
            Subgenre::Asiriyappa => "ஆசிரியப்பா",
            Subgenre::FreeVerse => "மரபற்ற கவிதை",
            Subgenre::Moral => "நீதிக் கதை",
            Subgenre::ScienceFiction => "அறிவியல் புனைகதை",
            Subgenre::Romance => "காதல் கதை",
            Subgenre::Horror => "திகில் கதை",
            Subgenre::Historical => "வரலாற்று கதை",
        }
    }

    pub fn genre(self) -> Genre {
        match self {
            Subgenre::EnseerViruttam | Subgenre::Kuraladi | Subgenre::Venba | Subgenre::Asiriyappa | Subgenre::FreeVerse => Genre::Poem,
            Subgenre::Moral | Subgenre::ScienceFiction | Subgenre::Romance | Subgenre::Horror | Subgenre::Historical => Genre::Story,
        }
    }
}

impl fmt::Display for Subgenre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Subgenre {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Genre::ALL
            .iter()
            .flat_map(|g| g.subgenres())
            .copied()
            .find(|sg| sg.id() == s)
            .ok_or_else(|| UnknownVariant::new("subgenre", s))
    }
}

/// Returned when parsing a genre or subgenre id that is not in the fixed list
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} '{value}'")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

impl UnknownVariant {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}
