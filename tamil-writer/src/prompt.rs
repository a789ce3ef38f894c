//! Instruction templates sent to the completion service.

use crate::types::{Genre, Subgenre};

const POET_SYSTEM_PROMPT: &str = "You are a Tamil poet. Write beautiful Tamil poems with rhyme and rhythm.";
const STORYTELLER_SYSTEM_PROMPT: &str =
    "You are a Tamil storyteller. Write engaging Tamil stories with simple language and interesting endings.";

/// Length and style constraints appended to the user instruction
const POEM_CONSTRAINTS: [&str; 3] = ["4-6 வரிகள்", "அழகான தமிழ்", "ஓசை நயம்"];
const STORY_CONSTRAINTS: [&str; 3] = ["5-10 வாக்கியங்கள்", "எளிய தமிழ்", "சுவாரஸ்யமான முடிவு"];

/// System and user instructions for one completion call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompts {
    pub system: String,
    pub user: String,
}

/// Build the instruction pair for a genre.
///
/// Title and description are interpolated verbatim; callers validate them beforehand.
pub fn build_prompts(genre: Genre, subgenre: Subgenre, title: &str, description: &str) -> Prompts {
    let (system, constraints) = match genre {
        Genre::Poem => (POET_SYSTEM_PROMPT, POEM_CONSTRAINTS),
        Genre::Story => (STORYTELLER_SYSTEM_PROMPT, STORY_CONSTRAINTS),
    };

    let mut user = format!(
        "பின்வரும் தலைப்பில் {} வகை தமிழ் {} எழுதுக:\nதலைப்பு: {}\nவிளக்கம்: {}",
        subgenre.label(),
        genre.label(),
        title,
        description
    );
    for constraint in constraints {
        user.push_str("\n• ");
        user.push_str(constraint);
    }

    Prompts {
        system: system.to_string(),
        user,
    }
}
