use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Reward category. Selects which image pool a review event draws from.
///
/// The four answer grades map one-to-one onto the grading buttons of the
/// review screen; `Break` is the scheduled intermission and `Start` the
/// start-of-session reward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Again,
    Hard,
    Good,
    Easy,
    Break,
    Start,
}

impl Category {
    /// All categories, in the fixed order pool requests are issued.
    pub const ALL: [Category; 6] = [
        Category::Again,
        Category::Hard,
        Category::Good,
        Category::Easy,
        Category::Break,
        Category::Start,
    ];

    /// The four answer grades.
    pub const ANSWER_GRADES: [Category; 4] = [
        Category::Again,
        Category::Hard,
        Category::Good,
        Category::Easy,
    ];

    /// Wire name, as used in channel strings and payload keys.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Again => "again",
            Category::Hard => "hard",
            Category::Good => "good",
            Category::Easy => "easy",
            Category::Break => "break",
            Category::Start => "start",
        }
    }

    pub fn is_answer_grade(self) -> bool {
        matches!(
            self,
            Category::Again | Category::Hard | Category::Good | Category::Easy
        )
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "again" => Ok(Category::Again),
            "hard" => Ok(Category::Hard),
            "good" => Ok(Category::Good),
            "easy" => Ok(Category::Easy),
            "break" => Ok(Category::Break),
            "start" => Ok(Category::Start),
            other => Err(CoreError::UnknownCategory(other.to_string())),
        }
    }
}
