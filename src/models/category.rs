use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};

/// Language grouping of the catalog; each category has its own dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    International,
    Tamil,
    Indian,
}

impl Category {
    /// All categories in selector order
    pub const ALL: [Category; 3] = [Category::International, Category::Tamil, Category::Indian];

    /// Human-readable name shown in the category selector
    pub fn label(&self) -> &'static str {
        match self {
            Category::International => "International",
            Category::Tamil => "Tamil",
            Category::Indian => "Indian",
        }
    }

    /// File name of the persisted title table
    pub fn titles_file(&self) -> &'static str {
        match self {
            Category::International => "movie_list.csv",
            Category::Tamil => "Tamil_movies.csv",
            Category::Indian => "Indian_movies.csv",
        }
    }

    /// File name of the persisted feature matrix
    pub fn features_file(&self) -> &'static str {
        match self {
            Category::International => "matrix.json",
            Category::Tamil => "T_matrix.json",
            Category::Indian => "I_matrix.json",
        }
    }

    /// Fixed quick-select list shown in the top-rated strip
    pub fn top_rated(&self) -> [&'static str; 5] {
        match self {
            Category::International => [
                "Avengers: Age of Ultron",
                "2012",
                "The Dark Knight",
                "Spider-Man",
                "X-Men",
            ],
            Category::Tamil => ["Singam", "Billa", "Sivaji", "Vaaranam Aayiram", "Indian"],
            Category::Indian => ["Jersey", "3 Idiots", "Dangal", "Pink", "Mahanati"],
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "international" => Ok(Category::International),
            "tamil" => Ok(Category::Tamil),
            "indian" => Ok(Category::Indian),
            other => Err(format!("Unknown category: {}", other)),
        }
    }
}
