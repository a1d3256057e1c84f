//! The fixed set of expense categories.
//!
//! The category set is closed: unknown values in stored data or form
//! submissions fall back to [Category::Other] instead of failing, so stale
//! data never breaks a page render.

use serde::{Deserialize, Serialize};

/// An expense category.
///
/// The variant order is the display order used to break ties when two
/// categories have equal totals in a breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Food and dining out.
    Food,
    /// Housing and rent.
    Housing,
    /// Transportation.
    Transportation,
    /// Education.
    Education,
    /// Healthcare.
    Healthcare,
    /// Entertainment.
    Entertainment,
    /// Utilities.
    Utilities,
    /// Shopping.
    Shopping,
    /// Savings put aside.
    Savings,
    /// Anything that does not fit the other categories, and the fallback for
    /// unrecognized category values.
    #[serde(other)]
    Other,
}

/// All categories in display order.
pub const ALL_CATEGORIES: [Category; 10] = [
    Category::Food,
    Category::Housing,
    Category::Transportation,
    Category::Education,
    Category::Healthcare,
    Category::Entertainment,
    Category::Utilities,
    Category::Shopping,
    Category::Savings,
    Category::Other,
];

impl Category {
    /// Parse a category from its slug, falling back to [Category::Other] for
    /// unrecognized values.
    pub fn from_slug(slug: &str) -> Self {
        match slug {
            "food" => Category::Food,
            "housing" => Category::Housing,
            "transportation" => Category::Transportation,
            "education" => Category::Education,
            "healthcare" => Category::Healthcare,
            "entertainment" => Category::Entertainment,
            "utilities" => Category::Utilities,
            "shopping" => Category::Shopping,
            "savings" => Category::Savings,
            _ => Category::Other,
        }
    }

    /// The value used in forms, query strings and the persisted data file.
    pub fn as_slug(self) -> &'static str {
        match self {
            Category::Food => "food",
            Category::Housing => "housing",
            Category::Transportation => "transportation",
            Category::Education => "education",
            Category::Healthcare => "healthcare",
            Category::Entertainment => "entertainment",
            Category::Utilities => "utilities",
            Category::Shopping => "shopping",
            Category::Savings => "savings",
            Category::Other => "other",
        }
    }

    /// The plain-text display name, e.g. for CSV cells where emoji would be noise.
    pub fn label(self) -> &'static str {
        match self {
            Category::Food => "Food & Dining",
            Category::Housing => "Housing & Rent",
            Category::Transportation => "Transportation",
            Category::Education => "Education",
            Category::Healthcare => "Healthcare",
            Category::Entertainment => "Entertainment",
            Category::Utilities => "Utilities",
            Category::Shopping => "Shopping",
            Category::Savings => "Savings",
            Category::Other => "Other",
        }
    }

    /// The emoji shown next to the label on HTML pages.
    pub fn emoji(self) -> &'static str {
        match self {
            Category::Food => "🍔",
            Category::Housing => "🏠",
            Category::Transportation => "🚗",
            Category::Education => "📚",
            Category::Healthcare => "⚕️",
            Category::Entertainment => "🎬",
            Category::Utilities => "💡",
            Category::Shopping => "🛍️",
            Category::Savings => "💵",
            Category::Other => "📌",
        }
    }

    /// The accent color used for breakdown bars and badges.
    pub fn color(self) -> &'static str {
        match self {
            Category::Food => "#FF6200",
            Category::Housing => "#1976D2",
            Category::Transportation => "#00ACC1",
            Category::Education => "#5E35B1",
            Category::Healthcare => "#E91E63",
            Category::Entertainment => "#F57C00",
            Category::Utilities => "#00897B",
            Category::Shopping => "#8E24AA",
            Category::Savings => "#03AC0E",
            Category::Other => "#757575",
        }
    }

    /// The label with its emoji prefix, as shown in selects and tables.
    pub fn display_label(self) -> String {
        format!("{} {}", self.emoji(), self.label())
    }
}

#[cfg(test)]
mod category_tests {
    use super::{ALL_CATEGORIES, Category};

    #[test]
    fn from_slug_round_trips_every_category() {
        for category in ALL_CATEGORIES {
            assert_eq!(Category::from_slug(category.as_slug()), category);
        }
    }

    #[test]
    fn unknown_slug_falls_back_to_other() {
        assert_eq!(Category::from_slug("crypto"), Category::Other);
        assert_eq!(Category::from_slug(""), Category::Other);
    }

    #[test]
    fn unknown_serialized_value_deserializes_to_other() {
        let category: Category = serde_json::from_str("\"crypto\"").unwrap();

        assert_eq!(category, Category::Other);
    }

    #[test]
    fn serializes_as_slug() {
        let json = serde_json::to_string(&Category::Food).unwrap();

        assert_eq!(json, "\"food\"");
    }
}
