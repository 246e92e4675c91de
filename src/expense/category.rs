use std::fmt;

use serde::{Deserialize, Serialize};

/// Built-in expense categories offered for entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Accommodation,
    Transportation,
    Food,
    Activities,
    Shopping,
    Other,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Accommodation,
        Category::Transportation,
        Category::Food,
        Category::Activities,
        Category::Shopping,
        Category::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::Accommodation => "Accommodation",
            Category::Transportation => "Transportation",
            Category::Food => "Food",
            Category::Activities => "Activities",
            Category::Shopping => "Shopping",
            Category::Other => "Other",
        }
    }

    pub fn color(self) -> CategoryColor {
        match self {
            Category::Accommodation => CategoryColor::Blue,
            Category::Transportation => CategoryColor::Green,
            Category::Food => CategoryColor::Yellow,
            Category::Activities => CategoryColor::Purple,
            Category::Shopping => CategoryColor::Pink,
            Category::Other => CategoryColor::Gray,
        }
    }

    /// Exact, case-sensitive lookup of a stored label.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|category| category.label() == label)
    }

    /// Case-insensitive lookup used for typed input.
    pub fn parse_loose(input: &str) -> Option<Self> {
        let needle = input.trim();
        Self::ALL
            .into_iter()
            .find(|category| category.label().eq_ignore_ascii_case(needle))
    }

    /// Display color for any stored label; unknown labels share `Other`'s color.
    pub fn color_for(label: &str) -> CategoryColor {
        Self::from_label(label)
            .unwrap_or(Category::Other)
            .color()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Display accent attached to a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryColor {
    Blue,
    Green,
    Yellow,
    Purple,
    Pink,
    Gray,
}

impl CategoryColor {
    /// Utility class name used by web front-ends.
    pub fn css_class(self) -> &'static str {
        match self {
            CategoryColor::Blue => "bg-blue-500",
            CategoryColor::Green => "bg-green-500",
            CategoryColor::Yellow => "bg-yellow-500",
            CategoryColor::Purple => "bg-purple-500",
            CategoryColor::Pink => "bg-pink-500",
            CategoryColor::Gray => "bg-gray-500",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_labels_fall_back_to_other_color() {
        assert_eq!(Category::color_for("Souvenirs"), CategoryColor::Gray);
        assert_eq!(Category::color_for("food"), CategoryColor::Gray);
        assert_eq!(Category::color_for("Food"), CategoryColor::Yellow);
    }

    #[test]
    fn loose_parse_ignores_case_and_padding() {
        assert_eq!(Category::parse_loose("  shopping "), Some(Category::Shopping));
        assert_eq!(Category::parse_loose("Museum"), None);
    }

    #[test]
    fn every_category_has_distinct_color() {
        let mut classes: Vec<_> = Category::ALL
            .iter()
            .map(|category| category.color().css_class())
            .collect();
        classes.sort();
        classes.dedup();
        assert_eq!(classes.len(), Category::ALL.len());
    }
}
