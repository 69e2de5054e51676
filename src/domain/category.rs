//! The fixed category catalog shipped with the tracker.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::common::Displayable;

/// Closed, ordered set of categories a transaction may reference by key.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Purchases,
    Food,
    Salary,
    Car,
    Leisure,
    Studies,
}

impl Category {
    /// Catalog iteration order; summaries are emitted in this order.
    pub const ALL: [Category; 6] = [
        Category::Purchases,
        Category::Food,
        Category::Salary,
        Category::Car,
        Category::Leisure,
        Category::Studies,
    ];

    pub fn catalog() -> &'static [Category] {
        &Self::ALL
    }

    /// Persisted key referenced by transaction records.
    pub fn key(self) -> &'static str {
        match self {
            Category::Purchases => "purchases",
            Category::Food => "food",
            Category::Salary => "salary",
            Category::Car => "car",
            Category::Leisure => "leisure",
            Category::Studies => "studies",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Category::Purchases => "Purchases",
            Category::Food => "Food",
            Category::Salary => "Salary",
            Category::Car => "Car",
            Category::Leisure => "Leisure",
            Category::Studies => "Studies",
        }
    }

    /// Hex colour used by charts and swatches.
    pub fn color(self) -> &'static str {
        match self {
            Category::Purchases => "#5636D3",
            Category::Food => "#FF872C",
            Category::Salary => "#12A454",
            Category::Car => "#E83F5B",
            Category::Leisure => "#26195C",
            Category::Studies => "#9C001A",
        }
    }

    pub fn from_key(key: &str) -> Option<Category> {
        Self::ALL.into_iter().find(|category| category.key() == key)
    }

    pub fn keys() -> impl Iterator<Item = &'static str> {
        Self::ALL.into_iter().map(Category::key)
    }

    /// Splits the hex colour into RGB components.
    pub fn rgb(self) -> (u8, u8, u8) {
        let hex = self.color().trim_start_matches('#');
        let channel = |range: std::ops::Range<usize>| {
            hex.get(range)
                .and_then(|part| u8::from_str_radix(part, 16).ok())
                .unwrap_or(0)
        };
        (channel(0..2), channel(2..4), channel(4..6))
    }
}

impl Displayable for Category {
    fn display_label(&self) -> String {
        format!("{} ({})", self.display_name(), self.key())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_round_trip_through_lookup() {
        for category in Category::catalog() {
            assert_eq!(Category::from_key(category.key()), Some(*category));
        }
        assert_eq!(Category::from_key("category"), None);
    }

    #[test]
    fn catalog_order_is_stable() {
        let keys: Vec<_> = Category::keys().collect();
        assert_eq!(
            keys,
            ["purchases", "food", "salary", "car", "leisure", "studies"]
        );
    }

    #[test]
    fn colors_decode_to_rgb() {
        assert_eq!(Category::Salary.rgb(), (0x12, 0xA4, 0x54));
    }
}
