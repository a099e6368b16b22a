//! Category types for product organization.

use serde::{Deserialize, Serialize};

/// A browsable product category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    /// Category slug as stored on products (e.g., "men").
    pub id: String,
    /// Display name.
    pub name: String,
}

/// Slugs and display names of the storefront's standard categories.
const STANDARD: &[(&str, &str)] = &[
    ("men", "Men's Clothing"),
    ("women", "Women's Clothing"),
    ("accessories", "Accessories"),
    ("new", "New Arrivals"),
    ("sale", "Sale"),
];

impl Category {
    /// Create a category.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// The standard category list shown in the filter sidebar.
    pub fn standard() -> Vec<Category> {
        STANDARD
            .iter()
            .map(|(id, name)| Category::new(*id, *name))
            .collect()
    }

    /// Look up the display name of a standard category slug.
    pub fn display_name(id: &str) -> Option<&'static str> {
        STANDARD
            .iter()
            .find(|(slug, _)| *slug == id)
            .map(|(_, name)| *name)
    }

    /// Heading for a listing page, e.g. "Men's Collection" or "All Products".
    pub fn collection_title(selected: Option<&str>) -> String {
        match selected.filter(|s| !s.is_empty()) {
            Some(slug) => {
                let mut chars = slug.chars();
                let capitalized: String = match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect(),
                    None => String::new(),
                };
                format!("{}'s Collection", capitalized)
            }
            None => "All Products".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_categories() {
        let categories = Category::standard();
        assert_eq!(categories.len(), 5);
        assert_eq!(categories[0].id, "men");
        assert_eq!(Category::display_name("sale"), Some("Sale"));
        assert_eq!(Category::display_name("toys"), None);
    }

    #[test]
    fn test_collection_title() {
        assert_eq!(Category::collection_title(Some("men")), "Men's Collection");
        assert_eq!(Category::collection_title(Some("")), "All Products");
        assert_eq!(Category::collection_title(None), "All Products");
    }
}
