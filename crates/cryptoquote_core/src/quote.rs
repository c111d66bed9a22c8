//! Quote data as delivered by a quote provider.

use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Which collection a quote was drawn from.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Category {
    /// Lines from films.
    Movies,
    /// Sayings of well-known people.
    Famous,
}

/// One quote: the text to encrypt, who said it, and its category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    /// Who said it. Encrypted along with the quote.
    pub author: String,
    /// Collection the quote belongs to. Shown in the clear.
    pub category: Category,
    /// The quote text.
    pub quote: String,
}

impl Quote {
    /// Creates a new quote.
    #[instrument(skip(author, quote))]
    pub fn new(author: impl Into<String>, category: Category, quote: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            category,
            quote: quote.into(),
        }
    }

    /// Returns the quote with text and author upper-cased, as puzzles show them.
    pub fn normalized(&self) -> Self {
        Self {
            author: self.author.to_uppercase(),
            category: self.category,
            quote: self.quote.to_uppercase(),
        }
    }

    /// True if neither the quote nor the author has any text.
    pub fn is_blank(&self) -> bool {
        self.quote.trim().is_empty() && self.author.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_category_wire_format() {
        let json = r#"{"author":"Yoda","category":"movies","quote":"Do or do not."}"#;
        let quote: Quote = serde_json::from_str(json).unwrap();
        assert_eq!(quote.category, Category::Movies);
        assert_eq!(quote.author, "Yoda");

        assert_eq!(
            serde_json::to_string(&Category::Famous).unwrap(),
            "\"famous\""
        );
    }

    #[test]
    fn test_category_display_and_parse() {
        assert_eq!(Category::Movies.to_string(), "movies");
        assert_eq!(Category::from_str("famous").unwrap(), Category::Famous);
        assert_eq!(Category::iter().count(), 2);
    }

    #[test]
    fn test_normalized_uppercases_text() {
        let quote = Quote::new("Mae West", Category::Famous, "Too much of a good thing...");
        let normalized = quote.normalized();
        assert_eq!(normalized.author, "MAE WEST");
        assert_eq!(normalized.quote, "TOO MUCH OF A GOOD THING...");
    }

    #[test]
    fn test_is_blank() {
        assert!(Quote::new(" ", Category::Famous, "").is_blank());
        assert!(!Quote::new("", Category::Famous, "Hi").is_blank());
    }
}
