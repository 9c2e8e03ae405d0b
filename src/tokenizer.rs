//! Free-text ingredient input -> normalized ingredient tokens.
//!
//! The two input fields (main ingredients and spices/condiments) are always
//! joined with a comma before splitting, so a bare single ingredient in each
//! field still yields two tokens and two empty fields yield no tokens at all.
//! A period anywhere in either field rejects the whole input.

use std::fmt;
use std::ops::Deref;

use crate::error::MatchError;

const SEPARATOR: char = ',';
const REJECTED: char = '.';

/// A trimmed, lower-cased, non-empty ingredient name from user input
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IngredientToken(String);

impl IngredientToken {
    /// Normalize a raw piece of input, `None` if nothing is left
    pub fn new(raw: &str) -> Option<Self> {
        let normalized = raw.trim().to_lowercase();
        if normalized.is_empty() {
            None
        } else {
            Some(IngredientToken(normalized))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Deref for IngredientToken {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IngredientToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Split the two raw input fields into ingredient tokens.
///
/// Order is preserved and duplicates are kept.
pub fn tokenize(primary: &str, secondary: &str) -> Result<Vec<IngredientToken>, MatchError> {
    if primary.contains(REJECTED) || secondary.contains(REJECTED) {
        return Err(MatchError::InvalidFormat);
    }

    Ok(primary
        .split(SEPARATOR)
        .chain(secondary.split(SEPARATOR))
        .filter_map(IngredientToken::new)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(tokens: &[IngredientToken]) -> Vec<&str> {
        tokens.iter().map(IngredientToken::as_str).collect()
    }

    #[test]
    fn test_tokenize_both_fields() {
        let tokens = tokenize("flour, sugar", "salt, pepper").unwrap();
        assert_eq!(strings(&tokens), vec!["flour", "sugar", "salt", "pepper"]);
    }

    #[test]
    fn test_tokenize_rejects_period() {
        let result = tokenize("flour. tomato", "cheese");
        assert!(matches!(result, Err(MatchError::InvalidFormat)));

        let result = tokenize("flour, tomato", "cheese.");
        assert!(matches!(result, Err(MatchError::InvalidFormat)));
    }

    #[test]
    fn test_tokenize_without_commas_keeps_fields_apart() {
        let tokens = tokenize("flour", "cheese").unwrap();
        assert_eq!(strings(&tokens), vec!["flour", "cheese"]);
    }

    #[test]
    fn test_tokenize_single_ingredient() {
        let tokens = tokenize("Flour", "").unwrap();
        assert_eq!(strings(&tokens), vec!["flour"]);
    }

    #[test]
    fn test_tokenize_empty_fields() {
        assert!(tokenize("", "").unwrap().is_empty());
        assert!(tokenize(" , ,", "  ").unwrap().is_empty());
    }

    #[test]
    fn test_tokenize_normalizes_and_keeps_duplicates() {
        let tokens = tokenize("  Eggs ,MILK,, eggs", "").unwrap();
        assert_eq!(strings(&tokens), vec!["eggs", "milk", "eggs"]);
    }

    #[test]
    fn test_tokens_are_never_empty() {
        let inputs = [(",,,", ","), (" a , ", " , b"), ("", "x,,y")];
        for (primary, secondary) in inputs {
            for token in tokenize(primary, secondary).unwrap() {
                assert!(!token.is_empty());
            }
        }
    }
}
