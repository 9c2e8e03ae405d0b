use regex::{Regex, RegexBuilder};

use crate::error::MatchError;

/// Word-boundary pattern for one user ingredient that tolerates a plain `s` or
/// `es` plural suffix
#[derive(Debug, Clone)]
pub struct IngredientPattern {
    token: String,
    regex: Regex,
}

impl IngredientPattern {
    pub fn new(token: &str) -> Result<Self, MatchError> {
        let regex = RegexBuilder::new(&format!(r"\b{}(?:es|s)?\b", regex::escape(token)))
            .case_insensitive(true)
            .build()?;
        Ok(Self {
            token: token.to_string(),
            regex,
        })
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    /// Test the whole recipe ingredient text, not word by word
    pub fn is_match(&self, recipe_ingredient: &str) -> bool {
        self.regex.is_match(recipe_ingredient)
    }
}

/// One-off check without keeping the compiled pattern around
pub fn matches(user_token: &str, recipe_ingredient: &str) -> Result<bool, MatchError> {
    Ok(IngredientPattern::new(user_token)?.is_match(recipe_ingredient))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match() {
        assert!(matches("flour", "flour").unwrap());
        assert!(!matches("flour", "sugar").unwrap());
    }

    #[test]
    fn test_plural_suffixes() {
        assert!(matches("egg", "2 eggs").unwrap());
        assert!(matches("tomato", "400g tomatoes").unwrap());
        assert!(!matches("egg", "eggplant").unwrap());
    }

    #[test]
    fn test_word_boundary_on_the_left() {
        assert!(!matches("rice", "licorice").unwrap());
        assert!(matches("rice", "brown rice").unwrap());
    }

    #[test]
    fn test_case_insensitive() {
        assert!(matches("garlic", "2 cloves GARLIC, crushed").unwrap());
    }

    #[test]
    fn test_multi_word_ingredient_text() {
        assert!(matches("egg", "free-range eggs").unwrap());
        assert!(matches("olive oil", "2 tbsp olive oil").unwrap());
    }

    #[test]
    fn test_regex_metacharacters_are_escaped() {
        assert!(!matches("a+b", "aab").unwrap());
        assert!(matches("a+b", "a+b mix").unwrap());
    }
}
