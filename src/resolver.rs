use std::collections::{BTreeMap, BTreeSet};

use crate::substitutions::{is_close_match, SubstitutionCatalog};
use crate::tokenizer::IngredientToken;

/// Suggest substitutes for the recipe ingredients the user does not have.
///
/// An ingredient is skipped when it was matched or when any user token is in
/// a substring relation with it, which is looser than the scoring pattern:
/// "vegetable stock" is not scored for "veg" but is not offered a
/// substitute either. Ingredients without a catalog hit are left out.
pub fn resolve(
    catalog: &SubstitutionCatalog,
    recipe_ingredients: &[&str],
    matched_ingredients: &BTreeSet<String>,
    user_tokens: &[IngredientToken],
) -> BTreeMap<String, Vec<String>> {
    let matched: BTreeSet<String> = matched_ingredients
        .iter()
        .map(|m| m.to_lowercase())
        .collect();
    let mut substitutions = BTreeMap::new();

    for ingredient in recipe_ingredients {
        let lowered = ingredient.to_lowercase();
        if matched.contains(&lowered)
            || user_tokens
                .iter()
                .any(|token| is_close_match(&lowered, token.as_str()))
        {
            continue;
        }
        if let Some(subs) = catalog.lookup(&lowered) {
            if !subs.is_empty() {
                substitutions.insert(ingredient.to_string(), subs.to_vec());
            }
        }
    }

    substitutions
}
