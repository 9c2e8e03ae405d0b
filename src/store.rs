use log::{debug, warn};
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::MatchError;
use crate::model::RecipeDetails;

const NO_USER: &str = "No user is currently logged in.";
const URL_NOT_AVAILABLE: &str = "URL not available";

/// Per-user saved recipes kept in one JSON file (`username -> [recipe]`).
///
/// The user is always passed in by the caller. Status messages are returned
/// for the "nothing to do" cases. Reads treat a corrupt file as empty, while
/// `save` and `delete` refuse to write over it.
#[derive(Debug, Clone)]
pub struct SavedRecipeStore {
    path: PathBuf,
}

impl SavedRecipeStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append a recipe to the user's list
    pub fn save(&self, user: &str, recipe: &RecipeDetails) -> Result<String, MatchError> {
        if user.trim().is_empty() {
            return Ok(NO_USER.to_string());
        }

        let mut all = self.load_all()?;
        all.entry(user.to_string()).or_default().push(recipe.clone());
        self.write_all(&all)?;

        Ok(format!(
            "Recipe '{}' has been saved successfully under user '{}'.",
            recipe.name, user
        ))
    }

    /// Remove the first saved recipe with exactly this name
    pub fn delete(&self, user: &str, recipe_name: &str) -> Result<String, MatchError> {
        if user.trim().is_empty() {
            return Ok(NO_USER.to_string());
        }

        let mut all = self.load_all()?;
        let position = all
            .get(user)
            .and_then(|recipes| recipes.iter().position(|r| r.name == recipe_name));
        let Some(index) = position else {
            return Ok(format!("Recipe '{}' not found.", recipe_name));
        };

        if let Some(recipes) = all.get_mut(user) {
            recipes.remove(index);
        }
        self.write_all(&all)?;

        Ok(format!(
            "Recipe '{}' has been deleted successfully under username {}.",
            recipe_name, user
        ))
    }

    pub fn list(&self, user: &str) -> Vec<RecipeDetails> {
        self.load_all()
            .unwrap_or_else(|e| {
                warn!("Ignoring unreadable saved recipes {}: {}", self.path.display(), e);
                BTreeMap::new()
            })
            .remove(user)
            .unwrap_or_default()
    }

    /// Saved recipes of a user formatted for display
    pub fn render(&self, user: &str) -> String {
        let recipes = self.list(user);
        if recipes.is_empty() {
            return "No recipes found.".to_string();
        }
        recipes
            .iter()
            .map(format_recipe)
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// A missing file is an empty store; a corrupt one is an error
    fn load_all(&self) -> Result<BTreeMap<String, Vec<RecipeDetails>>, MatchError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No saved recipes at {}", self.path.display());
                return Ok(BTreeMap::new());
            }
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_str(&text)?)
    }

    fn write_all(&self, all: &BTreeMap<String, Vec<RecipeDetails>>) -> Result<(), MatchError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, serde_json::to_string_pretty(all)?)?;
        Ok(())
    }
}

/// Multi-line display block for one recipe
pub fn format_recipe(recipe: &RecipeDetails) -> String {
    let ingredients = recipe
        .ingredients
        .iter()
        .map(|ingredient| format!(" - {}", ingredient))
        .collect::<Vec<_>>()
        .join("\n");
    format!(
        "Name: {}\nSource: {}\nURL: {}\nIngredients:\n{}\nSteps:\n{}\n",
        recipe.name,
        recipe.source,
        recipe.url.as_deref().unwrap_or(URL_NOT_AVAILABLE),
        ingredients,
        recipe.steps.join("\n")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Source;
    use tempfile::tempdir;

    fn pizza() -> RecipeDetails {
        RecipeDetails {
            name: "Pizza".to_string(),
            url: Some("https://example.com/pizza".to_string()),
            ingredients: vec!["flour".to_string(), "cheese".to_string()],
            steps: vec!["Bake it".to_string()],
            source: Source::BbcGoodFood,
        }
    }

    #[test]
    fn test_save_and_list() {
        let dir = tempdir().unwrap();
        let store = SavedRecipeStore::new(dir.path().join("users/saved_recipes.json"));

        let message = store.save("alice", &pizza()).unwrap();
        assert_eq!(
            message,
            "Recipe 'Pizza' has been saved successfully under user 'alice'."
        );
        assert_eq!(store.list("alice"), vec![pizza()]);
        assert!(store.list("bob").is_empty());
    }

    #[test]
    fn test_save_without_user() {
        let dir = tempdir().unwrap();
        let store = SavedRecipeStore::new(dir.path().join("saved.json"));
        assert_eq!(store.save("", &pizza()).unwrap(), NO_USER);
        assert!(!store.path().exists());
    }

    #[test]
    fn test_delete() {
        let dir = tempdir().unwrap();
        let store = SavedRecipeStore::new(dir.path().join("saved.json"));
        store.save("alice", &pizza()).unwrap();
        store.save("alice", &pizza()).unwrap();

        let message = store.delete("alice", "Pizza").unwrap();
        assert_eq!(
            message,
            "Recipe 'Pizza' has been deleted successfully under username alice."
        );
        assert_eq!(store.list("alice").len(), 1);
    }

    #[test]
    fn test_delete_missing_is_a_status() {
        let dir = tempdir().unwrap();
        let store = SavedRecipeStore::new(dir.path().join("saved.json"));
        assert_eq!(
            store.delete("alice", "Tacos").unwrap(),
            "Recipe 'Tacos' not found."
        );
    }

    #[test]
    fn test_corrupt_file_reads_as_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("saved.json");
        fs::write(&path, "not json").unwrap();
        let store = SavedRecipeStore::new(&path);
        assert_eq!(store.render("alice"), "No recipes found.");
        assert!(store.list("alice").is_empty());
    }

    #[test]
    fn test_corrupt_file_is_not_overwritten() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("saved.json");
        let contents = r#"{"bob": [{"name": "Tacos", "ingredients": []"#;
        fs::write(&path, contents).unwrap();
        let store = SavedRecipeStore::new(&path);

        assert!(matches!(
            store.save("alice", &pizza()),
            Err(MatchError::Json(_))
        ));
        assert!(matches!(
            store.delete("bob", "Tacos"),
            Err(MatchError::Json(_))
        ));
        assert_eq!(fs::read_to_string(&path).unwrap(), contents);
    }

    #[test]
    fn test_reads_instructions_field() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("saved.json");
        fs::write(
            &path,
            r#"{"bob": [{"name": "Tacos", "url": "https://v.example/t",
                 "ingredients": ["tortillas"], "instructions": ["Fill"], "source": "Tasty"}]}"#,
        )
        .unwrap();
        let store = SavedRecipeStore::new(&path);
        let saved = store.list("bob");
        assert_eq!(saved[0].steps, vec!["Fill"]);
        assert_eq!(saved[0].source, Source::Tasty);
    }

    #[test]
    fn test_format_recipe() {
        let mut recipe = pizza();
        recipe.url = None;
        let text = format_recipe(&recipe);
        assert_eq!(
            text,
            "Name: Pizza\nSource: BBC Goodfood\nURL: URL not available\nIngredients:\n - flour\n - cheese\nSteps:\nBake it\n"
        );
    }
}
