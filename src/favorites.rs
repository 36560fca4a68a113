use tracing::debug;

use crate::recipe::{Recipe, RecipeId};

/// Saved recipes, unique by id, in the order they were saved.
#[derive(Debug, Clone, Default)]
pub struct Favorites {
    recipes: Vec<Recipe>,
}

impl Favorites {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    pub fn is_favorite(&self, id: &RecipeId) -> bool {
        self.recipes.iter().any(|recipe| &recipe.id == id)
    }

    pub fn get(&self, id: &RecipeId) -> Option<&Recipe> {
        self.recipes.iter().find(|recipe| &recipe.id == id)
    }

    /// Flips membership. Returns true when the recipe is now a favorite.
    pub fn toggle(&mut self, recipe: &Recipe) -> bool {
        if self.is_favorite(&recipe.id) {
            self.recipes.retain(|saved| saved.id != recipe.id);
            debug!(recipe_id = %recipe.id, "favorite removed");
            false
        } else {
            self.recipes.push(recipe.clone());
            debug!(recipe_id = %recipe.id, "favorite added");
            true
        }
    }

    pub(crate) fn set_image(&mut self, id: &RecipeId, image_url: &str) -> usize {
        let mut patched = 0;
        for recipe in self.recipes.iter_mut().filter(|recipe| &recipe.id == id) {
            recipe.image_url = image_url.to_string();
            patched += 1;
        }
        patched
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipe::Nutrition;

    fn recipe(id: &str) -> Recipe {
        Recipe {
            id: RecipeId::new(id),
            name: format!("Recipe {id}"),
            description: String::new(),
            instructions: String::new(),
            required_ingredients: Vec::new(),
            image_url: format!("https://img.invalid/{id}"),
            nutrition: Nutrition::default(),
        }
    }

    #[test]
    fn test_toggle_flips_membership() {
        let mut favorites = Favorites::new();
        let dal = recipe("dal");
        assert!(favorites.toggle(&dal));
        assert!(favorites.is_favorite(&dal.id));
        assert!(!favorites.toggle(&dal));
        assert!(!favorites.is_favorite(&dal.id));
        assert!(favorites.is_empty());
    }

    #[test]
    fn test_toggle_twice_is_identity_for_other_entries() {
        let mut favorites = Favorites::new();
        favorites.toggle(&recipe("a"));
        favorites.toggle(&recipe("b"));
        favorites.toggle(&recipe("b"));
        let ids: Vec<&str> = favorites.recipes().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["a"]);
    }

    #[test]
    fn test_set_image_only_touches_matching_id() {
        let mut favorites = Favorites::new();
        favorites.toggle(&recipe("a"));
        favorites.toggle(&recipe("b"));
        assert_eq!(favorites.set_image(&RecipeId::new("a"), "data:new"), 1);
        assert_eq!(favorites.get(&RecipeId::new("a")).map(|r| r.image_url.as_str()), Some("data:new"));
        assert_eq!(
            favorites.get(&RecipeId::new("b")).map(|r| r.image_url.as_str()),
            Some("https://img.invalid/b")
        );
    }
}
