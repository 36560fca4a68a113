//! Session-scoped state owner.
//!
//! Every collection the UI reads lives here. Pantry and meal-plan mutations
//! that change something notify the registered observers, the shopping-list
//! reconciler first.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::SessionConfig;
use crate::favorites::Favorites;
use crate::generator::{GenerationError, GenerationRequest, RecipeGenerator, SearchFilters};
use crate::image_capture::ImageRef;
use crate::matcher;
use crate::meal_plan::{MealId, MealPlan};
use crate::pantry::{Pantry, PantryError};
use crate::recipe::{Recipe, RecipeEntry, RecipeId};
use crate::shopping_list::{Reconciler, ShoppingList};

/// Placeholder identity. Gates nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
}

/// Told about every pantry or meal-plan change.
pub trait StoreObserver {
    fn on_stores_changed(&mut self, pantry: &Pantry, plan: &MealPlan);
}

#[derive(Debug, Default)]
pub struct SearchState {
    in_progress: bool,
    results: Vec<RecipeEntry>,
    error: Option<String>,
}

impl SearchState {
    pub fn in_progress(&self) -> bool {
        self.in_progress
    }

    /// Ranked best match first.
    pub fn results(&self) -> &[RecipeEntry] {
        &self.results
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Already searching, or nothing in the pantry to search with.
    Suppressed,
    Found(usize),
    Failed,
}

/// How many copies an image update touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImageUpdate {
    pub favorites: usize,
    pub planned_meals: usize,
    pub selection: bool,
}

/// What the profile view shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Profile<'a> {
    pub user: Option<&'a User>,
    pub pantry_items: usize,
    pub favorites: usize,
    pub planned_meals: usize,
}

pub struct Session {
    user: Option<User>,
    pantry: Pantry,
    favorites: Favorites,
    meal_plan: MealPlan,
    reconciler: Reconciler,
    observers: Vec<Box<dyn StoreObserver>>,
    selected: Option<RecipeEntry>,
    search: SearchState,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

impl Session {
    pub fn new(config: SessionConfig) -> Self {
        let pantry = Pantry::seeded(&config.seed_pantry);
        let meal_plan = MealPlan::new();
        let mut reconciler = Reconciler::default();
        reconciler.refresh(&pantry, &meal_plan);
        info!(pantry_items = pantry.len(), "session started");
        Self {
            user: config.user,
            pantry,
            favorites: Favorites::new(),
            meal_plan,
            reconciler,
            observers: Vec::new(),
            selected: None,
            search: SearchState::default(),
        }
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn login(&mut self, user: User) {
        info!(user_id = %user.id, "login");
        self.user = Some(user);
    }

    pub fn logout(&mut self) {
        info!("logout");
        self.user = None;
        self.selected = None;
    }

    pub fn profile(&self) -> Profile<'_> {
        Profile {
            user: self.user.as_ref(),
            pantry_items: self.pantry.len(),
            favorites: self.favorites.len(),
            planned_meals: self.meal_plan.len(),
        }
    }

    pub fn pantry(&self) -> &Pantry {
        &self.pantry
    }

    pub fn favorites(&self) -> &Favorites {
        &self.favorites
    }

    pub fn meal_plan(&self) -> &MealPlan {
        &self.meal_plan
    }

    pub fn shopping_list(&self) -> &ShoppingList {
        self.reconciler.shopping_list()
    }

    pub fn search(&self) -> &SearchState {
        &self.search
    }

    pub fn selected(&self) -> Option<&RecipeEntry> {
        self.selected.as_ref()
    }

    /// Observers run after the shopping list has been recomputed.
    pub fn register_observer(&mut self, observer: Box<dyn StoreObserver>) {
        self.observers.push(observer);
    }

    fn stores_changed(&mut self) {
        self.reconciler.on_stores_changed(&self.pantry, &self.meal_plan);
        for observer in self.observers.iter_mut() {
            observer.on_stores_changed(&self.pantry, &self.meal_plan);
        }
    }

    pub fn add_pantry_item(&mut self, name: &str) -> bool {
        let changed = self.pantry.add(name);
        if changed {
            self.stores_changed();
        }
        changed
    }

    pub fn remove_pantry_item(&mut self, name: &str) -> bool {
        let changed = self.pantry.remove(name);
        if changed {
            self.stores_changed();
        }
        changed
    }

    pub fn rename_pantry_item(&mut self, old: &str, new: &str) -> Result<bool, PantryError> {
        let changed = self.pantry.rename(old, new)?;
        if changed {
            self.stores_changed();
        }
        Ok(changed)
    }

    pub fn plan_meal(&mut self, recipe: Recipe, date: NaiveDate) -> MealId {
        let id = self.meal_plan.add(recipe, date);
        self.stores_changed();
        id
    }

    pub fn unplan_meal(&mut self, id: MealId) -> bool {
        let changed = self.meal_plan.remove(id);
        if changed {
            self.stores_changed();
        }
        changed
    }

    /// Manual recompute; same result the automatic path produces.
    pub fn refresh_shopping_list(&mut self) -> &ShoppingList {
        self.reconciler.refresh(&self.pantry, &self.meal_plan)
    }

    pub fn toggle_favorite(&mut self, recipe: &Recipe) -> bool {
        self.favorites.toggle(recipe)
    }

    pub fn is_favorite(&self, id: &RecipeId) -> bool {
        self.favorites.is_favorite(id)
    }

    pub fn select(&mut self, entry: RecipeEntry) {
        debug!(recipe_id = %entry.recipe().id, "recipe selected");
        self.selected = Some(entry);
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn select_search_result(&mut self, index: usize) -> bool {
        match self.search.results.get(index).cloned() {
            Some(entry) => {
                self.select(entry);
                true
            }
            None => false,
        }
    }

    pub fn select_favorite(&mut self, id: &RecipeId) -> bool {
        match self.favorites.get(id).cloned() {
            Some(recipe) => {
                self.select(RecipeEntry::Unscored(recipe));
                true
            }
            None => false,
        }
    }

    pub fn select_meal(&mut self, id: MealId) -> bool {
        match self.meal_plan.get(id).map(|meal| meal.recipe.clone()) {
            Some(recipe) => {
                self.select(RecipeEntry::Unscored(recipe));
                true
            }
            None => false,
        }
    }

    /// Points every favorite, planned meal and the selection carrying
    /// `recipe_id` at `image_url`. Nothing else changes.
    pub fn update_recipe_image(&mut self, recipe_id: &RecipeId, image_url: &str) -> ImageUpdate {
        let favorites = self.favorites.set_image(recipe_id, image_url);
        let planned_meals = self.meal_plan.set_image(recipe_id, image_url);
        let selection = match self.selected.as_mut() {
            Some(entry) if &entry.recipe().id == recipe_id => {
                entry.recipe_mut().image_url = image_url.to_string();
                true
            }
            _ => false,
        };
        let update = ImageUpdate {
            favorites,
            planned_meals,
            selection,
        };
        debug!(%recipe_id, ?update, "recipe image replaced");
        update
    }

    pub fn replace_selected_image(&mut self, image: &ImageRef) -> Option<ImageUpdate> {
        let recipe_id = self.selected.as_ref()?.recipe().id.clone();
        Some(self.update_recipe_image(&recipe_id, image.as_str()))
    }

    /// Starts a search unless one is running or the pantry is empty. Clears
    /// previous results and error.
    pub fn begin_search(&mut self, filters: SearchFilters) -> Option<GenerationRequest> {
        if self.search.in_progress {
            debug!("search already in progress");
            return None;
        }
        if self.pantry.is_empty() {
            debug!("search skipped, pantry is empty");
            return None;
        }
        self.search = SearchState {
            in_progress: true,
            ..SearchState::default()
        };
        Some(GenerationRequest {
            pantry_items: self.pantry.items().to_vec(),
            filters,
        })
    }

    /// Scores a successful batch against the current pantry. A failure keeps
    /// only its message.
    pub fn finish_search(&mut self, result: Result<Vec<Recipe>, GenerationError>) -> SearchOutcome {
        self.search.in_progress = false;
        match result {
            Ok(recipes) => {
                self.search.results = matcher::rank(recipes, &self.pantry);
                self.search.error = None;
                SearchOutcome::Found(self.search.results.len())
            }
            Err(e) => {
                warn!(error = %e, "recipe generation failed");
                self.search.results.clear();
                self.search.error = Some(e.to_string());
                SearchOutcome::Failed
            }
        }
    }

    pub async fn find_recipes(
        &mut self,
        generator: &dyn RecipeGenerator,
        filters: SearchFilters,
    ) -> SearchOutcome {
        let Some(request) = self.begin_search(filters) else {
            return SearchOutcome::Suppressed;
        };
        let result = generator.generate(&request).await;
        self.finish_search(result)
    }
}
