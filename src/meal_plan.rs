use std::fmt;
use std::str::FromStr;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::recipe::{Recipe, RecipeId};

/// Identity of a planned meal, independent of the recipe it holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MealId(Uuid);

impl MealId {
    fn mint() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for MealId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for MealId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(Self)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedMeal {
    pub id: MealId,
    /// Full copy of the recipe at planning time.
    pub recipe: Recipe,
    pub date: NaiveDate,
}

/// One calendar day of the meal plan.
#[derive(Debug, Clone)]
pub struct DayPlan<'a> {
    pub date: NaiveDate,
    pub meals: Vec<&'a PlannedMeal>,
}

#[derive(Debug, Clone, Default)]
pub struct MealPlan {
    meals: Vec<PlannedMeal>,
}

impl MealPlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn meals(&self) -> &[PlannedMeal] {
        &self.meals
    }

    pub fn len(&self) -> usize {
        self.meals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meals.is_empty()
    }

    pub fn get(&self, id: MealId) -> Option<&PlannedMeal> {
        self.meals.iter().find(|meal| meal.id == id)
    }

    pub fn add(&mut self, recipe: Recipe, date: NaiveDate) -> MealId {
        let id = MealId::mint();
        debug!(meal_id = %id, recipe_id = %recipe.id, %date, "meal planned");
        self.meals.push(PlannedMeal { id, recipe, date });
        id
    }

    /// Returns whether a meal was removed.
    pub fn remove(&mut self, id: MealId) -> bool {
        let before = self.meals.len();
        self.meals.retain(|meal| meal.id != id);
        let removed = self.meals.len() != before;
        debug!(meal_id = %id, removed, "meal unplanned");
        removed
    }

    /// Meals on `date`, ordered by recipe name ignoring case.
    pub fn meals_on(&self, date: NaiveDate) -> Vec<&PlannedMeal> {
        let mut meals: Vec<&PlannedMeal> =
            self.meals.iter().filter(|meal| meal.date == date).collect();
        meals.sort_by_cached_key(|meal| meal.recipe.name.to_lowercase());
        meals
    }

    /// Seven consecutive days starting at `start`.
    pub fn week_from(&self, start: NaiveDate) -> Vec<DayPlan<'_>> {
        (0..7u64)
            .filter_map(|offset| start.checked_add_days(Days::new(offset)))
            .map(|date| DayPlan {
                date,
                meals: self.meals_on(date),
            })
            .collect()
    }

    pub(crate) fn set_image(&mut self, id: &RecipeId, image_url: &str) -> usize {
        let mut patched = 0;
        for meal in self.meals.iter_mut().filter(|meal| &meal.recipe.id == id) {
            meal.recipe.image_url = image_url.to_string();
            patched += 1;
        }
        patched
    }
}
