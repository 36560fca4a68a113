use std::collections::HashSet;

use serde::Serialize;
use tracing::debug;

use crate::ingredient::normalize;
use crate::meal_plan::MealPlan;
use crate::pantry::Pantry;
use crate::session::StoreObserver;

/// Ingredients needed by planned meals but missing from the pantry.
///
/// Items are normalized and unique, in first-required order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ShoppingList {
    items: Vec<String>,
}

impl ShoppingList {
    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        let key = normalize(name);
        self.items.iter().any(|item| *item == key)
    }

    /// Alphabetical copy for display.
    pub fn sorted(&self) -> Vec<String> {
        let mut items = self.items.clone();
        items.sort();
        items
    }
}

/// Required-minus-available. Total and side-effect free.
pub fn recompute(pantry: &Pantry, plan: &MealPlan) -> ShoppingList {
    let in_stock = pantry.normalized();
    let mut seen = HashSet::new();
    let mut items = Vec::new();

    for meal in plan.meals() {
        for ingredient in &meal.recipe.required_ingredients {
            let key = normalize(ingredient);
            // Nothing to buy for a blank name.
            if key.is_empty() || in_stock.contains(&key) {
                continue;
            }
            if seen.insert(key.clone()) {
                items.push(key);
            }
        }
    }

    ShoppingList { items }
}

/// Keeps the shopping list in step with the pantry and meal plan.
#[derive(Debug, Default)]
pub struct Reconciler {
    current: ShoppingList,
}

impl Reconciler {
    pub fn shopping_list(&self) -> &ShoppingList {
        &self.current
    }

    pub fn refresh(&mut self, pantry: &Pantry, plan: &MealPlan) -> &ShoppingList {
        self.current = recompute(pantry, plan);
        debug!(items = self.current.len(), "shopping list recomputed");
        &self.current
    }
}

impl StoreObserver for Reconciler {
    fn on_stores_changed(&mut self, pantry: &Pantry, plan: &MealPlan) {
        self.refresh(pantry, plan);
    }
}
