use std::collections::HashSet;

use crate::ingredient::normalize;
use crate::pantry::Pantry;
use crate::recipe::{Recipe, RecipeEntry};

/// Percentage (0-100) of a recipe's distinct required ingredients already in
/// the pantry. A recipe that needs nothing is a full match.
///
/// A blank name still counts as a requirement. The pantry never holds one,
/// so it is never matched.
pub fn score(recipe: &Recipe, pantry: &Pantry) -> f64 {
    let required: HashSet<String> = recipe
        .required_ingredients
        .iter()
        .map(|ingredient| normalize(ingredient))
        .collect();

    if required.is_empty() {
        return 100.0;
    }

    let in_stock = pantry.normalized();
    let matched = required
        .iter()
        .filter(|ingredient| in_stock.contains(*ingredient))
        .count();

    matched as f64 / required.len() as f64 * 100.0
}

/// Scores a freshly generated batch and orders it best match first. Equal
/// scores keep their generation order.
pub fn rank(recipes: Vec<Recipe>, pantry: &Pantry) -> Vec<RecipeEntry> {
    let mut scored: Vec<RecipeEntry> = recipes
        .into_iter()
        .map(|recipe| {
            let match_percentage = score(&recipe, pantry);
            RecipeEntry::Scored {
                recipe,
                match_percentage,
            }
        })
        .collect();

    scored.sort_by(|a, b| {
        let a = a.match_percentage().unwrap_or(0.0);
        let b = b.match_percentage().unwrap_or(0.0);
        b.total_cmp(&a)
    });
    scored
}
