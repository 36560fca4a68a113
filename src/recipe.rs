use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque recipe identity, unique within a generation batch.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecipeId(String);

impl RecipeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Whole-dish nutrition totals. Values are never negative.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
pub struct Nutrition {
    pub calories: f64,
    pub fat_g: f64,
    pub carbs_g: f64,
    pub protein_g: f64,
}

impl Nutrition {
    pub fn new(calories: f64, fat_g: f64, carbs_g: f64, protein_g: f64) -> Self {
        Self {
            calories: clamp_non_negative(calories),
            fat_g: clamp_non_negative(fat_g),
            carbs_g: clamp_non_negative(carbs_g),
            protein_g: clamp_non_negative(protein_g),
        }
    }
}

fn clamp_non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Recipe {
    pub id: RecipeId,
    pub name: String,
    pub description: String,
    /// Newline-delimited steps.
    pub instructions: String,
    pub required_ingredients: Vec<String>,
    pub image_url: String,
    pub nutrition: Nutrition,
}

impl Recipe {
    pub fn steps(&self) -> impl Iterator<Item = &str> {
        self.instructions
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
    }
}

/// A recipe as the UI sees it: either ranked by a pantry search or reached
/// some other way (favorites, meal plan).
#[derive(Debug, Clone, PartialEq)]
pub enum RecipeEntry {
    Scored {
        recipe: Recipe,
        match_percentage: f64,
    },
    Unscored(Recipe),
}

impl RecipeEntry {
    pub fn recipe(&self) -> &Recipe {
        match self {
            RecipeEntry::Scored { recipe, .. } => recipe,
            RecipeEntry::Unscored(recipe) => recipe,
        }
    }

    pub fn recipe_mut(&mut self) -> &mut Recipe {
        match self {
            RecipeEntry::Scored { recipe, .. } => recipe,
            RecipeEntry::Unscored(recipe) => recipe,
        }
    }

    pub fn match_percentage(&self) -> Option<f64> {
        match self {
            RecipeEntry::Scored {
                match_percentage, ..
            } => Some(*match_percentage),
            RecipeEntry::Unscored(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Recipe {
        Recipe {
            id: RecipeId::new("batch-0"),
            name: "Jeera Rice".to_string(),
            description: "Cumin-scented rice".to_string(),
            instructions: "Rinse the rice.\n\n  Temper cumin in ghee.\nSimmer covered.".to_string(),
            required_ingredients: vec!["rice".to_string(), "cumin".to_string()],
            image_url: "https://example.invalid/rice.png".to_string(),
            nutrition: Nutrition::new(420.0, 9.0, 80.0, 8.0),
        }
    }

    #[test]
    fn test_steps_skip_blank_lines() {
        let recipe = sample();
        let steps: Vec<&str> = recipe.steps().collect();
        assert_eq!(
            steps,
            vec!["Rinse the rice.", "Temper cumin in ghee.", "Simmer covered."]
        );
    }

    #[test]
    fn test_nutrition_clamps_negative_and_nan() {
        let nutrition = Nutrition::new(-5.0, f64::NAN, 12.5, 3.0);
        assert_eq!(nutrition.calories, 0.0);
        assert_eq!(nutrition.fat_g, 0.0);
        assert_eq!(nutrition.carbs_g, 12.5);
        assert_eq!(nutrition.protein_g, 3.0);
    }

    #[test]
    fn test_entry_variants_expose_match_percentage() {
        let scored = RecipeEntry::Scored {
            recipe: sample(),
            match_percentage: 50.0,
        };
        let unscored = RecipeEntry::Unscored(sample());
        assert_eq!(scored.match_percentage(), Some(50.0));
        assert_eq!(unscored.match_percentage(), None);
        assert_eq!(scored.recipe(), unscored.recipe());
    }
}
