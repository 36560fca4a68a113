use serde::Deserialize;
use tracing::{debug, warn};

use super::connection::ApiConnectionError;
use crate::recipe::{Nutrition, Recipe, RecipeId};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeneratedRecipe {
    name: String,
    description: String,
    instructions: String,
    required_ingredients: Vec<String>,
    total_calories: f64,
    total_fat: f64,
    total_carbs: f64,
    total_protein: f64,
}

#[derive(Debug, Deserialize)]
struct GeneratedBatch {
    #[serde(default)]
    recipes: Option<Vec<GeneratedRecipe>>,
}

/// Models often wrap JSON in a markdown fence despite being told not to.
pub fn strip_code_fences(content: &str) -> &str {
    let trimmed = content.trim();
    if !trimmed.ends_with("```") {
        return trimmed;
    }
    let body = if let Some(rest) = trimmed.strip_prefix("```json") {
        rest
    } else if let Some(rest) = trimmed.strip_prefix("```") {
        rest
    } else {
        return trimmed;
    };
    body.trim_end_matches("```").trim()
}

/// Characters a URI component may carry unescaped beyond the unreserved set.
const URI_COMPONENT_MARKS: [(&str, &str); 5] = [
    ("%21", "!"),
    ("%27", "'"),
    ("%28", "("),
    ("%29", ")"),
    ("%2A", "*"),
];

pub fn placeholder_image_url(name: &str) -> String {
    let mut seed = urlencoding::encode(name).into_owned();
    for (escaped, mark) in URI_COMPONENT_MARKS {
        seed = seed.replace(escaped, mark);
    }
    format!("https://picsum.photos/seed/{seed}/500/300")
}

/// Turns model output into recipes with ids `"{batch}-{index}"`.
pub fn decode_recipes(content: &str, batch: &str) -> Result<Vec<Recipe>, ApiConnectionError> {
    let json = strip_code_fences(content);
    if json.is_empty() {
        return Err(ApiConnectionError::EmptyContent);
    }

    let parsed: GeneratedBatch = serde_json::from_str(json).map_err(|e| {
        debug!(error = %e, content = json, "failed to deserialize recipe batch");
        e
    })?;

    let Some(generated) = parsed.recipes else {
        warn!("recipe batch has no `recipes` field");
        return Ok(Vec::new());
    };

    Ok(generated
        .into_iter()
        .enumerate()
        .map(|(index, recipe)| Recipe {
            id: RecipeId::new(format!("{batch}-{index}")),
            image_url: placeholder_image_url(&recipe.name),
            name: recipe.name,
            description: recipe.description,
            instructions: recipe.instructions,
            required_ingredients: recipe.required_ingredients,
            nutrition: Nutrition::new(
                recipe.total_calories,
                recipe.total_fat,
                recipe.total_carbs,
                recipe.total_protein,
            ),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    const BATCH: &str = r#"{"recipes":[
        {"name":"Masoor Dal","description":"Red lentil stew","instructions":"Rinse lentils.\nBoil.\nTemper.",
         "requiredIngredients":["lentils","onions","turmeric powder"],
         "totalCalories":520,"totalFat":12.5,"totalCarbs":70,"totalProtein":28},
        {"name":"Aloo Jeera","description":"Cumin potatoes","instructions":"Boil potatoes.\nFry with cumin.",
         "requiredIngredients":["potatoes","cumin"],
         "totalCalories":-1,"totalFat":9,"totalCarbs":45,"totalProtein":5}
    ]}"#;

    #[test]
    fn test_strip_code_fences() {
        assert_eq!(strip_code_fences("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fences("```\n{}\n```"), "{}");
        assert_eq!(strip_code_fences("  {}  "), "{}");
        assert_eq!(strip_code_fences("```json {} "), "```json {}");
    }

    #[test]
    fn test_decode_mints_ids_and_placeholder_images() {
        let recipes = decode_recipes(BATCH, "b1").unwrap();
        assert_eq!(recipes.len(), 2);
        assert_eq!(recipes[0].id.as_str(), "b1-0");
        assert_eq!(recipes[1].id.as_str(), "b1-1");
        assert_eq!(
            recipes[0].image_url,
            "https://picsum.photos/seed/Masoor%20Dal/500/300"
        );
        assert_eq!(recipes[0].nutrition.fat_g, 12.5);
        assert_eq!(recipes[1].nutrition.calories, 0.0);
    }

    #[test]
    fn test_placeholder_seed_keeps_uri_component_marks() {
        assert_eq!(
            placeholder_image_url("Aloo (Dry)"),
            "https://picsum.photos/seed/Aloo%20(Dry)/500/300"
        );
        assert_eq!(
            placeholder_image_url("Mom's Rajma!*"),
            "https://picsum.photos/seed/Mom's%20Rajma!*/500/300"
        );
        assert_eq!(
            placeholder_image_url("50% Dal & Rice"),
            "https://picsum.photos/seed/50%25%20Dal%20%26%20Rice/500/300"
        );
    }

    #[test]
    fn test_decode_fenced_content() {
        let fenced = format!("```json\n{BATCH}\n```");
        assert_eq!(decode_recipes(&fenced, "b2").unwrap().len(), 2);
    }

    #[test]
    fn test_missing_recipes_field_is_empty_batch() {
        assert!(decode_recipes("{\"dishes\": []}", "b3").unwrap().is_empty());
    }

    #[test]
    fn test_empty_and_malformed_content_are_errors() {
        assert!(matches!(
            decode_recipes("```json\n```", "b4"),
            Err(ApiConnectionError::EmptyContent)
        ));
        assert!(matches!(
            decode_recipes("not json", "b4"),
            Err(ApiConnectionError::SerializationError(_))
        ));
    }
}
