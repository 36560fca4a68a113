use super::endpoints::{JsonSchema, JsonSchemaDefinition};
use super::GenerationRequest;

pub fn build_prompt(request: &GenerationRequest, recipe_count: u32) -> String {
    let mut prompt = format!(
        "You are a creative chef specializing in Indian vegetarian cuisine.\n\
         Based on the ingredients I have in my pantry: [{}].\n",
        request.pantry_items.join(", ")
    );

    if let Some(cuisine) = request.filters.cuisine.name() {
        prompt.push_str(&format!("The recipe must be {cuisine} style.\n"));
    }
    if let Some(diet) = request.filters.diet.name() {
        prompt.push_str(&format!("The recipe must adhere to a {diet} diet.\n"));
    }

    prompt.push_str(&format!(
        "Generate {recipe_count} unique and delicious Indian vegetarian recipes that I can make.\n\
         Prioritize recipes that heavily use the ingredients I already have.\n\
         For each recipe, provide all the required details as per the specified JSON schema.\n\
         Ensure the instructions are clear and easy to follow.\n\
         Respond only with a JSON object of the form {{\"recipes\": [...]}}.\n"
    ));
    prompt
}

pub fn recipe_batch_schema() -> JsonSchemaDefinition {
    let recipe = JsonSchema::object(vec![
        ("name", JsonSchema::scalar("string", "The name of the recipe.")),
        (
            "description",
            JsonSchema::scalar("string", "A brief, enticing description of the dish."),
        ),
        (
            "instructions",
            JsonSchema::scalar(
                "string",
                "Step-by-step cooking instructions. Use newline characters for steps.",
            ),
        ),
        (
            "requiredIngredients",
            JsonSchema::array(
                JsonSchema {
                    schema_type: "string".to_string(),
                    ..Default::default()
                },
                Some("A list of all ingredients required for the recipe."),
            ),
        ),
        (
            "totalCalories",
            JsonSchema::scalar("number", "Estimated total calories for the dish."),
        ),
        ("totalFat", JsonSchema::scalar("number", "Estimated total fat in grams.")),
        (
            "totalCarbs",
            JsonSchema::scalar("number", "Estimated total carbohydrates in grams."),
        ),
        (
            "totalProtein",
            JsonSchema::scalar("number", "Estimated total protein in grams."),
        ),
    ]);

    JsonSchemaDefinition {
        name: "recipe_batch".to_string(),
        strict: Some(true),
        schema: JsonSchema::object(vec![("recipes", JsonSchema::array(recipe, None))]),
    }
}
