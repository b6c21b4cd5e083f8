//! Markdown rendering for extracted payloads.
//!
//! Every formatter is a pure function of its input and never fails: missing
//! optional fields drop their subsection instead of rendering a placeholder.

use serde_json::Value;

use crate::types::{
    DayMeals, EnhancementReply, ExtractedRecipe, IngredientLine, MealPlanReply, NutritionReply,
    SubstitutionReply,
};

/// Render a single generated recipe as a card.
pub fn recipe_card(recipe: &ExtractedRecipe) -> String {
    let mut out = format!(
        "Here's your recipe for **{}**!\n\n",
        recipe.title.as_deref().unwrap_or_default()
    );

    if let Some(description) = &recipe.description {
        out.push_str(description);
        out.push_str("\n\n");
    }

    let mut meta = Vec::new();
    if let Some(cuisine) = &recipe.cuisine {
        meta.push(format!("**Cuisine:** {}", cuisine));
    }
    if let Some(difficulty) = &recipe.difficulty {
        meta.push(format!("**Difficulty:** {}", difficulty));
    }
    if !meta.is_empty() {
        out.push_str(&meta.join(" | "));
        out.push('\n');
    }

    let mut timing = Vec::new();
    if let Some(prep) = &recipe.prep_time {
        timing.push(format!("**Prep:** {}min", prep));
    }
    if let Some(cook) = &recipe.cook_time {
        timing.push(format!("**Cook:** {}min", cook));
    }
    if let Some(servings) = &recipe.servings {
        timing.push(format!("**Servings:** {}", servings));
    }
    if !timing.is_empty() {
        out.push_str(&timing.join(" | "));
        out.push('\n');
    }
    out.push('\n');

    if let Some(ingredients) = &recipe.ingredients {
        out.push_str("**Ingredients:**\n");
        for line in ingredients {
            out.push_str(&ingredient_line(line));
            out.push('\n');
        }
        out.push('\n');
    }

    if let Some(instructions) = &recipe.instructions {
        out.push_str("**Instructions:**\n");
        for (i, step) in instructions.iter().enumerate() {
            out.push_str(&format!("{}. {}\n", i + 1, step));
        }
    }

    out.trim_end().to_string()
}

fn ingredient_line(line: &IngredientLine) -> String {
    match (&line.amount, &line.item) {
        (Some(amount), Some(item)) => format!("- {} {}", amount, item),
        (Some(amount), None) => format!("- {}", amount),
        (None, Some(item)) => format!("- {}", item),
        (None, None) => "-".to_string(),
    }
}

/// Render a list of suggested recipes with a count header.
pub fn recipe_list(recipes: &[ExtractedRecipe]) -> String {
    let mut out = format!("I found **{} recipes** you can make!\n\n", recipes.len());

    for (idx, recipe) in recipes.iter().enumerate() {
        out.push_str(&format!(
            "### {}. {}\n",
            idx + 1,
            recipe.title.as_deref().unwrap_or_default()
        ));
        if let Some(description) = &recipe.description {
            out.push_str(description);
            out.push('\n');
        }

        let mut meta = Vec::new();
        if let Some(cuisine) = &recipe.cuisine {
            meta.push(format!("**{}**", cuisine));
        }
        if let Some(difficulty) = &recipe.difficulty {
            meta.push(format!("**{}**", difficulty));
        }
        if let (Some(prep), Some(cook)) = (&recipe.prep_time, &recipe.cook_time) {
            meta.push(format!("{}+{}min", prep, cook));
        }
        if !meta.is_empty() {
            out.push_str(&meta.join(" | "));
            out.push('\n');
        }
        out.push('\n');
    }

    out.push_str("Click **Save** on any recipe to add it to your collection.");
    out
}

/// Render ingredient substitutions as a bulleted list.
pub fn substitutions(reply: &SubstitutionReply) -> String {
    let mut out = match &reply.original {
        Some(original) => format!("**Substitutes for {}:**\n\n", original),
        None => "**Substitutes:**\n\n".to_string(),
    };

    for substitute in reply.substitutes.as_deref().unwrap_or_default() {
        match (&substitute.ingredient, &substitute.amount) {
            (Some(ingredient), Some(amount)) => {
                out.push_str(&format!("- **{}** ({})\n", ingredient, amount));
            }
            (Some(ingredient), None) => {
                out.push_str(&format!("- **{}**\n", ingredient));
            }
            _ => continue,
        }
        if let Some(notes) = &substitute.notes {
            out.push_str(&format!("  {}\n", notes));
        }
        out.push('\n');
    }

    out.trim_end().to_string()
}

/// Render per-serving nutrition as a markdown table.
pub fn nutrition(reply: &NutritionReply) -> String {
    let mut out = "**Nutritional Info (per serving):**\n\n".to_string();
    out.push_str("| Nutrient | Amount |\n|----------|--------|\n");

    for (key, value) in reply.per_serving.as_ref().into_iter().flatten() {
        out.push_str(&format!(
            "| {} | {} |\n",
            capitalize(key),
            display_value(value)
        ));
    }

    if let Some(notes) = &reply.notes {
        out.push('\n');
        out.push_str(notes);
    }

    out
}

/// Render a weekly meal plan, day by day in the model's order.
pub fn meal_plan(reply: &MealPlanReply) -> String {
    let mut out = "**Your Weekly Meal Plan:**\n\n".to_string();

    for (day, meals) in reply.plan.as_ref().into_iter().flatten() {
        let meals: DayMeals = serde_json::from_value(meals.clone()).unwrap_or_default();

        out.push_str(&format!("**{}:**\n", day));
        if let Some(breakfast) = &meals.breakfast {
            out.push_str(&format!("- Breakfast: {}\n", breakfast));
        }
        if let Some(lunch) = &meals.lunch {
            out.push_str(&format!("- Lunch: {}\n", lunch));
        }
        if let Some(dinner) = &meals.dinner {
            out.push_str(&format!("- Dinner: {}\n", dinner));
        }
        out.push('\n');
    }

    if let Some(shopping_list) = &reply.shopping_list {
        out.push_str("**Shopping List:**\n");
        for item in shopping_list {
            out.push_str(&format!("- {}\n", item));
        }
        out.push('\n');
    }

    if let Some(notes) = &reply.notes {
        out.push_str(&format!("**Tips:** {}", notes));
    }

    out.trim_end().to_string()
}

/// Render enhancement suggestions; each absent section is omitted entirely.
pub fn enhancements(reply: &EnhancementReply) -> String {
    let mut out = "**Recipe Enhancement Suggestions:**\n\n".to_string();

    if let Some(suggestions) = &reply.suggestions {
        out.push_str("**Suggestions:**\n");
        for suggestion in suggestions {
            out.push_str(&format!("- {}\n", suggestion));
        }
        out.push('\n');
    }

    if let Some(variations) = &reply.variations {
        out.push_str("**Variations:**\n");
        for variation in variations {
            match (&variation.name, &variation.changes) {
                (Some(name), Some(changes)) => {
                    out.push_str(&format!("- **{}:** {}\n", name, changes));
                }
                (Some(name), None) => {
                    out.push_str(&format!("- **{}**\n", name));
                }
                (None, Some(changes)) => {
                    out.push_str(&format!("- {}\n", changes));
                }
                (None, None) => {}
            }
        }
        out.push('\n');
    }

    if let Some(tips) = &reply.tips {
        out.push_str("**Pro Tips:**\n");
        for tip in tips {
            out.push_str(&format!("- {}\n", tip));
        }
    }

    out.trim_end().to_string()
}

/// Uppercase the first character, leaving the rest alone ("calories" ->
/// "Calories", "vitamin C" -> "Vitamin C").
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Display a JSON value bare: strings without quotes, numbers as written.
fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
