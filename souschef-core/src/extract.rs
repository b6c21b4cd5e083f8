//! Structured-data extraction from raw model output.
//!
//! The model is asked for pure JSON but routinely wraps it in prose, markdown
//! fences, or nothing parseable at all. Extraction therefore never fails:
//! every miss degrades to "show the raw text, no structured data". Each
//! action's expected payload is decoded into its own serde struct, and decode
//! failure is an ordinary `None`, never an error.

use serde::de::DeserializeOwned;

use crate::action::Action;
use crate::format;
use crate::types::{
    EnhancementReply, ExtractedRecipe, MealPlanReply, NutritionReply, SubstitutionReply,
};

/// Result of running extraction on one model reply.
#[derive(Debug, Clone)]
pub struct Extraction {
    pub recipe: Option<ExtractedRecipe>,
    pub recipes: Option<Vec<ExtractedRecipe>>,
    /// What the user sees. Either a formatted rendering of the extracted
    /// payload, or the raw model text untouched.
    pub display_text: String,
}

/// The first greedy `{...}` span: first `{` through the *last* `}`.
///
/// Deliberately greedy rather than balanced. A reply containing two separate
/// JSON objects yields one span covering both, which then fails to parse and
/// falls through to raw text. That is the historical behavior of this
/// pipeline and downstream clients rely on it, so keep this primitive exact.
pub fn object_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}

/// The first greedy `[...]` span: first `[` through the last `]`.
pub fn array_span(text: &str) -> Option<&str> {
    let start = text.find('[')?;
    let end = text.rfind(']')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}

/// Locate an object span and decode it into `T`. Any miss is `None`.
fn decode_object<T: DeserializeOwned>(text: &str) -> Option<T> {
    let span = object_span(text)?;
    serde_json::from_str(span).ok()
}

/// Extract a recipe-shaped object from free-form text.
fn try_extract_recipe(text: &str) -> Option<ExtractedRecipe> {
    decode_object::<ExtractedRecipe>(text).filter(ExtractedRecipe::is_recipe_shaped)
}

/// Extract a non-empty array of recipes; validated on the first element only,
/// matching the lenient historical check.
fn try_extract_recipe_array(text: &str) -> Option<Vec<ExtractedRecipe>> {
    let span = array_span(text)?;
    let recipes: Vec<ExtractedRecipe> = serde_json::from_str(span).ok()?;
    match recipes.first() {
        Some(first) if first.is_recipe_shaped() => Some(recipes),
        _ => None,
    }
}

/// Run action-specific extraction over a raw model reply.
///
/// Dispatch is fixed by the pre-classified action; a reply that would satisfy
/// some other action's shape is never reconsidered. The one cross-shape path
/// is the final fallback: when nothing was extracted, a generic recipe probe
/// runs so that chat replies embedding a recipe JSON block remain saveable.
/// The fallback only ever populates `recipe`, never `recipes`, and leaves the
/// display text alone.
pub fn extract(action: Action, raw_text: &str) -> Extraction {
    let mut recipe: Option<ExtractedRecipe> = None;
    let mut recipes: Option<Vec<ExtractedRecipe>> = None;
    let mut display_text = raw_text.to_string();

    match action {
        Action::GenerateRecipe => {
            if let Some(extracted) = try_extract_recipe(raw_text) {
                display_text = format::recipe_card(&extracted);
                recipe = Some(extracted);
            }
        }
        Action::SuggestFromIngredients => {
            if let Some(extracted) = try_extract_recipe_array(raw_text) {
                display_text = format::recipe_list(&extracted);
                recipes = Some(extracted);
            }
        }
        Action::SubstituteIngredient => {
            if let Some(reply) = decode_object::<SubstitutionReply>(raw_text) {
                if reply.substitutes.is_some() {
                    display_text = format::substitutions(&reply);
                }
            }
        }
        Action::NutritionalInfo => {
            if let Some(reply) = decode_object::<NutritionReply>(raw_text) {
                if reply.per_serving.is_some() {
                    display_text = format::nutrition(&reply);
                }
            }
        }
        Action::MealPlan => {
            if let Some(reply) = decode_object::<MealPlanReply>(raw_text) {
                if reply.plan.is_some() {
                    display_text = format::meal_plan(&reply);
                }
            }
        }
        Action::EnhanceRecipe => {
            if let Some(reply) = decode_object::<EnhancementReply>(raw_text) {
                if reply.has_content() {
                    display_text = format::enhancements(&reply);
                }
            }
        }
        Action::GeneralChat => {}
    }

    if recipe.is_none() && recipes.is_none() {
        recipe = try_extract_recipe(raw_text);
    }

    Extraction {
        recipe,
        recipes,
        display_text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOUP: &str = r#"Intro text {"title":"Soup","ingredients":[{"amount":"1","item":"water"}],"instructions":["Boil"]} trailing"#;

    #[test]
    fn object_span_is_greedy() {
        assert_eq!(object_span("abc {1} def"), Some("{1}"));
        assert_eq!(object_span(r#"{"a":1} and {"b":2}"#), Some(r#"{"a":1} and {"b":2}"#));
        assert_eq!(object_span("no braces"), None);
        assert_eq!(object_span("} reversed {"), None);
    }

    #[test]
    fn array_span_is_greedy() {
        assert_eq!(array_span("x [1,2] y"), Some("[1,2]"));
        assert_eq!(array_span("[1] then [2]"), Some("[1] then [2]"));
        assert_eq!(array_span("nothing"), None);
    }

    #[test]
    fn generate_recipe_extracts_from_surrounding_prose() {
        let result = extract(Action::GenerateRecipe, SOUP);

        let recipe = result.recipe.expect("recipe should extract");
        assert_eq!(recipe.title.as_deref(), Some("Soup"));
        assert!(result.recipes.is_none());
        assert!(result.display_text.contains("Soup"));
        assert!(result.display_text.contains("- 1 water"));
        assert!(result.display_text.contains("1. Boil"));
    }

    #[test]
    fn text_without_braces_passes_through_unchanged() {
        let raw = "Just a friendly chat about cooking techniques.";
        for action in [
            Action::GenerateRecipe,
            Action::SuggestFromIngredients,
            Action::SubstituteIngredient,
            Action::NutritionalInfo,
            Action::MealPlan,
            Action::EnhanceRecipe,
            Action::GeneralChat,
        ] {
            let result = extract(action, raw);
            assert!(result.recipe.is_none());
            assert!(result.recipes.is_none());
            assert_eq!(result.display_text, raw);
        }
    }

    #[test]
    fn malformed_json_degrades_to_raw_text() {
        let raw = r#"Here you go: {"title": "Oops", "ingredients": [unterminated"#;
        // No closing brace at all, so no span; and with one, the parse fails.
        let result = extract(Action::GenerateRecipe, raw);
        assert!(result.recipe.is_none());
        assert_eq!(result.display_text, raw);

        let raw = r#"{"title": "Oops", "ingredients": [}"#;
        let result = extract(Action::GenerateRecipe, raw);
        assert!(result.recipe.is_none());
        assert_eq!(result.display_text, raw);
    }

    #[test]
    fn two_json_blocks_defeat_the_greedy_span() {
        // Historical behavior: the span runs from the first { to the last },
        // covering both blocks, so the parse fails and raw text wins.
        let raw = r#"{"title":"A","instructions":["x"]} or {"title":"B","instructions":["y"]}"#;
        let result = extract(Action::GenerateRecipe, raw);
        assert!(result.recipe.is_none());
        assert_eq!(result.display_text, raw);
    }

    #[test]
    fn suggestion_array_extracts_all_recipes() {
        let raw = r#"Sure! [{"title":"A","ingredients":[{"amount":"1","item":"egg"}]},{"title":"B","instructions":["Mix"]}]"#;
        let result = extract(Action::SuggestFromIngredients, raw);

        let recipes = result.recipes.expect("array should extract");
        assert_eq!(recipes.len(), 2);
        assert!(result.recipe.is_none());
        assert!(result.display_text.starts_with("I found **2 recipes**"));
    }

    #[test]
    fn suggestion_array_requires_recipe_shaped_first_element() {
        let raw = r#"[{"note":"not a recipe"},{"title":"B","instructions":["Mix"]}]"#;
        let result = extract(Action::SuggestFromIngredients, raw);
        assert!(result.recipes.is_none());
        assert_eq!(result.display_text, raw);
    }

    #[test]
    fn empty_array_is_not_a_suggestion_list() {
        let result = extract(Action::SuggestFromIngredients, "[]");
        assert!(result.recipes.is_none());
        assert_eq!(result.display_text, "[]");
    }

    #[test]
    fn suggestion_dispatch_ignores_object_shapes() {
        // The model ignored instructions and returned a single object. The
        // array extractor misses, but the final generic fallback still makes
        // the recipe saveable; `recipes` stays empty.
        let raw = r#"{"title":"Solo","ingredients":[{"amount":"2","item":"eggs"}]}"#;
        let result = extract(Action::SuggestFromIngredients, raw);
        assert!(result.recipes.is_none());
        assert!(result.recipe.is_some());
        assert_eq!(result.display_text, raw);
    }

    #[test]
    fn substitution_reply_renders_a_list() {
        let raw = r#"{"original":"butter","substitutes":[{"ingredient":"olive oil","amount":"3/4 cup","notes":"Adds a fruity note."}]}"#;
        let result = extract(Action::SubstituteIngredient, raw);

        assert!(result.display_text.contains("**Substitutes for butter:**"));
        assert!(result.display_text.contains("**olive oil** (3/4 cup)"));
        assert!(result.display_text.contains("Adds a fruity note."));
    }

    #[test]
    fn substitution_without_substitutes_key_falls_back() {
        let raw = r#"{"original":"butter"}"#;
        let result = extract(Action::SubstituteIngredient, raw);
        assert_eq!(result.display_text, raw);
    }

    #[test]
    fn nutrition_reply_renders_a_table() {
        let raw = r#"{"per_serving":{"calories":350,"protein":"20g"},"notes":"High protein."}"#;
        let result = extract(Action::NutritionalInfo, raw);

        assert!(result
            .display_text
            .starts_with("**Nutritional Info (per serving):**"));
        assert!(result.display_text.contains("| Calories | 350 |"));
        assert!(result.display_text.contains("| Protein | 20g |"));
        assert!(result.display_text.ends_with("High protein."));
    }

    #[test]
    fn nutrition_without_per_serving_key_falls_back() {
        // Brace match and decode both succeed, but the required key is
        // missing, so the raw text must come through untouched.
        let raw = r#"{"calories": 350, "protein": "20g"}"#;
        let result = extract(Action::NutritionalInfo, raw);
        assert_eq!(result.display_text, raw);
        assert!(result.recipe.is_none());
    }

    #[test]
    fn meal_plan_renders_days_in_model_order() {
        let raw = r#"{"plan":{"Saturday":{"breakfast":"pancakes","lunch":"salad","dinner":"pasta"},"Sunday":{"breakfast":"eggs","lunch":"soup","dinner":"roast"}},"shopping_list":["flour","eggs"],"notes":"Prep the sauce ahead."}"#;
        let result = extract(Action::MealPlan, raw);

        let text = &result.display_text;
        assert!(text.starts_with("**Your Weekly Meal Plan:**"));
        let saturday = text.find("**Saturday:**").unwrap();
        let sunday = text.find("**Sunday:**").unwrap();
        assert!(saturday < sunday);
        assert!(text.contains("- Breakfast: pancakes"));
        assert!(text.contains("**Shopping List:**\n- flour\n- eggs"));
        assert!(text.contains("**Tips:** Prep the sauce ahead."));
    }

    #[test]
    fn meal_plan_without_plan_key_falls_back() {
        let raw = r#"{"shopping_list":["flour"]}"#;
        let result = extract(Action::MealPlan, raw);
        assert_eq!(result.display_text, raw);
    }

    #[test]
    fn enhancement_reply_renders_present_sections_only() {
        let raw = r#"{"suggestions":["Use fresh basil"],"tips":["Salt the water"]}"#;
        let result = extract(Action::EnhanceRecipe, raw);

        let text = &result.display_text;
        assert!(text.starts_with("**Recipe Enhancement Suggestions:**"));
        assert!(text.contains("**Suggestions:**\n- Use fresh basil"));
        assert!(text.contains("**Pro Tips:**\n- Salt the water"));
        assert!(!text.contains("**Variations:**"));
    }

    #[test]
    fn enhancement_with_no_known_keys_falls_back() {
        let raw = r#"{"comment":"looks fine as is"}"#;
        let result = extract(Action::EnhanceRecipe, raw);
        assert_eq!(result.display_text, raw);
    }

    #[test]
    fn general_chat_fallback_captures_embedded_recipe() {
        let raw = "Carbonara is simple! Here's the gist:\n```json\n{\"title\":\"Carbonara\",\"ingredients\":[{\"amount\":\"200g\",\"item\":\"spaghetti\"}],\"instructions\":[\"Boil pasta\"]}\n```\nEnjoy!";
        let result = extract(Action::GeneralChat, raw);

        let recipe = result.recipe.expect("fenced recipe should extract");
        assert_eq!(recipe.title.as_deref(), Some("Carbonara"));
        // Display text stays as the conversational reply.
        assert_eq!(result.display_text, raw);
    }

    #[test]
    fn fallback_also_runs_after_successful_side_extraction() {
        // A nutrition reply is not recipe-shaped, so the fallback probe runs
        // and comes up empty; the formatted table is kept.
        let raw = r#"{"per_serving":{"calories":100}}"#;
        let result = extract(Action::NutritionalInfo, raw);
        assert!(result.recipe.is_none());
        assert!(result.display_text.contains("| Calories | 100 |"));
    }

    #[test]
    fn general_chat_without_recipe_shape_extracts_nothing() {
        let raw = r#"Fun fact: {"trivia": "tomatoes are fruit"}"#;
        let result = extract(Action::GeneralChat, raw);
        assert!(result.recipe.is_none());
        assert_eq!(result.display_text, raw);
    }
}
