//! Intent classification for inbound chat messages.
//!
//! Every message is mapped to exactly one [`Action`], which selects the system
//! prompt sent to the model and the extractor applied to its reply.

use serde::{Deserialize, Serialize};

/// The classified intent of a single chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    GenerateRecipe,
    SuggestFromIngredients,
    SubstituteIngredient,
    NutritionalInfo,
    MealPlan,
    EnhanceRecipe,
    GeneralChat,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::GenerateRecipe => "generate_recipe",
            Action::SuggestFromIngredients => "suggest_from_ingredients",
            Action::SubstituteIngredient => "substitute_ingredient",
            Action::NutritionalInfo => "nutritional_info",
            Action::MealPlan => "meal_plan",
            Action::EnhanceRecipe => "enhance_recipe",
            Action::GeneralChat => "general_chat",
        }
    }
}

/// Ordered classification rules. The first rule whose keyword list contains a
/// substring of the lowercased message wins, so rule order is load-bearing:
/// "I have chicken, improve my dinner" is a suggestion request, not an
/// enhancement request.
const RULES: &[(&[&str], Action)] = &[
    (
        &["generate", "create a recipe", "recipe for"],
        Action::GenerateRecipe,
    ),
    (
        &["i have", "what can i cook", "ingredients:", "what can i make"],
        Action::SuggestFromIngredients,
    ),
    (
        &["substitute", "replacement", "instead of", "don't have"],
        Action::SubstituteIngredient,
    ),
    (
        &["nutrition", "calories", "nutritional"],
        Action::NutritionalInfo,
    ),
    (
        &["meal plan", "weekly plan", "plan my meals"],
        Action::MealPlan,
    ),
    (
        &["improve", "enhance", "better", "variation"],
        Action::EnhanceRecipe,
    ),
];

/// Classify a chat message into an [`Action`].
///
/// Case-insensitive substring matching, first match wins, falling back to
/// [`Action::GeneralChat`]. Pure and total: depends only on the message text,
/// never on conversation history.
pub fn classify(message: &str) -> Action {
    let lower = message.to_lowercase();

    for (keywords, action) in RULES {
        if keywords.iter().any(|kw| lower.contains(kw)) {
            return *action;
        }
    }

    Action::GeneralChat
}
