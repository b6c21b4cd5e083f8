//! Request-scoped types flowing through the chat pipeline.
//!
//! Everything here is created fresh per request and dropped once the envelope
//! is returned; the core keeps no state between requests.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use crate::action::Action;

/// Role of a conversation turn, as sent by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    User,
    Assistant,
}

/// One prior message in the conversation. Order is oldest-first and must be
/// preserved when forwarded to the provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: TurnRole,
    pub content: String,
}

impl ConversationTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: TurnRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: TurnRole::Assistant,
            content: content.into(),
        }
    }
}

/// A JSON scalar that the model may emit either as a number or a string
/// (`"prep_time": 15` vs `"prep_time": "15 minutes"`). Displays bare, without
/// JSON quoting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Number(serde_json::Number),
    Text(String),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Number(n) => n.fmt(f),
            Scalar::Text(s) => s.fmt(f),
        }
    }
}

/// One ingredient line of an extracted recipe.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IngredientLine {
    pub amount: Option<Scalar>,
    pub item: Option<String>,
}

/// A recipe decoded from model output.
///
/// The model is untrusted, so every field is optional and unknown fields are
/// ignored. A value only counts as a recipe when [`ExtractedRecipe::is_recipe_shaped`]
/// holds: a title plus at least one of ingredients/instructions. Note the
/// predicate checks field *presence*, not non-emptiness, matching how the
/// saved-recipe check has always behaved.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractedRecipe {
    pub title: Option<String>,
    pub description: Option<String>,
    pub cuisine: Option<String>,
    pub prep_time: Option<Scalar>,
    pub cook_time: Option<Scalar>,
    pub servings: Option<Scalar>,
    pub difficulty: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ingredients: Option<Vec<IngredientLine>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nutritional_info: Option<Map<String, Value>>,
    /// Only populated for ingredient suggestions: ingredients the model
    /// assumed the user already has.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub missing_ingredients: Option<Vec<String>>,
}

impl ExtractedRecipe {
    /// Minimal validation predicate for "is this worth treating as a recipe".
    pub fn is_recipe_shaped(&self) -> bool {
        self.title.is_some() && (self.ingredients.is_some() || self.instructions.is_some())
    }
}

/// Reply payload for `substitute_ingredient`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SubstitutionReply {
    pub original: Option<String>,
    pub substitutes: Option<Vec<Substitute>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Substitute {
    pub ingredient: Option<String>,
    pub amount: Option<String>,
    pub notes: Option<String>,
}

/// Reply payload for `nutritional_info`. Nutrient keys are kept in the
/// model's order (serde_json `preserve_order`) so the rendered table matches
/// what the model said.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NutritionReply {
    pub per_serving: Option<Map<String, Value>>,
    pub notes: Option<String>,
}

/// Reply payload for `meal_plan`. Days are kept in the model's order.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MealPlanReply {
    pub plan: Option<Map<String, Value>>,
    pub shopping_list: Option<Vec<String>>,
    pub notes: Option<String>,
}

/// Meals for a single day of a meal plan.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DayMeals {
    pub breakfast: Option<String>,
    pub lunch: Option<String>,
    pub dinner: Option<String>,
}

/// Reply payload for `enhance_recipe`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EnhancementReply {
    pub suggestions: Option<Vec<String>>,
    pub variations: Option<Vec<Variation>>,
    pub tips: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Variation {
    pub name: Option<String>,
    pub changes: Option<String>,
}

impl EnhancementReply {
    pub fn has_content(&self) -> bool {
        self.suggestions.is_some() || self.variations.is_some() || self.tips.is_some()
    }
}

/// The final result of one pipeline run, returned to the boundary.
///
/// At most one of `recipe` / `recipes` is populated. `text` always carries
/// something displayable, falling back to the raw model output when no
/// structured payload could be extracted.
#[derive(Debug, Clone, Serialize)]
pub struct ChatEnvelope {
    pub text: String,
    pub recipe: Option<ExtractedRecipe>,
    pub recipes: Option<Vec<ExtractedRecipe>>,
    pub action: Action,
}
