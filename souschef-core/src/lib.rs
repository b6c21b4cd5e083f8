pub mod action;
pub mod ai;
pub mod chat;
pub mod extract;
pub mod format;
pub mod types;

pub use action::{classify, Action};
pub use ai::{
    create_provider_from_env, shared_provider, ChatProvider, FakeProvider, GeminiProvider,
    GroqProvider, ProviderError,
};
pub use chat::respond;
pub use extract::{extract, Extraction};
pub use types::{ChatEnvelope, ConversationTurn, ExtractedRecipe, TurnRole};
