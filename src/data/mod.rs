mod curated;
mod templates;
pub mod validator;

pub use curated::{CURATED_TOPICS, curated_questions};
pub use templates::{GenericTemplates, TemplateDeck};
pub use validator::ValidationError;
