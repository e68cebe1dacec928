pub mod health;
pub mod research;

pub use health::health_handler;
pub use research::{research_form_handler, research_json_handler, ResearchForm};
