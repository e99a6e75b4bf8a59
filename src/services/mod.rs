mod csv_source;
mod moderation_agent;

pub use csv_source::{CsvSourceError, load_reviews, load_urls};
pub use moderation_agent::{AgentConfig, ModerationAgent, ModerationAgentError};
