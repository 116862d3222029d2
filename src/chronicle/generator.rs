use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Why a chronicle could not be produced. Neither variant is ever cached.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// The model refused the prompt or stopped for safety.
    #[error("summary generation was blocked: {0}")]
    Blocked(String),

    /// Transport, status, or response-shape failure.
    #[error("summary generation failed: {0}")]
    Failed(String),
}

impl GenerationError {
    pub fn user_message(&self) -> String {
        match self {
            Self::Blocked(reason) => format!(
                "Summary generation was blocked due to: {reason}. Please adjust the content or try again."
            ),
            Self::Failed(_) => "Could not generate a chronicle right now. Please try again.".into(),
        }
    }
}

pub type GenerationFuture<'a> =
    Pin<Box<dyn Future<Output = Result<String, GenerationError>> + Send + 'a>>;

/// Turns a rendered prompt into narrative text.
pub trait NarrativeGenerator: Send + Sync {
    fn name(&self) -> &str;

    fn generate<'a>(&'a self, prompt: &'a str, temperature: f64) -> GenerationFuture<'a>;
}
