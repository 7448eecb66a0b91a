use async_trait::async_trait;
use crate::application::errors::BotError;
use crate::domain::entities::Reply;

/// Reply capabilities of a single interaction.
///
/// An interaction accepts exactly one initial response (`reply` or `defer`);
/// anything after that must go through `edit_reply`.
#[async_trait]
pub trait Responder: Send + Sync {
    /// True once `reply` or `defer` has succeeded
    fn is_acknowledged(&self) -> bool;

    async fn reply(&self, reply: Reply) -> Result<(), BotError>;

    async fn defer(&self, ephemeral: bool) -> Result<(), BotError>;

    async fn edit_reply(&self, content: &str) -> Result<(), BotError>;
}
