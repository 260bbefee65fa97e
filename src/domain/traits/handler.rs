use std::future::Future;

use async_trait::async_trait;

use crate::application::errors::BotError;
use crate::application::messaging::Context;
use crate::domain::entities::Message;

/// Handler result
pub type HandlerResult = Result<(), BotError>;

/// Command handler - invoked with the session context and the stripped message
///
/// Implemented for any `Fn(Context, Message) -> impl Future<Output = HandlerResult>`,
/// so plain async closures can be registered directly.
#[async_trait]
pub trait CommandHandler: Send + Sync {
    async fn handle(&self, ctx: Context, message: Message) -> HandlerResult;
}

#[async_trait]
impl<F, Fut> CommandHandler for F
where
    F: Fn(Context, Message) -> Fut + Send + Sync,
    Fut: Future<Output = HandlerResult> + Send + 'static,
{
    async fn handle(&self, ctx: Context, message: Message) -> HandlerResult {
        (self)(ctx, message).await
    }
}
