//! Handler context

use std::sync::Arc;

use crate::application::errors::BotError;
use crate::domain::traits::ChatClient;
use super::dispatcher::Router;

/// Everything a command handler gets besides the message itself
#[derive(Clone)]
pub struct Context {
    pub session: Arc<dyn ChatClient>,
    pub router: Arc<Router>,
}

impl Context {
    pub fn new(session: Arc<dyn ChatClient>, router: Arc<Router>) -> Self {
        Self { session, router }
    }

    /// Send text to a channel through the session
    pub async fn send(&self, channel_id: &str, text: &str) -> Result<(), BotError> {
        self.session.send_message(channel_id, text).await
    }
}
