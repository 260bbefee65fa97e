//! Built-in command handlers

use async_trait::async_trait;

use crate::application::services::member_has_permission;
use crate::domain::entities::{Message, Permissions};
use crate::domain::traits::{CommandHandler, HandlerResult};
use super::context::Context;

pub const PREFIX_UPDATED: &str = "Prefix Updated";
pub const PREFIX_DENIED: &str = "You need the Administrator permission to change the prefix";
pub const PERMISSION_CHECK_FAILED: &str = "Could not verify your permissions, please try again later";

/// Lists every registered command and its help text
pub struct HelpCommand;

#[async_trait]
impl CommandHandler for HelpCommand {
    async fn handle(&self, ctx: Context, message: Message) -> HandlerResult {
        ctx.router
            .send_help(ctx.session.as_ref(), &message.channel_id)
            .await
    }
}

/// Sets the invoking group's prefix to the command arguments.
///
/// Administrators only. Not registered automatically; register it under
/// whatever name suits the bot.
pub struct SetPrefixCommand;

#[async_trait]
impl CommandHandler for SetPrefixCommand {
    async fn handle(&self, ctx: Context, message: Message) -> HandlerResult {
        let allowed = member_has_permission(
            ctx.session.as_ref(),
            &message.group_id,
            &message.author_id,
            Permissions::ADMINISTRATOR,
        )
        .await;

        match allowed {
            Ok(true) => {}
            Ok(false) => {
                tracing::info!(
                    "User {} may not change the prefix in {}",
                    message.author_id, message.group_id
                );
                return ctx.send(&message.channel_id, PREFIX_DENIED).await;
            }
            Err(e) => {
                tracing::warn!("Permission check failed: {}", e);
                ctx.send(&message.channel_id, PERMISSION_CHECK_FAILED).await?;
                return Err(e.into());
            }
        }

        let change = ctx.router.set_prefix(&message.group_id, message.args()).await?;
        tracing::info!(
            "Prefix for {} is now {:?} (was {:?})",
            message.group_id, change.settings.prefix, change.previous
        );

        if change.changed() {
            ctx.send(&message.channel_id, PREFIX_UPDATED).await?;
        }
        Ok(())
    }
}
