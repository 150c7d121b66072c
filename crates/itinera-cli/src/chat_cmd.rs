//! `itinera chat` -- the assistant conversation.

use anyhow::Result;

use itinera_core::{AppStore, ChatSendError};

use crate::ChatCommands;

pub async fn run(store: &mut AppStore, command: ChatCommands) -> Result<()> {
    if store.profile().is_none() {
        println!("no profile yet; run `itinera onboard` first");
        return Ok(());
    }
    store.ensure_greeting();

    match command {
        ChatCommands::Send { message } => send(store, &message).await,
        ChatCommands::Retry => retry(store).await,
        ChatCommands::History => history(store),
        ChatCommands::Clear => {
            store.clear_chat();
            println!("conversation reset");
            Ok(())
        }
    }
}

async fn send(store: &mut AppStore, message: &str) -> Result<()> {
    match store.send_chat(message).await {
        Ok(reply) => println!("assistant: {}", reply.content),
        Err(error @ ChatSendError::Api(_)) => {
            println!("send failed: {error}");
            println!("the message was kept; run `itinera chat retry` in a moment");
        }
        Err(error) => println!("not sent: {error}"),
    }
    Ok(())
}

async fn retry(store: &mut AppStore) -> Result<()> {
    match store.retry_last_failed().await {
        Ok(reply) => println!("assistant: {}", reply.content),
        Err(ChatSendError::NothingToRetry) => println!("nothing to retry"),
        Err(ChatSendError::CooldownActive) => {
            println!("retry not available yet; wait a moment and try again");
        }
        Err(error) => println!("retry failed: {error}"),
    }
    Ok(())
}

fn history(store: &AppStore) -> Result<()> {
    for message in store.chat_history() {
        println!("[{}] {}: {}", message.timestamp, message.role, message.content);
    }
    if let Some(error) = store.chat_error() {
        println!("! last send failed: {error}");
    }
    if let Some(failed) = store.last_failed_message() {
        println!("! pending retry: {failed:?}");
    }
    Ok(())
}
