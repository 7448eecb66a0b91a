//! Interaction replies through serenity

use async_trait::async_trait;
use serenity::all::{
    CommandInteraction, ComponentInteraction, CreateActionRow, CreateInteractionResponse,
    CreateInteractionResponseMessage, CreateSelectMenu, CreateSelectMenuKind, CreateSelectMenuOption,
    EditInteractionResponse, Http,
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::application::errors::BotError;
use crate::domain::entities::Reply;
use crate::domain::traits::Responder;

/// The serenity interaction a reply goes to
pub enum Source {
    Command(CommandInteraction),
    Component(ComponentInteraction),
}

/// `Responder` tracking whether the initial response was sent
pub struct SerenityResponder {
    http: Arc<Http>,
    source: Source,
    acknowledged: AtomicBool,
}

impl SerenityResponder {
    pub fn new(http: Arc<Http>, source: Source) -> Self {
        Self {
            http,
            source,
            acknowledged: AtomicBool::new(false),
        }
    }

    async fn respond(&self, response: CreateInteractionResponse) -> Result<(), BotError> {
        match &self.source {
            Source::Command(i) => i.create_response(&self.http, response).await?,
            Source::Component(i) => i.create_response(&self.http, response).await?,
        }
        self.acknowledged.store(true, Ordering::SeqCst);
        Ok(())
    }
}

/// Build serenity's response message from a `Reply`
pub fn response_message(reply: Reply) -> CreateInteractionResponseMessage {
    let mut message = CreateInteractionResponseMessage::new()
        .content(reply.content)
        .ephemeral(reply.ephemeral);

    if let Some(menu) = reply.select {
        let options = menu.options
            .into_iter()
            .map(|o| {
                let option = CreateSelectMenuOption::new(o.label, o.value);
                match o.description {
                    Some(description) => option.description(description),
                    None => option,
                }
            })
            .collect();
        let mut select = CreateSelectMenu::new(menu.custom_id, CreateSelectMenuKind::String { options });
        if let Some(placeholder) = menu.placeholder {
            select = select.placeholder(placeholder);
        }
        message = message.components(vec![CreateActionRow::SelectMenu(select)]);
    }
    message
}

#[async_trait]
impl Responder for SerenityResponder {
    fn is_acknowledged(&self) -> bool {
        self.acknowledged.load(Ordering::SeqCst)
    }

    async fn reply(&self, reply: Reply) -> Result<(), BotError> {
        self.respond(CreateInteractionResponse::Message(response_message(reply))).await
    }

    async fn defer(&self, ephemeral: bool) -> Result<(), BotError> {
        let message = CreateInteractionResponseMessage::new().ephemeral(ephemeral);
        self.respond(CreateInteractionResponse::Defer(message)).await
    }

    async fn edit_reply(&self, content: &str) -> Result<(), BotError> {
        let edit = EditInteractionResponse::new().content(content);
        match &self.source {
            Source::Command(i) => i.edit_response(&self.http, edit).await?,
            Source::Component(i) => i.edit_response(&self.http, edit).await?,
        };
        Ok(())
    }
}
