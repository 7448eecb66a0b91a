//! Command deployment - Pushes command definitions to Discord

use serenity::all::{Command, CommandOptionType, CreateCommand, CreateCommandOption, GuildId, Http};

use crate::application::errors::BotError;
use crate::domain::entities::{CommandDefinition, OptionKind};

/// Build serenity's command payload from a definition
pub fn create_command(definition: &CommandDefinition) -> CreateCommand {
    let mut command = CreateCommand::new(&definition.name).description(&definition.description);
    for option in &definition.options {
        let kind = match option.kind {
            OptionKind::String => CommandOptionType::String,
            OptionKind::Integer => CommandOptionType::Integer,
            OptionKind::Boolean => CommandOptionType::Boolean,
        };
        let mut create = CreateCommandOption::new(kind, &option.name, &option.description)
            .required(option.required);
        if let Some(max) = option.max_length {
            create = create.max_length(max);
        }
        command = command.add_option(create);
    }
    command
}

/// Overwrite the deployed commands, globally or for one guild. Returns how many were deployed.
pub async fn deploy_commands(token: &str, guild_id: Option<u64>, definitions: &[CommandDefinition]) -> Result<usize, BotError> {
    let http = Http::new(token);
    let application = http.get_current_application_info().await?;
    http.set_application_id(application.id);

    let commands: Vec<CreateCommand> = definitions.iter().map(create_command).collect();
    let deployed = match guild_id {
        Some(guild_id) => GuildId::new(guild_id).set_commands(&http, commands).await?,
        None => Command::set_global_commands(&http, commands).await?,
    };
    Ok(deployed.len())
}
