//! Administration commands: models, conversations, messages, settings.

use crate::cli::commands::{ConversationsCommand, MessagesArgs, ModelsCommand, SettingsCommand};
use crate::output::console::ConsoleFormatter;
use grove_application::{
    AdminError, BrowseConversationsUseCase, ManageModelsUseCase, ManageSettingsUseCase,
};

/// Runs one administration command and renders its result.
///
/// Rendering is returned rather than printed so the binary decides where it
/// goes.
pub struct AdminConsole {
    models: ManageModelsUseCase,
    browse: BrowseConversationsUseCase,
    settings: ManageSettingsUseCase,
    json: bool,
}

impl AdminConsole {
    pub fn new(
        models: ManageModelsUseCase,
        browse: BrowseConversationsUseCase,
        settings: ManageSettingsUseCase,
    ) -> Self {
        Self {
            models,
            browse,
            settings,
            json: false,
        }
    }

    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    pub async fn models(&self, command: ModelsCommand) -> Result<String, AdminError> {
        let model = match command {
            ModelsCommand::List(page) => {
                let page = self.models.list(page.page, page.size).await?;
                return Ok(self.render(&page, ConsoleFormatter::models));
            }
            ModelsCommand::Show { id } => self.models.get(id).await?,
            ModelsCommand::Add(args) => self.models.create(args.into()).await?,
            ModelsCommand::Update { id, model } => self.models.update(id, model.into()).await?,
            ModelsCommand::Enable { id } => self.models.set_enabled(id, true).await?,
            ModelsCommand::Disable { id } => self.models.set_enabled(id, false).await?,
            ModelsCommand::Remove { id } => {
                self.models.delete(id).await?;
                return Ok(self.render(
                    &serde_json::json!({ "deleted": id }),
                    |_| format!("Deleted model {id}\n"),
                ));
            }
        };
        Ok(self.render(&model, ConsoleFormatter::model))
    }

    pub async fn conversations(&self, command: ConversationsCommand) -> Result<String, AdminError> {
        match command {
            ConversationsCommand::List { page, search } => {
                let page = self
                    .browse
                    .list_conversations(page.page, page.size, search.as_deref())
                    .await?;
                Ok(self.render(&page, ConsoleFormatter::conversations))
            }
            ConversationsCommand::Rename { id, title } => {
                let conversation = self.browse.rename_conversation(id, title.as_deref()).await?;
                Ok(self.render(&conversation, ConsoleFormatter::conversation))
            }
        }
    }

    pub async fn messages(&self, args: MessagesArgs) -> Result<String, AdminError> {
        let messages = self
            .browse
            .list_messages(args.conversation, args.before, args.size)
            .await?;
        Ok(self.render(messages.as_slice(), ConsoleFormatter::messages))
    }

    pub async fn settings(&self, command: SettingsCommand) -> Result<String, AdminError> {
        match command {
            SettingsCommand::Get { key } => {
                let value = self.settings.get(&key).await?;
                Ok(self.render(&serde_json::json!({ "key": key, "value": value }), |_| {
                    ConsoleFormatter::setting(&key, value.as_deref())
                }))
            }
            SettingsCommand::Set { key, value } => {
                let setting = self.settings.set(&key, &value).await?;
                Ok(self.render(&setting, |s| ConsoleFormatter::settings(std::slice::from_ref(s))))
            }
            SettingsCommand::List => {
                let settings = self.settings.list().await?;
                Ok(self.render(settings.as_slice(), ConsoleFormatter::settings))
            }
        }
    }

    fn render<T, F>(&self, value: &T, text: F) -> String
    where
        T: serde::Serialize + ?Sized,
        F: FnOnce(&T) -> String,
    {
        if self.json {
            let mut out = ConsoleFormatter::json(value);
            out.push('\n');
            out
        } else {
            text(value)
        }
    }
}
