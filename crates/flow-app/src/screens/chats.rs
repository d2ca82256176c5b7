use chrono::{DateTime, Utc};
use tracing::info;
use uuid::Uuid;

use flow_types::CURRENT_USER_ID;
use flow_types::events::Intent;
use flow_types::models::{Chat, Message, User};

use crate::context::AppContext;
use crate::views::chat_row::{chat_row, message_bubble, presence_line};
use crate::views::{avatar, button};

/// Direct messages: a searchable chat list and the selected conversation.
pub struct ChatsScreen {
    ctx: AppContext,
    selected: Option<Uuid>,
    search: String,
    draft: String,
}

impl ChatsScreen {
    pub fn new(ctx: AppContext) -> Self {
        Self {
            ctx,
            selected: None,
            search: String::new(),
            draft: String::new(),
        }
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, query: &str) {
        self.search = query.to_string();
    }

    /// Chats with any participant whose name contains the search text,
    /// ignoring case.
    pub fn visible_chats(&self) -> Vec<&Chat> {
        let catalog = self.ctx.catalog();
        let needle = self.search.to_lowercase();
        catalog
            .chats()
            .iter()
            .filter(|chat| {
                chat.participants.iter().any(|id| {
                    catalog
                        .user(*id)
                        .is_some_and(|u| u.name.to_lowercase().contains(&needle))
                })
            })
            .collect()
    }

    pub fn selected(&self) -> Option<&Chat> {
        self.selected.and_then(|id| self.ctx.catalog().chat(id))
    }

    /// Select a chat. Unread counters are left as they are.
    pub fn select(&mut self, chat_id: Uuid) -> bool {
        if self.ctx.catalog().chat(chat_id).is_none() {
            return false;
        }
        if self.selected != Some(chat_id) {
            self.draft.clear();
        }
        self.selected = Some(chat_id);
        true
    }

    pub fn deselect(&mut self) {
        self.selected = None;
        self.draft.clear();
    }

    pub fn selected_messages(&self) -> Vec<&Message> {
        match self.selected {
            Some(id) => self.ctx.catalog().messages_for(id).collect(),
            None => Vec::new(),
        }
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn set_draft(&mut self, text: &str) {
        self.draft = text.to_string();
    }

    /// Send the draft to the selected chat. Blank drafts, or no selection,
    /// send nothing. The message is not added to the conversation.
    pub fn send(&mut self) -> bool {
        let Some(chat_id) = self.selected else {
            return false;
        };
        if self.draft.trim().is_empty() {
            return false;
        }

        let content = std::mem::take(&mut self.draft);
        info!("Sending message to chat {}: {}", chat_id, content);
        self.ctx.intent(Intent::SendMessage { chat_id, content });
        true
    }

    fn other_participant(&self, chat: &Chat) -> Option<&User> {
        chat.participants
            .iter()
            .find(|id| **id != CURRENT_USER_ID)
            .and_then(|id| self.ctx.catalog().user(*id))
    }

    pub fn render(&self, now: DateTime<Utc>) -> Vec<String> {
        let mut lines = vec![
            format!("Chats  {}", button("New", false)),
            format!("Search: {}", if self.search.is_empty() { "Search chats..." } else { self.search.as_str() }),
            String::new(),
        ];

        for chat in self.visible_chats() {
            let Some(other) = self.other_participant(chat) else {
                continue;
            };
            lines.extend(chat_row(chat, other, self.selected == Some(chat.id), now));
        }

        lines.push("─".repeat(40));
        lines.extend(self.render_window());
        lines
    }

    fn render_window(&self) -> Vec<String> {
        let Some(chat) = self.selected() else {
            return vec![
                "Select a chat to start messaging".to_string(),
                "Choose from your existing conversations or start a new one".to_string(),
            ];
        };
        let Some(other) = self.other_participant(chat) else {
            return Vec::new();
        };

        let mut lines = vec![
            format!("{}  {}", avatar(other, true), presence_line(other)),
            String::new(),
        ];
        for message in self.selected_messages() {
            lines.push(message_bubble(message, message.sender_id == CURRENT_USER_ID));
        }
        lines.push(String::new());

        let draft = if self.draft.is_empty() { "Type a message..." } else { self.draft.as_str() };
        lines.push(format!("> {} {}", draft, button("Send", self.draft.trim().is_empty())));
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use flow_catalog::Catalog;

    use crate::context::ShellEvent;

    fn screen() -> (ChatsScreen, tokio::sync::mpsc::UnboundedReceiver<ShellEvent>) {
        let (ctx, rx) = AppContext::new(Arc::new(Catalog::seed().unwrap()));
        (ChatsScreen::new(ctx), rx)
    }

    #[test]
    fn search_filters_by_participant_name() {
        let (mut chats, _rx) = screen();
        let total = chats.visible_chats().len();

        chats.set_search("SARAH");
        let hits = chats.visible_chats();
        assert_eq!(hits.len(), 1);

        chats.set_search("nobody by this name");
        assert!(chats.visible_chats().is_empty());

        chats.set_search("");
        assert_eq!(chats.visible_chats().len(), total);
    }

    #[test]
    fn selecting_keeps_unread_counter() {
        let (mut chats, _rx) = screen();
        let chat = chats.ctx.catalog().chats()[0].clone();
        assert!(chat.unread_count > 0);

        assert!(chats.select(chat.id));
        assert_eq!(chats.selected().unwrap().unread_count, chat.unread_count);
        assert!(!chats.selected_messages().is_empty());
        assert!(chats.selected_messages().iter().all(|m| m.chat_id == chat.id));

        assert!(!chats.select(Uuid::nil()));
        assert_eq!(chats.selected().map(|c| c.id), Some(chat.id));
    }

    #[test]
    fn send_requires_selection_and_text() {
        let (mut chats, mut rx) = screen();
        chats.set_draft("hello");
        assert!(!chats.send());

        let chat_id = chats.ctx.catalog().chats()[1].id;
        chats.select(chat_id);
        chats.set_draft("  ");
        assert!(!chats.send());

        let before = chats.selected_messages().len();
        chats.set_draft("On my way");
        assert!(chats.send());
        assert!(chats.draft().is_empty());
        assert_eq!(chats.selected_messages().len(), before);
        assert_eq!(
            rx.try_recv().unwrap(),
            ShellEvent::Intent(Intent::SendMessage { chat_id, content: "On my way".into() })
        );
    }

    #[test]
    fn window_placeholder_without_selection() {
        let (chats, _rx) = screen();
        let lines = chats.render(Utc::now());
        assert!(lines.iter().any(|l| l == "Select a chat to start messaging"));
    }
}
