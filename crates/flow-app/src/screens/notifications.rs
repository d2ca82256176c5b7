use chrono::{DateTime, Utc};
use uuid::Uuid;

use flow_types::events::Intent;
use flow_types::models::Notification;

use crate::context::AppContext;
use crate::views::button;
use crate::views::notification_row::notification_row;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReadFilter {
    #[default]
    All,
    Unread,
}

/// Notifications over a screen-local copy of the catalog's records. Read
/// flags change only in that copy.
pub struct NotificationsScreen {
    ctx: AppContext,
    items: Vec<Notification>,
    filter: ReadFilter,
}

impl NotificationsScreen {
    pub fn new(ctx: AppContext) -> Self {
        let items = ctx.catalog().notifications().to_vec();
        Self {
            ctx,
            items,
            filter: ReadFilter::All,
        }
    }

    pub fn filter(&self) -> ReadFilter {
        self.filter
    }

    pub fn toggle_filter(&mut self) -> ReadFilter {
        self.filter = match self.filter {
            ReadFilter::All => ReadFilter::Unread,
            ReadFilter::Unread => ReadFilter::All,
        };
        self.filter
    }

    pub fn unread_count(&self) -> usize {
        self.items.iter().filter(|n| !n.is_read).count()
    }

    pub fn visible(&self) -> Vec<&Notification> {
        self.items
            .iter()
            .filter(|n| self.filter == ReadFilter::All || !n.is_read)
            .collect()
    }

    /// Clicking a row marks it read. Rows that are already read ignore clicks.
    pub fn mark_read(&mut self, id: Uuid) -> bool {
        let Some(item) = self.items.iter_mut().find(|n| n.id == id && !n.is_read) else {
            return false;
        };
        item.is_read = true;
        self.ctx.intent(Intent::MarkNotificationRead { notification_id: id });
        true
    }

    pub fn mark_all_read(&mut self) {
        for item in &mut self.items {
            item.is_read = true;
        }
        self.ctx.intent(Intent::MarkAllNotificationsRead);
    }

    pub fn header(&self) -> Option<String> {
        match self.unread_count() {
            0 => None,
            1 => Some("1 unread notification".to_string()),
            n => Some(format!("{} unread notifications", n)),
        }
    }

    pub fn render(&self, now: DateTime<Utc>) -> Vec<String> {
        let unread = self.unread_count();
        let toggle = match self.filter {
            ReadFilter::All => "Show Unread",
            ReadFilter::Unread => "Show All",
        };

        let mut controls = button(toggle, false);
        if unread > 0 {
            controls.push(' ');
            controls.push_str(&button("Mark All Read", false));
        }

        let mut lines = vec![format!("Notifications  {}", controls)];
        if let Some(header) = self.header() {
            lines.push(header);
        }
        lines.push(String::new());

        let visible = self.visible();
        if visible.is_empty() {
            lines.push("All caught up!".to_string());
            lines.push(match self.filter {
                ReadFilter::Unread => "No unread notifications".to_string(),
                ReadFilter::All => "No notifications yet".to_string(),
            });
            return lines;
        }

        let catalog = self.ctx.catalog();
        for item in visible {
            if let Some(from) = catalog.user(item.from_user) {
                lines.push(notification_row(item, from, now));
            }
        }
        lines
    }
}
