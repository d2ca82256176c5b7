use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use flow_catalog::Catalog;
use flow_db::PreferenceStore;
use flow_types::events::Intent;
use flow_types::prefs::{AccentColor, Preferences, ThemeMode};

use crate::context::{AppContext, ShellEvent};
use crate::nav::{APP_TITLE, NavigationShell, Route};
use crate::views::button;

pub const TAGLINE: &str = "Where stories flow and connections grow";

/// Top of the app: the onboarding gate, the preferences, and the navigation
/// shell once the user has entered.
pub struct RootShell {
    ctx: AppContext,
    events: mpsc::UnboundedReceiver<ShellEvent>,
    prefs: PreferenceStore,
    nav: Option<NavigationShell>,
}

impl RootShell {
    pub fn new(catalog: Arc<Catalog>, prefs: PreferenceStore) -> Self {
        let (ctx, events) = AppContext::new(catalog);
        let nav = prefs
            .has_entered()
            .then(|| NavigationShell::new(ctx.clone(), Route::Feed.path()));

        info!(
            "Shell ready (theme={}, accent={}, entered={})",
            prefs.theme().as_str(),
            prefs.accent().as_str(),
            nav.is_some()
        );

        Self {
            ctx,
            events,
            prefs,
            nav,
        }
    }

    pub fn context(&self) -> &AppContext {
        &self.ctx
    }

    pub fn preferences(&self) -> Preferences {
        self.prefs.get()
    }

    pub fn is_entered(&self) -> bool {
        self.nav.is_some()
    }

    /// Leave the welcome screen. Remembered across restarts.
    pub fn enter(&mut self) {
        if self.nav.is_some() {
            return;
        }
        self.prefs.mark_entered();
        self.nav = Some(NavigationShell::new(self.ctx.clone(), Route::Feed.path()));
    }

    pub fn toggle_theme(&mut self) -> ThemeMode {
        self.prefs.toggle_theme()
    }

    pub fn set_accent(&mut self, accent: AccentColor) {
        self.prefs.set_accent(accent);
    }

    pub fn nav(&self) -> Option<&NavigationShell> {
        self.nav.as_ref()
    }

    pub fn nav_mut(&mut self) -> Option<&mut NavigationShell> {
        self.nav.as_mut()
    }

    /// Navigate if past the welcome screen.
    pub fn navigate(&mut self, path: &str) -> Option<Route> {
        self.nav.as_mut().map(|nav| nav.navigate(path))
    }

    /// Wait for the next event from a screen or story viewer.
    pub async fn next_event(&mut self) -> Option<ShellEvent> {
        self.events.recv().await
    }

    pub fn handle_event(&mut self, event: ShellEvent) {
        match event {
            ShellEvent::Intent(intent) => log_intent(&intent),
            ShellEvent::StoryClosed => {
                let dismissed = self
                    .nav
                    .as_mut()
                    .is_some_and(|nav| nav.screen_mut().dismiss_closed_story());
                debug!("Story closed (dismissed={})", dismissed);
            }
        }
    }

    /// Handle every event already queued. Returns how many there were.
    pub fn drain_events(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(event) = self.events.try_recv() {
            self.handle_event(event);
            handled += 1;
        }
        handled
    }

    pub fn render(&self, now: DateTime<Utc>) -> Vec<String> {
        let prefs = self.prefs.get();
        let mut lines = match &self.nav {
            Some(nav) => nav.render(now),
            None => welcome(prefs),
        };
        lines.push(String::new());
        lines.push(format!(
            "theme: {} · accent: {}",
            prefs.theme.as_str(),
            prefs.accent.display_name()
        ));
        lines
    }
}

/// Intents have no backend to go to; they end in the log.
fn log_intent(intent: &Intent) {
    match serde_json::to_string(intent) {
        Ok(json) => match intent.target_id() {
            Some(id) => info!("Intent on {}: {}", id, json),
            None => info!("Intent: {}", json),
        },
        Err(e) => warn!("Failed to encode intent {:?}: {}", intent, e),
    }
}

fn welcome(prefs: Preferences) -> Vec<String> {
    let theme_label = if prefs.theme.is_dark() { "Dark Mode: on" } else { "Dark Mode: off" };
    let accents = AccentColor::ALL
        .into_iter()
        .map(|accent| {
            if accent == prefs.accent {
                format!("[{}]", accent.display_name())
            } else {
                format!(" {} ", accent.display_name())
            }
        })
        .collect::<Vec<_>>()
        .join(" ");

    vec![
        APP_TITLE.to_string(),
        TAGLINE.to_string(),
        String::new(),
        "Social Feed · Share moments with friends".to_string(),
        "Instant Messaging · Chat in real-time".to_string(),
        String::new(),
        button(theme_label, false),
        format!("Accent Color: {}", accents),
        String::new(),
        button("Enter Flow", false),
    ]
}
