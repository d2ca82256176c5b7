use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::context::AppContext;
use crate::screens::{
    ChatsScreen, FeedScreen, NotificationsScreen, ProfileScreen, Screen, StoriesScreen,
};

pub const APP_TITLE: &str = "Flow";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Feed,
    Chats,
    Stories,
    Notifications,
    Profile,
}

impl Route {
    /// Navigation order.
    pub const ALL: [Route; 5] = [
        Route::Feed,
        Route::Chats,
        Route::Stories,
        Route::Notifications,
        Route::Profile,
    ];

    /// Resolve a path. Unknown paths redirect to the feed.
    pub fn from_path(path: &str) -> Self {
        let trimmed = path.trim();
        let normalized = match trimmed.trim_end_matches('/') {
            "" => "/",
            p => p,
        };
        match Self::ALL.into_iter().find(|r| r.path() == normalized) {
            Some(route) => route,
            None => {
                warn!("Unknown route {}, redirecting to /", trimmed);
                Route::Feed
            }
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            Route::Feed => "/",
            Route::Chats => "/chats",
            Route::Stories => "/stories",
            Route::Notifications => "/notifications",
            Route::Profile => "/profile",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Route::Feed => "Home",
            Route::Chats => "Chats",
            Route::Stories => "Stories",
            Route::Notifications => "Notifications",
            Route::Profile => "Profile",
        }
    }

    fn mount(self, ctx: &AppContext) -> Screen {
        let ctx = ctx.clone();
        match self {
            Route::Feed => Screen::Feed(FeedScreen::new(ctx)),
            Route::Chats => Screen::Chats(ChatsScreen::new(ctx)),
            Route::Stories => Screen::Stories(StoriesScreen::new(ctx)),
            Route::Notifications => Screen::Notifications(NotificationsScreen::new(ctx)),
            Route::Profile => Screen::Profile(ProfileScreen::new(ctx)),
        }
    }
}

/// App chrome around the routed screen.
///
/// Every navigation mounts a fresh screen, so screen-local state (drafts,
/// filters, an open story viewer) does not survive leaving the route.
pub struct NavigationShell {
    ctx: AppContext,
    route: Route,
    screen: Screen,
}

impl NavigationShell {
    pub fn new(ctx: AppContext, path: &str) -> Self {
        let route = Route::from_path(path);
        let screen = route.mount(&ctx);
        info!("Mounted {}", route.path());
        Self { ctx, route, screen }
    }

    pub fn navigate(&mut self, path: &str) -> Route {
        let route = Route::from_path(path);
        info!("Navigating {} -> {}", self.route.path(), route.path());
        self.route = route;
        self.screen = route.mount(&self.ctx);
        route
    }

    pub fn route(&self) -> Route {
        self.route
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn screen_mut(&mut self) -> &mut Screen {
        &mut self.screen
    }

    pub fn nav_bar(&self) -> String {
        Route::ALL
            .into_iter()
            .map(|r| {
                if r == self.route {
                    format!("[{}]", r.label())
                } else {
                    format!(" {} ", r.label())
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn render(&self, now: DateTime<Utc>) -> Vec<String> {
        let mut lines = vec![
            format!("{}  {}", APP_TITLE, self.nav_bar()),
            "═".repeat(60),
        ];
        lines.extend(self.screen.render(now));
        lines
    }
}
