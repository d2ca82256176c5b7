use chrono::{DateTime, Utc};
use uuid::Uuid;

use flow_types::CURRENT_USER_ID;
use flow_types::models::User;

use crate::context::AppContext;
use crate::views::{PostCard, avatar, button, verified_mark};

const PHOTO_COUNT: usize = 12;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProfileTab {
    #[default]
    Posts,
    About,
    Photos,
}

impl ProfileTab {
    pub const ALL: [ProfileTab; 3] = [ProfileTab::Posts, ProfileTab::About, ProfileTab::Photos];

    pub fn label(self) -> &'static str {
        match self {
            ProfileTab::Posts => "Posts",
            ProfileTab::About => "About",
            ProfileTab::Photos => "Photos",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|tab| tab.label().eq_ignore_ascii_case(s))
    }
}

/// The current user's profile with posts, about and photos tabs.
pub struct ProfileScreen {
    ctx: AppContext,
    tab: ProfileTab,
    cards: Vec<PostCard>,
}

impl ProfileScreen {
    pub fn new(ctx: AppContext) -> Self {
        let cards = ctx
            .catalog()
            .posts_by(CURRENT_USER_ID)
            .map(PostCard::new)
            .collect();
        Self {
            ctx,
            tab: ProfileTab::Posts,
            cards,
        }
    }

    pub fn tab(&self) -> ProfileTab {
        self.tab
    }

    pub fn select_tab(&mut self, tab: ProfileTab) {
        self.tab = tab;
    }

    /// Count shown beside a tab label, if the tab carries one.
    pub fn tab_count(&self, tab: ProfileTab) -> Option<usize> {
        match tab {
            ProfileTab::Posts => Some(self.cards.len()),
            ProfileTab::About => None,
            ProfileTab::Photos => Some(PHOTO_COUNT),
        }
    }

    pub fn cards(&self) -> &[PostCard] {
        &self.cards
    }

    pub fn toggle_like(&mut self, post_id: Uuid) -> bool {
        let Some(intent) = self
            .cards
            .iter_mut()
            .find(|c| c.post_id() == post_id)
            .map(PostCard::toggle_like)
        else {
            return false;
        };
        self.ctx.intent(intent);
        true
    }

    pub fn render(&self, now: DateTime<Utc>) -> Vec<String> {
        let Some(user) = self.ctx.catalog().current_user() else {
            return vec!["Profile unavailable".to_string()];
        };

        let mut lines = header(user);
        lines.push(
            ProfileTab::ALL
                .into_iter()
                .map(|tab| {
                    let label = match self.tab_count(tab) {
                        Some(count) => format!("{} {}", tab.label(), count),
                        None => tab.label().to_string(),
                    };
                    if tab == self.tab {
                        format!("[{}]", label)
                    } else {
                        format!(" {} ", label)
                    }
                })
                .collect::<Vec<_>>()
                .join(" "),
        );
        lines.push(String::new());

        match self.tab {
            ProfileTab::Posts => lines.extend(self.render_posts(user, now)),
            ProfileTab::About => lines.extend(about(user)),
            ProfileTab::Photos => {
                for row in 0..PHOTO_COUNT / 3 {
                    let cells: Vec<String> = (1..=3).map(|col| format!("[photo {:>2}]", row * 3 + col)).collect();
                    lines.push(cells.join(" "));
                }
            }
        }
        lines
    }

    fn render_posts(&self, user: &User, now: DateTime<Utc>) -> Vec<String> {
        if self.cards.is_empty() {
            return vec![
                "No posts yet".to_string(),
                "Share your first post to get started".to_string(),
            ];
        }

        let mut lines = Vec::new();
        for post in self.ctx.catalog().posts_by(user.id) {
            if let Some(card) = self.cards.iter().find(|c| c.post_id() == post.id) {
                lines.extend(card.render(post, user, now));
                lines.push(String::new());
            }
        }
        lines
    }
}

fn header(user: &User) -> Vec<String> {
    let mut lines = vec![
        format!("[cover] {}", user.cover_photo),
        format!("{}{}  {}", avatar(user, true), verified_mark(user), button("Edit Profile", false)),
        format!("@{}", user.username),
    ];
    if !user.bio.is_empty() {
        lines.push(user.bio.clone());
    }
    lines.push(format!(
        "{} Posts  {} Followers  {} Following",
        user.posts, user.followers, user.following
    ));
    lines.push(String::new());
    lines
}

fn about(user: &User) -> Vec<String> {
    vec![
        "About".to_string(),
        format!("  {}", if user.bio.is_empty() { "No bio yet" } else { user.bio.as_str() }),
        "  Lives in San Francisco, CA".to_string(),
        "  Website alexjohnson.dev".to_string(),
        "  Joined March 2023".to_string(),
        String::new(),
        "Stats".to_string(),
        format!("  Posts {}", user.posts),
        format!("  Followers {}", user.followers),
        format!("  Following {}", user.following),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use flow_catalog::Catalog;

    #[test]
    fn tabs_carry_counts() {
        let (ctx, _rx) = AppContext::new(Arc::new(Catalog::seed().unwrap()));
        let own = ctx.catalog().posts_by(CURRENT_USER_ID).count();
        let screen = ProfileScreen::new(ctx);

        assert_eq!(screen.tab(), ProfileTab::Posts);
        assert_eq!(screen.tab_count(ProfileTab::Posts), Some(own));
        assert_eq!(screen.tab_count(ProfileTab::Photos), Some(12));
        assert_eq!(screen.tab_count(ProfileTab::About), None);

        let lines = screen.render(Utc::now());
        assert!(lines.iter().any(|l| l.contains(&format!("[Posts {}]", own))));
    }

    #[test]
    fn posts_tab_lists_only_own_posts() {
        let (ctx, _rx) = AppContext::new(Arc::new(Catalog::seed().unwrap()));
        let screen = ProfileScreen::new(ctx.clone());
        assert!(!screen.cards().is_empty());
        for card in screen.cards() {
            let post = ctx.catalog().posts().iter().find(|p| p.id == card.post_id()).unwrap();
            assert_eq!(post.user_id, CURRENT_USER_ID);
        }
    }

    #[test]
    fn empty_state_without_posts() {
        let catalog = Catalog::seed().unwrap();
        let catalog = Catalog::from_records(
            catalog.users().to_vec(),
            Vec::new(),
            catalog.chats().to_vec(),
            Vec::new(),
            catalog.stories().to_vec(),
            catalog.notifications().to_vec(),
        );
        let (ctx, _rx) = AppContext::new(Arc::new(catalog));
        let screen = ProfileScreen::new(ctx);

        let lines = screen.render(Utc::now());
        assert!(lines.contains(&"No posts yet".to_string()));
        assert!(lines.iter().any(|l| l.contains("[Posts 0]")));
    }

    #[test]
    fn about_tab_shows_details() {
        let (ctx, _rx) = AppContext::new(Arc::new(Catalog::seed().unwrap()));
        let mut screen = ProfileScreen::new(ctx);
        screen.select_tab(ProfileTab::parse("about").unwrap());

        let lines = screen.render(Utc::now());
        assert!(lines.iter().any(|l| l.contains("San Francisco, CA")));
        assert!(lines.iter().any(|l| l.contains("Joined March 2023")));
        assert_eq!(ProfileTab::parse("videos"), None);
    }
}
