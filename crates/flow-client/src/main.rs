mod commands;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Result, anyhow, bail};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::watch;
use tracing::info;
use uuid::Uuid;

use flow_app::screens::Screen;
use flow_app::views::PostCard;
use flow_app::{RootShell, ShellEvent};
use flow_catalog::Catalog;
use flow_db::PreferenceStore;
use flow_stories::PlaybackSnapshot;

use crate::commands::{Command, HELP};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Logs go to stderr so they don't interleave with the screen
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "flow=debug".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    // Config
    let db_path = std::env::var("FLOW_DB_PATH").unwrap_or_else(|_| "flow.db".into());

    let prefs = PreferenceStore::open_or_volatile(&PathBuf::from(&db_path))?;
    let catalog = Arc::new(Catalog::seed()?);
    info!(
        "Catalog loaded: {} users, {} posts, {} stories",
        catalog.users().len(),
        catalog.posts().len(),
        catalog.stories().len()
    );

    let mut shell = RootShell::new(catalog, prefs);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut story_updates = subscribe_story(&shell);
    let mut shown_story = open_story_index(&shell);

    draw(&shell);
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match Command::parse(&line) {
                    Ok(Command::Quit) => break,
                    Ok(Command::Help) => println!("{}", HELP),
                    Ok(command) => {
                        if let Err(e) = apply(&mut shell, command) {
                            println!("! {}", e);
                        }
                        shell.drain_events();
                        story_updates = subscribe_story(&shell);
                        shown_story = open_story_index(&shell);
                        draw(&shell);
                    }
                    Err(e) => println!("! {}", e),
                }
            }
            Some(event) = shell.next_event() => {
                let closed = event == ShellEvent::StoryClosed;
                shell.handle_event(event);
                if closed {
                    story_updates = None;
                    shown_story = None;
                    draw(&shell);
                }
            }
            changed = story_changed(&mut story_updates) => {
                if changed.is_err() {
                    story_updates = None;
                    continue;
                }
                // Ticks publish every 100ms; only a story change is worth a redraw.
                let current = open_story_index(&shell);
                if current.is_some() && current != shown_story {
                    shown_story = current;
                    draw(&shell);
                }
            }
        }
    }

    info!("Bye");
    Ok(())
}

fn draw(shell: &RootShell) {
    println!();
    for line in shell.render(chrono::Utc::now()) {
        println!("{}", line);
    }
    print!("> ");
    let _ = std::io::Write::flush(&mut std::io::stdout());
}

/// Index of the story showing in an open viewer, if any.
fn open_story_index(shell: &RootShell) -> Option<usize> {
    let overlay = shell.nav()?.screen().stories()?;
    if !overlay.is_open() {
        return None;
    }
    overlay.viewer().map(|v| v.snapshot().index)
}

/// Playback updates from the open story viewer, if any.
fn subscribe_story(shell: &RootShell) -> Option<watch::Receiver<PlaybackSnapshot>> {
    let overlay = shell.nav()?.screen().stories()?;
    overlay.viewer().map(|v| v.subscribe())
}

/// Resolves on the next published snapshot. Never resolves without a viewer.
async fn story_changed(
    updates: &mut Option<watch::Receiver<PlaybackSnapshot>>,
) -> Result<(), watch::error::RecvError> {
    match updates {
        Some(rx) => rx.changed().await,
        None => std::future::pending().await,
    }
}

fn apply(shell: &mut RootShell, command: Command) -> Result<()> {
    match command {
        Command::Enter => shell.enter(),
        Command::Theme => {
            shell.toggle_theme();
        }
        Command::Accent(accent) => shell.set_accent(accent),
        Command::Show | Command::Help | Command::Quit => {}
        Command::Go(path) => {
            shell.navigate(&path).ok_or_else(not_entered)?;
        }
        Command::Story(n) => {
            let story_id = shell
                .context()
                .catalog()
                .stories()
                .get(n)
                .map(|s| s.id)
                .ok_or_else(|| anyhow!("no story {}", n + 1))?;
            match screen_mut(shell)? {
                Screen::Feed(feed) => feed.open_story(story_id)?,
                Screen::Stories(stories) => stories.open_story(story_id)?,
                _ => bail!("stories open from the feed or the stories screen"),
            }
        }
        command => apply_to_screen(screen_mut(shell)?, command)?,
    }
    Ok(())
}

fn apply_to_screen(screen: &mut Screen, command: Command) -> Result<()> {
    match (screen, command) {
        (Screen::Feed(feed), Command::Like(n)) => {
            feed.toggle_like(nth_post(feed.cards(), n)?);
        }
        (Screen::Profile(profile), Command::Like(n)) => {
            profile.toggle_like(nth_post(profile.cards(), n)?);
        }
        (Screen::Feed(feed), Command::Comments(n)) => {
            feed.toggle_comments(nth_post(feed.cards(), n)?);
        }
        (Screen::Feed(feed), Command::Comment(n, text)) => {
            let post_id = nth_post(feed.cards(), n)?;
            feed.set_comment_draft(post_id, &text);
            if !feed.submit_comment(post_id) {
                bail!("nothing to comment");
            }
        }
        (Screen::Feed(feed), Command::Share(n)) => {
            feed.share(nth_post(feed.cards(), n)?);
        }
        (screen, control @ (Command::Next | Command::Prev | Command::Close | Command::Tap(_))) => {
            let overlay = screen
                .stories()
                .filter(|s| s.is_open())
                .ok_or_else(|| anyhow!("no story is open"))?;
            match control {
                Command::Next => overlay.next(),
                Command::Prev => overlay.previous(),
                Command::Tap(x) => overlay.tap(x),
                _ => overlay.close(),
            }
        }
        (Screen::Chats(chats), Command::Search(text)) => chats.set_search(&text),
        (Screen::Chats(chats), Command::Select(n)) => {
            let chat_id = chats
                .visible_chats()
                .get(n)
                .map(|c| c.id)
                .ok_or_else(|| anyhow!("no chat {}", n + 1))?;
            chats.select(chat_id);
        }
        (Screen::Chats(chats), Command::Send(text)) => {
            chats.set_draft(&text);
            if !chats.send() {
                bail!("select a chat and type a message first");
            }
        }
        (Screen::Notifications(screen), Command::Filter) => {
            screen.toggle_filter();
        }
        (Screen::Notifications(screen), Command::Read(n)) => {
            let id = screen
                .visible()
                .get(n)
                .map(|item| item.id)
                .ok_or_else(|| anyhow!("no notification {}", n + 1))?;
            screen.mark_read(id);
        }
        (Screen::Notifications(screen), Command::ReadAll) => screen.mark_all_read(),
        (Screen::Profile(profile), Command::Tab(tab)) => profile.select_tab(tab),
        (_, command) => bail!("{:?} does not apply to this screen", command),
    }
    Ok(())
}

fn screen_mut(shell: &mut RootShell) -> Result<&mut Screen> {
    shell
        .nav_mut()
        .map(|nav| nav.screen_mut())
        .ok_or_else(not_entered)
}

fn nth_post(cards: &[PostCard], n: usize) -> Result<Uuid> {
    cards
        .get(n)
        .map(PostCard::post_id)
        .ok_or_else(|| anyhow!("no post {}", n + 1))
}

fn not_entered() -> anyhow::Error {
    anyhow!("enter Flow first")
}
