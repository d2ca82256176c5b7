use anyhow::{Context, Result, anyhow, bail};

use flow_app::screens::ProfileTab;
use flow_types::prefs::AccentColor;

pub const HELP: &str = "\
commands:
  enter                   leave the welcome screen
  theme                   toggle light/dark
  accent <name>           blue | purple | green | orange | pink
  go <path>               /, /chats, /stories, /notifications, /profile
  like <n>                like or unlike the nth post
  comments <n>            show or hide the nth post's comment box
  comment <n> <text>      comment on the nth post
  share <n>               share the nth post
  story <n>               open the nth story
  next | prev | close     story viewer controls
  tap <x>                 tap the story viewer at 0.0..1.0 of its width
  search <text>           filter chats by participant
  select <n>              open the nth visible chat
  send <text>             send a message to the open chat
  filter                  toggle all/unread notifications
  read <n>                mark the nth visible notification read
  readall                 mark every notification read
  tab <name>              posts | about | photos
  show                    redraw
  help | quit";

/// One line of user input.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Enter,
    Theme,
    Accent(AccentColor),
    Go(String),
    Like(usize),
    Comments(usize),
    Comment(usize, String),
    Share(usize),
    Story(usize),
    Next,
    Prev,
    Close,
    Tap(f64),
    Search(String),
    Select(usize),
    Send(String),
    Filter,
    Read(usize),
    ReadAll,
    Tab(ProfileTab),
    Show,
    Help,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Result<Self> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word {
            "enter" => Command::Enter,
            "theme" => Command::Theme,
            "accent" => Command::Accent(
                AccentColor::parse(rest).ok_or_else(|| anyhow!("unknown accent '{}'", rest))?,
            ),
            "go" => Command::Go(if rest.is_empty() { "/".into() } else { rest.into() }),
            "like" => Command::Like(position(rest)?),
            "comments" => Command::Comments(position(rest)?),
            "comment" => {
                let (n, text) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
                Command::Comment(position(n)?, text.trim().to_string())
            }
            "share" => Command::Share(position(rest)?),
            "story" => Command::Story(position(rest)?),
            "next" => Command::Next,
            "prev" => Command::Prev,
            "close" => Command::Close,
            "tap" => Command::Tap(rest.parse().with_context(|| format!("bad tap position '{}'", rest))?),
            "search" => Command::Search(rest.to_string()),
            "select" => Command::Select(position(rest)?),
            "send" => Command::Send(rest.to_string()),
            "filter" => Command::Filter,
            "read" => Command::Read(position(rest)?),
            "readall" => Command::ReadAll,
            "tab" => Command::Tab(ProfileTab::parse(rest).ok_or_else(|| anyhow!("unknown tab '{}'", rest))?),
            "" | "show" => Command::Show,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => bail!("unknown command '{}', try 'help'", other),
        };
        Ok(command)
    }
}

/// 1-based list position, returned 0-based.
fn position(arg: &str) -> Result<usize> {
    let n: usize = arg
        .parse()
        .with_context(|| format!("expected a list position, got '{}'", arg))?;
    if n == 0 {
        bail!("list positions start at 1");
    }
    Ok(n - 1)
}
