/// A line of terminal input, parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Replace the draft query.
    Type(String),
    /// Confirm the current draft query.
    Submit,
    /// Replace the draft query and confirm it.
    Search(String),
    /// Dismiss the story at a 1-based list position.
    Dismiss(usize),
    /// Serialized stories action, relayed to the reducer.
    Action(String),
    Show,
    Help,
    Quit,
    Unknown(String),
    Empty,
}

pub const HELP: &str = "\
Commands:
  type <text>      edit the search term (saved for next time)
  submit           search for the current term
  search <text>    edit the search term and search
  rm <n>           dismiss the story at position n (alias: dismiss)
  action <json>    dispatch a raw stories action
  show             redraw the list
  help             show this help
  quit             leave (alias: exit)";

pub fn parse_command(line: &str) -> Command {
    let line = line.trim_end_matches(['\r', '\n']);
    let trimmed = line.trim_start();
    if trimmed.trim().is_empty() {
        return Command::Empty;
    }

    let (word, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest),
        None => (trimmed, ""),
    };

    match word.to_ascii_lowercase().as_str() {
        "type" => Command::Type(rest.to_string()),
        "submit" if rest.trim().is_empty() => Command::Submit,
        "search" => Command::Search(rest.to_string()),
        "rm" | "dismiss" => match rest.trim().parse::<usize>() {
            Ok(position) if position > 0 => Command::Dismiss(position),
            _ => Command::Unknown(line.to_string()),
        },
        "action" => Command::Action(rest.trim().to_string()),
        "show" => Command::Show,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        _ => Command::Unknown(line.to_string()),
    }
}
