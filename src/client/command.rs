//! Parsing of the client's input lines.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Quit,
    /// Toggle between the login and registration forms.
    SwitchForm,
    Login { username: String, password: String },
    Register { username: String, password: String },
    Add { title: String },
    Toggle { id: u32 },
    Edit { id: u32 },
    Save { title: String },
    Cancel,
    Delete { id: u32 },
    Refresh,
    Logout,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command `{0}` (try `help`)")]
    Unknown(String),
    #[error("`{command}` needs {argument}")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },
    #[error("`{0}` is not a todo id")]
    InvalidId(String),
}

/// Splits off the first whitespace-delimited word.
fn split_word(input: &str) -> (&str, &str) {
    let input = input.trim_start();
    match input.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest),
        None => (input, ""),
    }
}

fn credentials(
    command: &'static str,
    rest: &str,
) -> Result<(String, String), CommandError> {
    let (username, password) = split_word(rest);
    if username.is_empty() {
        return Err(CommandError::MissingArgument {
            command,
            argument: "a username and a password",
        });
    }
    // Passwords may contain spaces; only the separator is dropped.
    let password = password.trim_start();
    if password.is_empty() {
        return Err(CommandError::MissingArgument {
            command,
            argument: "a password",
        });
    }
    Ok((username.to_string(), password.to_string()))
}

fn todo_id(command: &'static str, rest: &str) -> Result<u32, CommandError> {
    let raw = rest.trim();
    if raw.is_empty() {
        return Err(CommandError::MissingArgument {
            command,
            argument: "a todo id",
        });
    }
    raw.parse()
        .map_err(|_| CommandError::InvalidId(raw.to_string()))
}

/// Parses one input line. Blank lines yield `Ok(None)`.
pub fn parse(line: &str) -> Result<Option<Command>, CommandError> {
    let (word, rest) = split_word(line.trim_end_matches(['\r', '\n']));
    let command = match word {
        "" => return Ok(None),
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        "switch" => Command::SwitchForm,
        "login" => {
            let (username, password) = credentials("login", rest)?;
            Command::Login { username, password }
        }
        "register" => {
            let (username, password) = credentials("register", rest)?;
            Command::Register { username, password }
        }
        // Titles are passed through untrimmed; the reducer decides what is empty.
        "add" => Command::Add {
            title: rest.to_string(),
        },
        "toggle" => Command::Toggle {
            id: todo_id("toggle", rest)?,
        },
        "edit" => Command::Edit {
            id: todo_id("edit", rest)?,
        },
        "save" => Command::Save {
            title: rest.to_string(),
        },
        "cancel" => Command::Cancel,
        "delete" | "rm" => Command::Delete {
            id: todo_id("delete", rest)?,
        },
        "refresh" | "ls" => Command::Refresh,
        "logout" => Command::Logout,
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(Some(command))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_line_is_no_command() {
        assert_eq!(parse("   \n"), Ok(None));
    }

    #[test]
    fn test_parse_login_keeps_spaces_in_password() {
        assert_eq!(
            parse("login alice correct horse").unwrap(),
            Some(Command::Login {
                username: "alice".to_string(),
                password: "correct horse".to_string(),
            })
        );
    }

    #[test]
    fn test_parse_register_requires_password() {
        assert_eq!(
            parse("register alice"),
            Err(CommandError::MissingArgument {
                command: "register",
                argument: "a password",
            })
        );
    }

    #[test]
    fn test_parse_add_keeps_raw_title() {
        assert_eq!(
            parse("add buy milk  ").unwrap(),
            Some(Command::Add {
                title: "buy milk  ".to_string(),
            })
        );
        assert_eq!(
            parse("add").unwrap(),
            Some(Command::Add {
                title: String::new(),
            })
        );
    }

    #[test]
    fn test_parse_ids() {
        assert_eq!(parse("toggle 3").unwrap(), Some(Command::Toggle { id: 3 }));
        assert_eq!(parse("rm 4").unwrap(), Some(Command::Delete { id: 4 }));
        assert_eq!(
            parse("edit three"),
            Err(CommandError::InvalidId("three".to_string()))
        );
        assert!(matches!(
            parse("delete"),
            Err(CommandError::MissingArgument { .. })
        ));
    }

    #[test]
    fn test_unknown_command() {
        assert_eq!(
            parse("fly away"),
            Err(CommandError::Unknown("fly".to_string()))
        );
    }
}
