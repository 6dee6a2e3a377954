//! Shell command parsing.

use thiserror::Error;

use pawmatch_core::{parse_age_input, parse_zip_input, FilterSet, SortKey};

/// One parsed shell line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Login { name: String, email: String },
    /// Toggle a breed, or list breeds when no name is given.
    Breed(Option<String>),
    Age { min: Option<u32>, max: Option<u32> },
    Zip(Option<String>),
    /// Set the sort key, or list sort options when none is given.
    Sort(Option<SortKey>),
    Apply(FilterSet),
    Clear,
    Page(u32),
    Next,
    Prev,
    /// Toggle a favorite by dog id or card number.
    Fav(String),
    Favs,
    Match,
    Back,
    Logout,
    Show,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command '{0}'. Type 'help' for a list of commands.")]
    Unknown(String),

    #[error("Usage: {0}")]
    Usage(&'static str),

    #[error("{0}")]
    Invalid(String),

    #[error("'{0}' is not available on this screen. Type 'help' for a list of commands.")]
    Unavailable(&'static str),
}

impl From<pawmatch_core::Error> for CommandError {
    fn from(e: pawmatch_core::Error) -> Self {
        CommandError::Invalid(e.user_message())
    }
}

const LOGIN_USAGE: &str = "login <name> <email>";
const AGE_USAGE: &str = "age <min|-> <max|->";
const ZIP_USAGE: &str = "zip <code|->";
const PAGE_USAGE: &str = "page <n>";
const FAV_USAGE: &str = "fav <id|#>";
const APPLY_USAGE: &str = "apply [breeds=A,B] [; age=MIN-MAX] [; zip=CODE] [; sort=field:dir]";

impl Command {
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let line = line.trim();
        let (keyword, rest) = match line.split_once(char::is_whitespace) {
            Some((keyword, rest)) => (keyword, rest.trim()),
            None => (line, ""),
        };

        let command = match keyword.to_lowercase().as_str() {
            "login" => parse_login(rest)?,
            "breed" | "breeds" => Command::Breed(Some(rest.to_string()).filter(|b| !b.is_empty())),
            "age" => {
                let parts: Vec<&str> = rest.split_whitespace().collect();
                match parts.as_slice() {
                    [min, max] => Command::Age {
                        min: parse_age_input(min)?,
                        max: parse_age_input(max)?,
                    },
                    _ => return Err(CommandError::Usage(AGE_USAGE)),
                }
            }
            "zip" => {
                if rest.is_empty() {
                    return Err(CommandError::Usage(ZIP_USAGE));
                }
                Command::Zip(parse_zip_input(rest))
            }
            "sort" => {
                if rest.is_empty() {
                    Command::Sort(None)
                } else {
                    Command::Sort(Some(rest.parse()?))
                }
            }
            "apply" | "search" => Command::Apply(parse_filter_set(rest)?),
            "clear" => Command::Clear,
            "page" => {
                let page = rest.parse::<u32>().map_err(|_| CommandError::Usage(PAGE_USAGE))?;
                Command::Page(page)
            }
            "next" => Command::Next,
            "prev" | "previous" => Command::Prev,
            "fav" => {
                if rest.is_empty() {
                    return Err(CommandError::Usage(FAV_USAGE));
                }
                Command::Fav(rest.to_string())
            }
            "favs" | "favorites" => Command::Favs,
            "match" => Command::Match,
            "back" => Command::Back,
            "logout" => Command::Logout,
            "show" | "ls" => Command::Show,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(command)
    }

    /// Keyword used in messages.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Login { .. } => "login",
            Command::Breed(_) => "breed",
            Command::Age { .. } => "age",
            Command::Zip(_) => "zip",
            Command::Sort(_) => "sort",
            Command::Apply(_) => "apply",
            Command::Clear => "clear",
            Command::Page(_) => "page",
            Command::Next => "next",
            Command::Prev => "prev",
            Command::Fav(_) => "fav",
            Command::Favs => "favs",
            Command::Match => "match",
            Command::Back => "back",
            Command::Logout => "logout",
            Command::Show => "show",
            Command::Help => "help",
            Command::Quit => "quit",
        }
    }
}

// The email is the last word; everything before it is the name.
fn parse_login(rest: &str) -> Result<Command, CommandError> {
    let (name, email) = rest
        .rsplit_once(char::is_whitespace)
        .ok_or(CommandError::Usage(LOGIN_USAGE))?;
    Ok(Command::Login {
        name: name.trim().to_string(),
        email: email.trim().to_string(),
    })
}

/// Parse `breeds=A,B; age=2-5; zip=02139; sort=age:asc`. Omitted fields
/// take their default, as when submitting the whole filter panel.
fn parse_filter_set(rest: &str) -> Result<FilterSet, CommandError> {
    let mut set = FilterSet::default();
    for clause in rest.split(';').map(str::trim).filter(|c| !c.is_empty()) {
        let (key, value) = clause
            .split_once('=')
            .ok_or(CommandError::Usage(APPLY_USAGE))?;
        let value = value.trim();
        match key.trim().to_lowercase().as_str() {
            "breed" | "breeds" => {
                set.breeds = value
                    .split(',')
                    .map(str::trim)
                    .filter(|b| !b.is_empty())
                    .map(str::to_string)
                    .collect();
            }
            "age" => {
                let (min, max) = value.split_once('-').unwrap_or((value, ""));
                set.age_min = parse_age_input(min)?;
                set.age_max = parse_age_input(max)?;
            }
            "zip" => set.zip_code = parse_zip_input(value),
            "sort" => set.sort = value.parse()?,
            _ => return Err(CommandError::Usage(APPLY_USAGE)),
        }
    }
    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_takes_last_word_as_email() {
        assert_eq!(
            Command::parse("login Ada Lovelace ada@example.com").unwrap(),
            Command::Login {
                name: "Ada Lovelace".to_string(),
                email: "ada@example.com".to_string()
            }
        );
        assert_eq!(
            Command::parse("login ada@example.com"),
            Err(CommandError::Usage(LOGIN_USAGE))
        );
    }

    #[test]
    fn test_breed_keeps_spaces() {
        assert_eq!(
            Command::parse("breed German Shepherd").unwrap(),
            Command::Breed(Some("German Shepherd".to_string()))
        );
        assert_eq!(Command::parse("breed").unwrap(), Command::Breed(None));
    }

    #[test]
    fn test_age_dash_clears_bound() {
        assert_eq!(
            Command::parse("age - 5").unwrap(),
            Command::Age {
                min: None,
                max: Some(5)
            }
        );
        assert_eq!(Command::parse("age 2"), Err(CommandError::Usage(AGE_USAGE)));
        assert!(matches!(
            Command::parse("age two 5"),
            Err(CommandError::Invalid(_))
        ));
    }

    #[test]
    fn test_zip_dash_clears() {
        assert_eq!(Command::parse("zip -").unwrap(), Command::Zip(None));
        assert_eq!(
            Command::parse("zip 02139").unwrap(),
            Command::Zip(Some("02139".to_string()))
        );
    }

    #[test]
    fn test_sort_parses_key() {
        assert_eq!(
            Command::parse("sort name:desc").unwrap(),
            Command::Sort(Some("name:desc".parse().unwrap()))
        );
        assert_eq!(Command::parse("sort").unwrap(), Command::Sort(None));
        assert!(matches!(
            Command::parse("sort weight:asc"),
            Err(CommandError::Invalid(_))
        ));
    }

    #[test]
    fn test_apply_full_panel() {
        let command = Command::parse("apply breeds=Beagle, Pug; age=2-5; zip=02139; sort=age:asc")
            .unwrap();
        assert_eq!(
            command,
            Command::Apply(FilterSet {
                breeds: vec!["Beagle".to_string(), "Pug".to_string()],
                age_min: Some(2),
                age_max: Some(5),
                zip_code: Some("02139".to_string()),
                sort: "age:asc".parse().unwrap(),
            })
        );
    }

    #[test]
    fn test_apply_partial_panel_uses_defaults() {
        let Command::Apply(set) = Command::parse("apply age=3-").unwrap() else {
            panic!("expected apply");
        };
        assert!(set.breeds.is_empty());
        assert_eq!(set.age_min, Some(3));
        assert_eq!(set.age_max, None);
        assert_eq!(set.sort, SortKey::default());

        assert_eq!(Command::parse("apply").unwrap(), Command::Apply(FilterSet::default()));
        assert_eq!(
            Command::parse("apply color=red"),
            Err(CommandError::Usage(APPLY_USAGE))
        );
    }

    #[test]
    fn test_page_requires_number() {
        assert_eq!(Command::parse("page 3").unwrap(), Command::Page(3));
        assert_eq!(Command::parse("page x"), Err(CommandError::Usage(PAGE_USAGE)));
    }

    #[test]
    fn test_keywords_case_insensitive() {
        assert_eq!(Command::parse("  NEXT ").unwrap(), Command::Next);
        assert_eq!(Command::parse("Quit").unwrap(), Command::Quit);
    }

    #[test]
    fn test_unknown_command() {
        assert_eq!(
            Command::parse("bark"),
            Err(CommandError::Unknown("bark".to_string()))
        );
    }
}
