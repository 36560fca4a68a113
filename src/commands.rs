//! Line commands understood by the interactive binary.

use std::path::PathBuf;

use chrono::NaiveDate;
use thiserror::Error;

use crate::generator::{Filter, SearchFilters};
use crate::meal_plan::MealId;
use crate::recipe::RecipeId;

pub const HELP: &str = "\
commands:
  pantry                     list pantry items
  add <item>                 add a pantry item
  remove <item>              remove a pantry item (exact name)
  rename <old> -> <new>      rename a pantry item
  find [cuisine] [/ diet]    generate recipes from the pantry
  results                    show the last search results
  select <n>                 select search result n (1-based)
  select favorite <id>       select a favorite by recipe id
  select meal <meal-id>      select the recipe of a planned meal
  show                       show the selected recipe
  back                       clear the selection
  favorite                   toggle the selected recipe as a favorite
  favorites                  list favorites
  plan <YYYY-MM-DD>          plan the selected recipe on a date
  meals                      list planned meals
  week [YYYY-MM-DD]          show seven days of the plan
  unplan <meal-id>           remove a planned meal
  shopping                   show the shopping list
  refresh                    recompute the shopping list
  image <path>               replace the selected recipe's image
  profile                    show the user and store counts
  logout                     log out and clear the selection
  help                       show this help
  quit                       leave";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Pantry,
    Add(String),
    Remove(String),
    Rename { old: String, new: String },
    Find(SearchFilters),
    Results,
    Select(usize),
    SelectFavorite(RecipeId),
    SelectMeal(MealId),
    Show,
    Back,
    Favorite,
    Favorites,
    Plan(NaiveDate),
    Meals,
    Week(Option<NaiveDate>),
    Unplan(MealId),
    Shopping,
    Refresh,
    Image(PathBuf),
    Profile,
    Logout,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command {0:?}, try `help`")]
    Unknown(String),
    #[error("`{command}` needs {expected}")]
    MissingArgument {
        command: &'static str,
        expected: &'static str,
    },
    #[error("invalid date {0:?}, expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("invalid number {0:?}")]
    InvalidNumber(String),
    #[error("invalid meal id {0:?}")]
    InvalidMealId(String),
}

fn required<'a>(
    rest: &'a str,
    command: &'static str,
    expected: &'static str,
) -> Result<&'a str, CommandError> {
    if rest.is_empty() {
        Err(CommandError::MissingArgument { command, expected })
    } else {
        Ok(rest)
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate, CommandError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| CommandError::InvalidDate(raw.to_string()))
}

fn parse_meal_id(raw: &str) -> Result<MealId, CommandError> {
    raw.parse()
        .map_err(|_| CommandError::InvalidMealId(raw.to_string()))
}

fn parse_select(rest: &str) -> Result<Command, CommandError> {
    let raw = required(rest, "select", "a result number, `favorite <id>` or `meal <meal-id>`")?;
    let (word, arg) = raw.split_once(char::is_whitespace).unwrap_or((raw, ""));
    let arg = arg.trim();
    match word.to_ascii_lowercase().as_str() {
        "favorite" | "fav" => Ok(Command::SelectFavorite(RecipeId::new(required(
            arg,
            "select favorite",
            "a recipe id",
        )?))),
        "meal" => Ok(Command::SelectMeal(parse_meal_id(required(
            arg,
            "select meal",
            "a meal id",
        )?)?)),
        _ => match raw.parse::<usize>() {
            Ok(n) if n > 0 => Ok(Command::Select(n - 1)),
            _ => Err(CommandError::InvalidNumber(raw.to_string())),
        },
    }
}

fn parse_filters(rest: &str) -> SearchFilters {
    let (cuisine, diet) = rest.split_once('/').unwrap_or((rest, ""));
    SearchFilters {
        cuisine: cuisine.parse().unwrap_or(Filter::Any),
        diet: diet.parse().unwrap_or(Filter::Any),
    }
}

/// Parses one input line. Blank lines yield `Ok(None)`.
pub fn parse(line: &str) -> Result<Option<Command>, CommandError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();

    let command = match word.to_ascii_lowercase().as_str() {
        "pantry" => Command::Pantry,
        "add" => Command::Add(required(rest, "add", "an item name")?.to_string()),
        "remove" => Command::Remove(required(rest, "remove", "an item name")?.to_string()),
        "rename" => {
            let (old, new) = rest
                .split_once("->")
                .map(|(old, new)| (old.trim(), new.trim()))
                .filter(|(old, new)| !old.is_empty() && !new.is_empty())
                .ok_or(CommandError::MissingArgument {
                    command: "rename",
                    expected: "`<old> -> <new>`",
                })?;
            Command::Rename {
                old: old.to_string(),
                new: new.to_string(),
            }
        }
        "find" => Command::Find(parse_filters(rest)),
        "results" => Command::Results,
        "select" => parse_select(rest)?,
        "show" => Command::Show,
        "back" => Command::Back,
        "favorite" | "fav" => Command::Favorite,
        "favorites" => Command::Favorites,
        "plan" => Command::Plan(parse_date(required(rest, "plan", "a date")?)?),
        "meals" => Command::Meals,
        "week" => Command::Week(if rest.is_empty() {
            None
        } else {
            Some(parse_date(rest)?)
        }),
        "unplan" => {
            Command::Unplan(parse_meal_id(required(rest, "unplan", "a meal id")?)?)
        }
        "shopping" => Command::Shopping,
        "refresh" => Command::Refresh,
        "image" => Command::Image(PathBuf::from(required(rest, "image", "a file path")?)),
        "profile" => Command::Profile,
        "logout" => Command::Logout,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        _ => return Err(CommandError::Unknown(word.to_string())),
    };
    Ok(Some(command))
}
