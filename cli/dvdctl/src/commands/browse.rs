//! Interactive catalog browser.
//!
//! Shows the catalog and waits for commands on stdin. The list is only
//! re-fetched when the user asks for it.

use std::io::Write;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use crate::client::ApiClient;
use crate::error::{print_error, CliError};
use crate::output::{print_info, print_output, print_success};

use super::films::{fetch_films, submit_film, CreateFilmRequest};
use super::CommandContext;

/// Interactive browser.
#[derive(Debug, Args)]
pub struct BrowseCommand {
    /// Only show films by this director.
    #[arg(long)]
    director: Option<String>,
}

/// A browser command entered at the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
enum BrowseAction {
    Refresh,
    Add,
    Quit,
    Unknown(String),
}

impl BrowseAction {
    fn parse(line: &str) -> Self {
        match line.trim().to_ascii_lowercase().as_str() {
            "" | "r" | "refresh" => Self::Refresh,
            "a" | "add" => Self::Add,
            "q" | "quit" | "exit" => Self::Quit,
            other => Self::Unknown(other.to_string()),
        }
    }
}

type Input = Lines<BufReader<Stdin>>;

impl BrowseCommand {
    pub async fn run(self, ctx: CommandContext) -> Result<()> {
        let client = ctx.client()?;
        let mut input = BufReader::new(tokio::io::stdin()).lines();

        show_catalog(&client, &ctx, self.director.as_deref()).await;

        loop {
            let Some(line) = prompt(&mut input, "[r]efresh, [a]dd, [q]uit").await? else {
                return Ok(());
            };

            match BrowseAction::parse(&line) {
                BrowseAction::Refresh => {
                    show_catalog(&client, &ctx, self.director.as_deref()).await;
                }
                BrowseAction::Add => {
                    let Some(request) = read_new_film(&mut input).await? else {
                        return Ok(());
                    };
                    match submit_film(&client, &request).await {
                        Ok(film) => {
                            print_success(&format!("Added '{}' ({})", film.title, film.id));
                            print_info("Press r to refresh the list.");
                        }
                        Err(e) => report(e),
                    }
                }
                BrowseAction::Quit => return Ok(()),
                BrowseAction::Unknown(command) => {
                    eprintln!("{} unknown command '{}'", "Error:".red().bold(), command);
                }
            }
        }
    }
}

async fn show_catalog(client: &ApiClient, ctx: &CommandContext, director: Option<&str>) {
    match fetch_films(client, director).await {
        Ok(films) => print_output(&films, ctx.format),
        Err(e) => report(e),
    }
}

fn report(err: CliError) {
    print_error(&anyhow::Error::new(err));
}

/// Print a prompt and read one line. `None` means stdin is closed.
async fn prompt(input: &mut Input, label: &str) -> Result<Option<String>> {
    print!("{} ", format!("{label}>").bold());
    std::io::stdout().flush().context("Failed to flush stdout")?;

    input.next_line().await.context("Failed to read from stdin")
}

/// Ask for a field until the answer parses.
async fn prompt_until<T>(
    input: &mut Input,
    label: &str,
    parse: impl Fn(&str) -> Result<T, String>,
) -> Result<Option<T>> {
    loop {
        let Some(line) = prompt(input, label).await? else {
            return Ok(None);
        };
        match parse(&line) {
            Ok(value) => return Ok(Some(value)),
            Err(message) => eprintln!("{} {}", "Error:".red().bold(), message),
        }
    }
}

async fn read_new_film(input: &mut Input) -> Result<Option<CreateFilmRequest>> {
    let Some(title) = prompt_until(input, "Title", parse_required).await? else {
        return Ok(None);
    };
    let Some(year) = prompt_until(input, "Year", parse_year).await? else {
        return Ok(None);
    };
    let Some(location) = prompt_until(input, "Location", parse_required).await? else {
        return Ok(None);
    };
    let Some(available) = prompt_until(input, "Available (y/n)", parse_available).await? else {
        return Ok(None);
    };
    let Some(director) = prompt_until(input, "Director (optional)", parse_optional).await? else {
        return Ok(None);
    };

    Ok(Some(CreateFilmRequest {
        title,
        year,
        location,
        available,
        director,
    }))
}

fn parse_required(value: &str) -> Result<String, String> {
    let value = value.trim();
    if value.is_empty() {
        Err("a value is required".to_string())
    } else {
        Ok(value.to_string())
    }
}

fn parse_optional(value: &str) -> Result<Option<String>, String> {
    Ok(parse_required(value).ok())
}

fn parse_year(value: &str) -> Result<i32, String> {
    value
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a year", value.trim()))
}

fn parse_available(value: &str) -> Result<bool, String> {
    match value.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" | "true" => Ok(true),
        "n" | "no" | "false" => Ok(false),
        other => Err(format!("'{other}' is not y or n")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_action() {
        assert_eq!(BrowseAction::parse(""), BrowseAction::Refresh);
        assert_eq!(BrowseAction::parse(" R "), BrowseAction::Refresh);
        assert_eq!(BrowseAction::parse("a"), BrowseAction::Add);
        assert_eq!(BrowseAction::parse("quit"), BrowseAction::Quit);
        assert_eq!(
            BrowseAction::parse("delete"),
            BrowseAction::Unknown("delete".to_string())
        );
    }

    #[test]
    fn test_parse_required() {
        assert_eq!(parse_required("  Test Film "), Ok("Test Film".to_string()));
        assert!(parse_required("   ").is_err());
    }

    #[test]
    fn test_parse_optional() {
        assert_eq!(parse_optional(""), Ok(None));
        assert_eq!(
            parse_optional("Agnès Varda"),
            Ok(Some("Agnès Varda".to_string()))
        );
    }

    #[test]
    fn test_parse_year() {
        assert_eq!(parse_year("2023"), Ok(2023));
        assert_eq!(parse_year(" 1999\n"), Ok(1999));
        assert!(parse_year("next year").is_err());
    }

    #[test]
    fn test_parse_available() {
        assert_eq!(parse_available("Y"), Ok(true));
        assert_eq!(parse_available("false"), Ok(false));
        assert!(parse_available("maybe").is_err());
    }
}
