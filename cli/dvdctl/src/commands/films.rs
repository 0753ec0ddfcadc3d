//! Film commands.

use anyhow::Result;
use clap::{ArgAction, Args, Subcommand};
use dvd_id::FilmId;
use serde::{Deserialize, Serialize};
use tabled::Tabled;

use crate::client::ApiClient;
use crate::error::CliError;
use crate::output::{print_output, print_single, print_success};

use super::CommandContext;

/// Film commands.
#[derive(Debug, Args)]
pub struct FilmsCommand {
    #[command(subcommand)]
    command: FilmsSubcommand,
}

#[derive(Debug, Subcommand)]
enum FilmsSubcommand {
    /// List films in the catalog.
    List(ListFilmsArgs),

    /// Find films by exact title.
    Find(FindFilmArgs),

    /// Add a film to the catalog.
    Create(CreateFilmArgs),

    /// Change fields of an existing film.
    Update(UpdateFilmArgs),
}

#[derive(Debug, Args)]
struct ListFilmsArgs {
    /// Only list films by this director.
    #[arg(long)]
    director: Option<String>,
}

#[derive(Debug, Args)]
struct FindFilmArgs {
    /// Film title (exact, case-sensitive).
    title: String,
}

#[derive(Debug, Args)]
struct CreateFilmArgs {
    /// Film title.
    #[arg(long)]
    title: String,

    /// Release year.
    #[arg(long)]
    year: i32,

    /// Where the disc is kept.
    #[arg(long)]
    location: String,

    /// Whether the disc can be borrowed (true or false).
    #[arg(long, action = ArgAction::Set, required = true)]
    available: bool,

    /// Director.
    #[arg(long)]
    director: Option<String>,
}

#[derive(Debug, Args)]
struct UpdateFilmArgs {
    /// Film ID (24 hex characters).
    id: String,

    /// New title.
    #[arg(long)]
    title: Option<String>,

    /// New release year.
    #[arg(long)]
    year: Option<i32>,

    /// New location.
    #[arg(long)]
    location: Option<String>,

    /// New availability (true or false).
    #[arg(long)]
    available: Option<bool>,

    /// New director.
    #[arg(long)]
    director: Option<String>,
}

impl FilmsCommand {
    pub async fn run(self, ctx: CommandContext) -> Result<()> {
        match self.command {
            FilmsSubcommand::List(args) => list_films(ctx, args).await,
            FilmsSubcommand::Find(args) => find_films(ctx, args).await,
            FilmsSubcommand::Create(args) => create_film(ctx, args).await,
            FilmsSubcommand::Update(args) => update_film(ctx, args).await,
        }
    }
}

/// Film record from the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Tabled)]
pub(super) struct FilmRow {
    #[tabled(rename = "ID")]
    pub id: String,

    #[tabled(rename = "Title")]
    pub title: String,

    #[tabled(rename = "Year")]
    pub year: i32,

    #[tabled(rename = "Location")]
    pub location: String,

    #[tabled(rename = "Available", display = "display_available")]
    pub available: bool,

    #[tabled(rename = "Director", display = "display_option")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub director: Option<String>,
}

fn display_available(available: &bool) -> String {
    if *available { "yes" } else { "no" }.to_string()
}

fn display_option(opt: &Option<String>) -> String {
    opt.as_deref().unwrap_or("-").to_string()
}

/// Body for creating a film.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub(super) struct CreateFilmRequest {
    pub title: String,
    pub year: i32,
    pub location: String,
    pub available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub director: Option<String>,
}

/// Body for updating a film; omitted fields keep their stored values.
#[derive(Debug, Default, Serialize)]
struct UpdateFilmRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    available: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    director: Option<String>,
}

/// Fetch the catalog, optionally filtered by director.
pub(super) async fn fetch_films(
    client: &ApiClient,
    director: Option<&str>,
) -> Result<Vec<FilmRow>, CliError> {
    let query: Vec<(&str, &str)> = director.map(|d| ("director", d)).into_iter().collect();
    client.get(client.url(&["films"]), &query).await
}

/// Create a film and return the stored record.
pub(super) async fn submit_film(
    client: &ApiClient,
    request: &CreateFilmRequest,
) -> Result<FilmRow, CliError> {
    client.post(client.url(&["film"]), request).await
}

/// List films.
async fn list_films(ctx: CommandContext, args: ListFilmsArgs) -> Result<()> {
    let client = ctx.client()?;

    let films = fetch_films(&client, args.director.as_deref()).await?;

    print_output(&films, ctx.format);
    Ok(())
}

/// Find films by title.
async fn find_films(ctx: CommandContext, args: FindFilmArgs) -> Result<()> {
    let client = ctx.client()?;

    let films: Vec<FilmRow> = client
        .get(client.url(&["film", args.title.as_str()]), &[])
        .await
        .map_err(|e| match e {
            CliError::Api { status: 404, .. } => CliError::TitleNotFound(args.title.clone()),
            other => other,
        })?;

    print_output(&films, ctx.format);
    Ok(())
}

/// Create a film.
async fn create_film(ctx: CommandContext, args: CreateFilmArgs) -> Result<()> {
    let client = ctx.client()?;

    let request = CreateFilmRequest {
        title: args.title,
        year: args.year,
        location: args.location,
        available: args.available,
        director: args.director,
    };

    let film = submit_film(&client, &request).await?;

    match ctx.format {
        crate::output::OutputFormat::Table => {
            print_success(&format!("Added '{}' ({})", film.title, film.id));
            print_single(&film, ctx.format);
        }
        crate::output::OutputFormat::Json => print_single(&film, ctx.format),
    }
    Ok(())
}

/// Update a film.
async fn update_film(ctx: CommandContext, args: UpdateFilmArgs) -> Result<()> {
    let id = FilmId::parse(&args.id)
        .map_err(|e| anyhow::anyhow!("Invalid film ID '{}': {}", args.id, e))?;

    let client = ctx.client()?;

    let request = UpdateFilmRequest {
        title: args.title,
        year: args.year,
        location: args.location,
        available: args.available,
        director: args.director,
    };

    let id = id.to_string();
    let film: FilmRow = client.put(client.url(&["film", id.as_str()]), &request).await?;

    match ctx.format {
        crate::output::OutputFormat::Table => {
            print_success(&format!("Updated '{}' ({})", film.title, film.id));
            print_single(&film, ctx.format);
        }
        crate::output::OutputFormat::Json => print_single(&film, ctx.format),
    }
    Ok(())
}
