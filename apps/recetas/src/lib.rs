pub mod render;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use recetas_config::Config;
use recetas_domain::SearchType;
use recetas_service::{
	DeleteRequest, EditRequest, NotesRequest, PersonalRecipeRequest, RecetasService, SearchRequest,
};
use recetas_storage::db::Db;

#[derive(Debug, Parser)]
#[command(
	version = recetas_cli::VERSION,
	rename_all = "kebab",
	styles = recetas_cli::styles(),
)]
pub struct Args {
	#[arg(long, short = 'c', value_name = "FILE")]
	pub config: PathBuf,
	/// Print machine-readable JSON instead of text.
	#[arg(long, global = true)]
	pub json: bool,
	#[command(subcommand)]
	pub command: Command,
}

#[derive(Debug, Subcommand)]
#[command(rename_all = "kebab")]
pub enum Command {
	/// Search the remote catalog.
	Search {
		query: String,
		#[arg(long, short = 'b', value_name = "TYPE", default_value = "name")]
		by: SearchType,
	},
	/// Fetch one random catalog recipe.
	Random {
		/// Also save it to the collection.
		#[arg(long)]
		save: bool,
	},
	/// List catalog categories.
	Categories,
	/// List catalog areas.
	Areas,
	/// Save a catalog recipe by id.
	Save { id: String },
	/// Create a personal recipe.
	New {
		#[arg(long)]
		name: String,
		#[arg(long)]
		category: String,
		#[arg(long)]
		area: String,
		#[arg(long)]
		instructions: String,
		/// `ingredient: measure` or just `ingredient`. Repeat for each ingredient.
		#[arg(long = "ingredient", value_name = "INGREDIENT", required = true)]
		ingredients: Vec<String>,
		#[arg(long)]
		image_url: Option<String>,
	},
	/// Replace the notes of a saved recipe.
	Notes { id: String, notes: String },
	/// Edit fields of a saved recipe.
	Edit {
		id: String,
		#[arg(long)]
		name: Option<String>,
		#[arg(long)]
		category: Option<String>,
		#[arg(long)]
		area: Option<String>,
		#[arg(long)]
		instructions: Option<String>,
		#[arg(long)]
		image_url: Option<String>,
		/// Replaces the whole ingredient list. Repeat for each ingredient.
		#[arg(long = "ingredient", value_name = "INGREDIENT")]
		ingredients: Vec<String>,
	},
	/// Delete a saved recipe.
	Delete { id: String },
	/// List saved recipes, most recently modified first.
	List {
		#[arg(long, conflicts_with_all = ["category", "personal"])]
		name: Option<String>,
		#[arg(long, conflicts_with = "personal")]
		category: Option<String>,
		#[arg(long)]
		personal: bool,
	},
	/// Show one saved recipe.
	Show { id: String },
	/// Show the most recently added or edited recipe.
	Recent,
	/// Collection statistics.
	Count,
}

pub async fn run(args: Args) -> color_eyre::Result<()> {
	let config = recetas_config::load(&args.config)?;

	init_tracing(&config);

	let service = connect(config).await?;
	let output = execute(&service, args.command, args.json).await?;

	println!("{output}");

	Ok(())
}

/// Opens the collection database and restores the recent pointer.
pub async fn connect(config: Config) -> color_eyre::Result<RecetasService> {
	let db = Db::connect(&config.storage.sqlite).await?;

	db.ensure_schema().await?;

	let service = RecetasService::new(config, db)?;

	service.restore_recent().await?;

	Ok(service)
}

/// Runs one command and returns what should be printed.
pub async fn execute(
	service: &RecetasService,
	command: Command,
	json: bool,
) -> color_eyre::Result<String> {
	let out = render::Output::new(json);
	let text = match command {
		Command::Search { query, by } =>
			out.search(&service.search(SearchRequest { query, search_type: by }).await?)?,
		Command::Random { save } => {
			let record = service.random().await?;

			if save {
				out.saved(&service.save_from_catalog(&record).await?)?
			} else {
				out.record(&record)?
			}
		},
		Command::Categories => out.values(&service.categories().await)?,
		Command::Areas => out.values(&service.areas().await)?,
		Command::Save { id } => out.saved(&service.save_by_id(&id).await?)?,
		Command::New { name, category, area, instructions, ingredients, image_url } => {
			let req = PersonalRecipeRequest {
				name,
				category,
				area,
				instructions,
				ingredients: ingredients.join("\n"),
				image_url,
			};

			out.saved(&service.create_personal(req).await?)?
		},
		Command::Notes { id, notes } =>
			out.updated(&service.update_notes(NotesRequest { id, notes }).await?)?,
		Command::Edit { id, name, category, area, instructions, image_url, ingredients } => {
			let ingredients = (!ingredients.is_empty()).then(|| ingredients.join("\n"));
			let req =
				EditRequest { id, name, category, area, instructions, image_url, ingredients };

			out.updated(&service.edit(req).await?)?
		},
		Command::Delete { id } => out.deleted(&service.delete(DeleteRequest { id }).await?)?,
		Command::List { name, category, personal } => {
			let items = match (name, category) {
				(Some(name), _) => service.find_by_name(&name).await?,
				(None, Some(category)) => service.find_by_category(&category).await?,
				(None, None) if personal => service.personal().await?,
				(None, None) => service.collection().await?,
			};

			out.items(&items)?
		},
		Command::Show { id } => match service.get(&id).await? {
			Some(item) => out.item(&item)?,
			None => return Err(color_eyre::eyre::eyre!("No saved recipe with id {id}.")),
		},
		Command::Recent => out.recent(service.recent().as_ref())?,
		Command::Count => out.stats(&service.stats().await?)?,
	};

	Ok(text)
}

fn init_tracing(config: &Config) {
	let filter =
		EnvFilter::try_new(&config.service.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
	let _ =
		tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).try_init();
}
