//! Nutrition Tracker
//!
//! Command-line front end for the remote nutrition API: lists foods, recipes,
//! meals, exercises and weigh-ins with search, sort, date range and paging.

use std::sync::Arc;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use nutrition_tracker::api::{HttpTransport, Transport};
use nutrition_tracker::build_info::{self, BuildInfo};
use nutrition_tracker::commands::{exercises, foods, meals, recipes, weights, ListArgs};
use nutrition_tracker::models::{ExerciseName, ExerciseType};
use nutrition_tracker::services::{Services, Store};

#[derive(Debug, Parser)]
#[command(name = "nutrition-tracker", version, about = "Nutrition and training log client")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List foods
    Foods(ListArgs),
    /// Show one food, optionally scaled to an amount in its serving unit
    Food {
        id: String,
        #[arg(long)]
        amount: Option<f64>,
    },
    /// List recipes
    Recipes(ListArgs),
    /// Show one recipe with its parts
    Recipe { id: String },
    /// List meals
    Meals(ListArgs),
    /// Show the entries of one meal
    Meal { id: String },
    /// Nutrient totals per day
    Daily(ListArgs),
    /// List exercises
    Exercises {
        #[command(flatten)]
        list: ListArgs,
        /// Only this activity type (lift, cardio or stretch)
        #[arg(long)]
        activity: Option<String>,
    },
    /// Volume, average and best weight for one movement
    ExerciseStats {
        /// Movement name, e.g. "bench press" or BenchPress
        name: String,
        #[command(flatten)]
        list: ListArgs,
    },
    /// List weigh-ins with the trend over the selected window
    Weights(ListArgs),
    /// Print build details
    Version,
}

fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr so stdout stays valid JSON
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("nutrition_tracker=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Command::Version = cli.command {
        return print_json(&BuildInfo::current());
    }

    build_info::print_startup_banner();

    let transport = HttpTransport::from_env()?;
    info!("Using API at {}", transport.config().base_url);
    let transport: Arc<dyn Transport> = Arc::new(transport);
    let mut services = Services::new(transport);

    match cli.command {
        Command::Foods(args) => print_json(&foods::list_foods(&mut services.foods, &args).await?),
        Command::Food { id, amount } => print_json(&foods::show_food(&services.foods, &id, amount).await?),
        Command::Recipes(args) => {
            let mut store = Store::new(services.recipes);
            print_json(&recipes::list_recipes(&mut store, &args).await?)
        }
        Command::Recipe { id } => print_json(&recipes::show_recipe(&services.recipes, &id).await?),
        Command::Meals(args) => {
            let mut store = Store::new(services.meals);
            print_json(&meals::list_meals(&mut store, &args).await?)
        }
        Command::Meal { id } => {
            let store = Store::new(services.meals);
            print_json(&meals::meal_entries(&store, &id).await?)
        }
        Command::Daily(args) => {
            let mut store = Store::new(services.meals);
            print_json(&meals::daily_totals(&mut store, &args).await?)
        }
        Command::Exercises { list, activity } => {
            let activity = match activity {
                Some(name) => Some(
                    ExerciseType::from_str(&name).ok_or_else(|| format!("Unknown activity type: {}", name))?,
                ),
                None => None,
            };
            let mut store = Store::new(services.exercises);
            print_json(&exercises::list_exercises(&mut store, &list, activity).await?)
        }
        Command::ExerciseStats { name, list } => {
            let movement = ExerciseName::from_str(&name).ok_or_else(|| format!("Unknown exercise: {}", name))?;
            let mut store = Store::new(services.exercises);
            print_json(&exercises::exercise_stats(&mut store, movement, &list).await?)
        }
        Command::Weights(args) => {
            let mut store = Store::new(services.weights);
            print_json(&weights::list_weights(&mut store, &args).await?)
        }
        Command::Version => Ok(()),
    }
}
