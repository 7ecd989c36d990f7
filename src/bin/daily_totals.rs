//! Print calories and macros per day for a date window
//! Usage: cargo run --bin daily_totals -- [from] [to]

use std::sync::Arc;

use chrono::{Duration, NaiveDate, Utc};
use tracing_subscriber::EnvFilter;

use nutrition_tracker::api::HttpTransport;
use nutrition_tracker::commands::{meals, ListArgs};
use nutrition_tracker::services::{EntityService, Store};

fn parse_day(arg: Option<&String>) -> Result<Option<NaiveDate>, chrono::ParseError> {
    arg.map(|s| s.parse()).transpose()
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("nutrition_tracker=warn".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    let today = Utc::now().date_naive();
    let from = parse_day(args.get(1))?.unwrap_or(today - Duration::days(6));
    let to = parse_day(args.get(2))?.unwrap_or(today);

    let transport = Arc::new(HttpTransport::from_env()?);
    let mut store = Store::new(EntityService::new(transport));

    let list = ListArgs {
        from: Some(from),
        to: Some(to),
        ..ListArgs::default()
    };
    let days = meals::daily_totals(&mut store, &list).await?;

    println!("Daily totals {} to {}", from, to);
    if days.is_empty() {
        println!("No meals logged");
        return Ok(());
    }

    for day in &days {
        println!(
            "\n{}  {} kcal over {} meal(s)",
            day.date, day.total_calories, day.meal_count
        );
        println!(
            "  protein {:.1} g, fat {:.1} g, carbs {:.1} g ({}% / {}% / {}%)",
            day.nutrients.protein,
            day.nutrients.fat,
            day.nutrients.carbs,
            day.macro_breakdown.protein,
            day.macro_breakdown.fat,
            day.macro_breakdown.carbs
        );
        for meal in &day.meals {
            println!("    {:<20} {:>5} kcal", meal.name, meal.total_calories);
        }
    }

    let total: i64 = days.iter().map(|d| d.total_calories).sum();
    println!("\nAverage: {} kcal/day over {} logged day(s)", total / days.len() as i64, days.len());

    Ok(())
}
