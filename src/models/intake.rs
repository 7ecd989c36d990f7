//! Daily intake
//!
//! All meals of one calendar day with their combined totals.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use super::{MacroBreakdown, Meal, NutrientProfile};

/// One day of meals
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Intake {
    date: NaiveDate,
    meals: Vec<Meal>,
    totals: NutrientProfile,
}

impl Intake {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            meals: Vec::new(),
            totals: NutrientProfile::zero(),
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn meals(&self) -> &[Meal] {
        &self.meals
    }

    pub fn totals(&self) -> &NutrientProfile {
        &self.totals
    }

    pub fn add_meal(&mut self, meal: Meal) -> &mut Self {
        self.meals.push(meal);
        self.calculate_totals();
        self
    }

    pub fn set_meals(&mut self, meals: Vec<Meal>) -> &mut Self {
        self.meals = meals;
        self.calculate_totals();
        self
    }

    pub fn remove_meal(&mut self, meal_id: &str) -> Option<Meal> {
        let index = self.meals.iter().position(|m| m.id() == meal_id)?;
        let removed = self.meals.remove(index);
        self.calculate_totals();
        Some(removed)
    }

    pub fn get_meal(&self, meal_id: &str) -> Option<&Meal> {
        self.meals.iter().find(|m| m.id() == meal_id)
    }

    fn calculate_totals(&mut self) {
        self.totals = self.meals.iter().map(|m| *m.totals()).sum();
    }

    /// Sum of each meal's entry calories
    pub fn total_calories(&self) -> i64 {
        self.meals.iter().map(Meal::total_calories).sum()
    }

    /// Calories of the day's summed totals
    pub fn calories(&self) -> i64 {
        self.totals.calories()
    }

    pub fn macro_breakdown(&self) -> MacroBreakdown {
        self.totals.macro_breakdown()
    }

    pub fn has_meals(&self) -> bool {
        !self.meals.is_empty()
    }

    pub fn meal_count(&self) -> usize {
        self.meals.len()
    }

    /// Bucket meals by UTC calendar day, oldest day first. Meals keep their
    /// input order within a day.
    pub fn group_by_day(meals: Vec<Meal>) -> Vec<Intake> {
        let mut days: BTreeMap<NaiveDate, Intake> = BTreeMap::new();
        for meal in meals {
            let date = meal.date().date_naive();
            days.entry(date)
                .or_insert_with(|| Intake::new(date))
                .meals
                .push(meal);
        }

        days.into_values()
            .map(|mut intake| {
                intake.calculate_totals();
                intake
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Food;
    use chrono::{TimeZone, Utc};

    fn meal(id: &str, day: u32, hour: u32, protein_grams: f64) -> Meal {
        let date = Utc.with_ymd_and_hms(2025, 4, day, hour, 0, 0).unwrap();
        let food = Food::new("p").with_serving(1.0, "g").with_protein(1.0);
        let mut meal = Meal::new(id, date);
        meal.add_entry(food, protein_grams, "g");
        meal
    }

    #[test]
    fn test_empty_intake() {
        let intake = Intake::new(NaiveDate::from_ymd_opt(2025, 4, 1).unwrap());
        assert!(!intake.has_meals());
        assert_eq!(intake.meal_count(), 0);
        assert_eq!(intake.calories(), 0);
        assert_eq!(intake.macro_breakdown(), MacroBreakdown::default());
    }

    #[test]
    fn test_totals_follow_meals() {
        let mut intake = Intake::new(NaiveDate::from_ymd_opt(2025, 4, 1).unwrap());
        intake.add_meal(meal("a", 1, 8, 20.0));
        intake.add_meal(meal("b", 1, 13, 30.0));
        assert_eq!(intake.totals().protein, 50.0);
        assert_eq!(intake.total_calories(), 200);
        assert_eq!(intake.calories(), 200);
        assert_eq!(intake.macro_breakdown().protein, 100);

        intake.remove_meal("a");
        assert_eq!(intake.totals().protein, 30.0);
        assert!(intake.get_meal("a").is_none());
        assert!(intake.get_meal("b").is_some());
    }

    #[test]
    fn test_group_by_day_orders_days() {
        let meals = vec![
            meal("late", 3, 9, 10.0),
            meal("early", 1, 19, 5.0),
            meal("early-2", 1, 7, 7.0),
        ];
        let days = Intake::group_by_day(meals);

        assert_eq!(days.len(), 2);
        assert_eq!(days[0].date(), NaiveDate::from_ymd_opt(2025, 4, 1).unwrap());
        assert_eq!(days[0].meal_count(), 2);
        assert_eq!(days[0].meals()[0].id(), "early");
        assert_eq!(days[0].totals().protein, 12.0);
        assert_eq!(days[1].totals().protein, 10.0);
    }
}
