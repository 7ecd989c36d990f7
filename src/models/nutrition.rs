//! Shared nutrition data structure
//!
//! Used across foods, recipes, meal entries, meals and daily intakes.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use super::payload::coerce_f64;

/// Calories per gram of protein
pub const KCAL_PER_G_PROTEIN: f64 = 4.0;
/// Calories per gram of carbohydrate
pub const KCAL_PER_G_CARBS: f64 = 4.0;
/// Calories per gram of fat
pub const KCAL_PER_G_FAT: f64 = 9.0;

/// One named field of a [`NutrientProfile`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Nutrient {
    Protein,
    Fat,
    Carbs,
    Fiber,
    Sugar,
    Sodium,
    VitaminA,
    VitaminB1,
    VitaminB2,
    VitaminB3,
    VitaminB5,
    VitaminB6,
    VitaminB7,
    VitaminB9,
    VitaminB12,
    VitaminC,
    VitaminD,
    VitaminE,
    VitaminK,
    Calcium,
    Iron,
    Magnesium,
    Potassium,
    Zinc,
}

impl Nutrient {
    /// Every nutrient, in wire order
    pub const ALL: [Nutrient; 24] = [
        Nutrient::Protein,
        Nutrient::Fat,
        Nutrient::Carbs,
        Nutrient::Fiber,
        Nutrient::Sugar,
        Nutrient::Sodium,
        Nutrient::VitaminA,
        Nutrient::VitaminB1,
        Nutrient::VitaminB2,
        Nutrient::VitaminB3,
        Nutrient::VitaminB5,
        Nutrient::VitaminB6,
        Nutrient::VitaminB7,
        Nutrient::VitaminB9,
        Nutrient::VitaminB12,
        Nutrient::VitaminC,
        Nutrient::VitaminD,
        Nutrient::VitaminE,
        Nutrient::VitaminK,
        Nutrient::Calcium,
        Nutrient::Iron,
        Nutrient::Magnesium,
        Nutrient::Potassium,
        Nutrient::Zinc,
    ];

    /// Payload key for this nutrient
    pub fn as_str(&self) -> &'static str {
        match self {
            Nutrient::Protein => "protein",
            Nutrient::Fat => "fat",
            Nutrient::Carbs => "carbs",
            Nutrient::Fiber => "fiber",
            Nutrient::Sugar => "sugar",
            Nutrient::Sodium => "sodium",
            Nutrient::VitaminA => "vitaminA",
            Nutrient::VitaminB1 => "vitaminB1",
            Nutrient::VitaminB2 => "vitaminB2",
            Nutrient::VitaminB3 => "vitaminB3",
            Nutrient::VitaminB5 => "vitaminB5",
            Nutrient::VitaminB6 => "vitaminB6",
            Nutrient::VitaminB7 => "vitaminB7",
            Nutrient::VitaminB9 => "vitaminB9",
            Nutrient::VitaminB12 => "vitaminB12",
            Nutrient::VitaminC => "vitaminC",
            Nutrient::VitaminD => "vitaminD",
            Nutrient::VitaminE => "vitaminE",
            Nutrient::VitaminK => "vitaminK",
            Nutrient::Calcium => "calcium",
            Nutrient::Iron => "iron",
            Nutrient::Magnesium => "magnesium",
            Nutrient::Potassium => "potassium",
            Nutrient::Zinc => "zinc",
        }
    }

    /// Case-insensitive lookup by payload key (`vitaminB12`, `vitamin_b12` and `VITAMINB12` all match)
    pub fn from_str(s: &str) -> Option<Self> {
        let wanted = s.replace('_', "").to_lowercase();
        Nutrient::ALL
            .iter()
            .copied()
            .find(|n| n.as_str().to_lowercase() == wanted)
    }
}

/// Nutritional information for one serving (or one computed amount)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NutrientProfile {
    // Macronutrients
    pub protein: f64,   // grams
    pub fat: f64,       // grams
    pub carbs: f64,     // grams
    pub fiber: f64,     // grams
    pub sugar: f64,     // grams
    pub sodium: f64,    // milligrams

    // Vitamins
    pub vitamin_a: f64,
    pub vitamin_b1: f64,
    pub vitamin_b2: f64,
    pub vitamin_b3: f64,
    pub vitamin_b5: f64,
    pub vitamin_b6: f64,
    pub vitamin_b7: f64,
    pub vitamin_b9: f64,
    pub vitamin_b12: f64,
    pub vitamin_c: f64,
    pub vitamin_d: f64,
    pub vitamin_e: f64,
    pub vitamin_k: f64,

    // Minerals
    pub calcium: f64,
    pub iron: f64,
    pub magnesium: f64,
    pub potassium: f64,
    pub zinc: f64,
}

/// Percentage split of the three macronutrients
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacroBreakdown {
    pub protein: i64,
    pub fat: i64,
    pub carbs: i64,
}

/// Round a quantity to one decimal place
pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Calories from macros: `round(protein*4 + carbs*4 + fat*9)`
pub fn calories_from_macros(protein: f64, carbs: f64, fat: f64) -> i64 {
    (protein * KCAL_PER_G_PROTEIN + carbs * KCAL_PER_G_CARBS + fat * KCAL_PER_G_FAT).round() as i64
}

impl NutrientProfile {
    /// Create a new profile with all zeros
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn get(&self, nutrient: Nutrient) -> f64 {
        match nutrient {
            Nutrient::Protein => self.protein,
            Nutrient::Fat => self.fat,
            Nutrient::Carbs => self.carbs,
            Nutrient::Fiber => self.fiber,
            Nutrient::Sugar => self.sugar,
            Nutrient::Sodium => self.sodium,
            Nutrient::VitaminA => self.vitamin_a,
            Nutrient::VitaminB1 => self.vitamin_b1,
            Nutrient::VitaminB2 => self.vitamin_b2,
            Nutrient::VitaminB3 => self.vitamin_b3,
            Nutrient::VitaminB5 => self.vitamin_b5,
            Nutrient::VitaminB6 => self.vitamin_b6,
            Nutrient::VitaminB7 => self.vitamin_b7,
            Nutrient::VitaminB9 => self.vitamin_b9,
            Nutrient::VitaminB12 => self.vitamin_b12,
            Nutrient::VitaminC => self.vitamin_c,
            Nutrient::VitaminD => self.vitamin_d,
            Nutrient::VitaminE => self.vitamin_e,
            Nutrient::VitaminK => self.vitamin_k,
            Nutrient::Calcium => self.calcium,
            Nutrient::Iron => self.iron,
            Nutrient::Magnesium => self.magnesium,
            Nutrient::Potassium => self.potassium,
            Nutrient::Zinc => self.zinc,
        }
    }

    fn slot(&mut self, nutrient: Nutrient) -> &mut f64 {
        match nutrient {
            Nutrient::Protein => &mut self.protein,
            Nutrient::Fat => &mut self.fat,
            Nutrient::Carbs => &mut self.carbs,
            Nutrient::Fiber => &mut self.fiber,
            Nutrient::Sugar => &mut self.sugar,
            Nutrient::Sodium => &mut self.sodium,
            Nutrient::VitaminA => &mut self.vitamin_a,
            Nutrient::VitaminB1 => &mut self.vitamin_b1,
            Nutrient::VitaminB2 => &mut self.vitamin_b2,
            Nutrient::VitaminB3 => &mut self.vitamin_b3,
            Nutrient::VitaminB5 => &mut self.vitamin_b5,
            Nutrient::VitaminB6 => &mut self.vitamin_b6,
            Nutrient::VitaminB7 => &mut self.vitamin_b7,
            Nutrient::VitaminB9 => &mut self.vitamin_b9,
            Nutrient::VitaminB12 => &mut self.vitamin_b12,
            Nutrient::VitaminC => &mut self.vitamin_c,
            Nutrient::VitaminD => &mut self.vitamin_d,
            Nutrient::VitaminE => &mut self.vitamin_e,
            Nutrient::VitaminK => &mut self.vitamin_k,
            Nutrient::Calcium => &mut self.calcium,
            Nutrient::Iron => &mut self.iron,
            Nutrient::Magnesium => &mut self.magnesium,
            Nutrient::Potassium => &mut self.potassium,
            Nutrient::Zinc => &mut self.zinc,
        }
    }

    pub fn set(&mut self, nutrient: Nutrient, value: f64) {
        *self.slot(nutrient) = value;
    }

    /// Builder form of [`NutrientProfile::set`]
    pub fn with(mut self, nutrient: Nutrient, value: f64) -> Self {
        self.set(nutrient, value);
        self
    }

    /// Apply `f` to every field
    pub fn map<F: Fn(f64) -> f64>(&self, f: F) -> Self {
        let mut out = Self::zero();
        for n in Nutrient::ALL {
            out.set(n, f(self.get(n)));
        }
        out
    }

    /// Scale nutrition values by a multiplier
    pub fn scale(&self, multiplier: f64) -> Self {
        self.map(|v| v * multiplier)
    }

    /// Scale by a multiplier and round each field to one decimal
    pub fn scale_rounded(&self, multiplier: f64) -> Self {
        self.map(|v| round_to_tenth(v * multiplier))
    }

    /// Add another profile to this one, field by field
    pub fn add(&self, other: &NutrientProfile) -> Self {
        let mut out = *self;
        for n in Nutrient::ALL {
            *out.slot(n) += other.get(n);
        }
        out
    }

    pub fn calories(&self) -> i64 {
        calories_from_macros(self.protein, self.carbs, self.fat)
    }

    /// Percentage split of protein, fat and carbs (all zero when there are no macros)
    pub fn macro_breakdown(&self) -> MacroBreakdown {
        let total = self.protein + self.fat + self.carbs;
        if total == 0.0 {
            return MacroBreakdown::default();
        }

        MacroBreakdown {
            protein: (self.protein / total * 100.0).round() as i64,
            fat: (self.fat / total * 100.0).round() as i64,
            carbs: (self.carbs / total * 100.0).round() as i64,
        }
    }

    /// Rows for a macro pie chart; a single `empty` slice when there are no macros
    pub fn chart_data(&self) -> Vec<(&'static str, f64)> {
        if self.protein + self.fat + self.carbs == 0.0 {
            return vec![("empty", 1.0)];
        }
        vec![
            ("Protein", self.protein),
            ("Fat", self.fat),
            ("Carbs", self.carbs),
        ]
    }

    /// True when no field is negative
    pub fn is_valid(&self) -> bool {
        Nutrient::ALL.iter().all(|n| self.get(*n) >= 0.0)
    }

    /// Read the flat nutrient keys of a raw record; missing or junk values are 0
    pub fn from_payload(payload: &Value) -> Self {
        let mut profile = Self::zero();
        for n in Nutrient::ALL {
            profile.set(n, coerce_f64(&payload[n.as_str()]));
        }
        profile
    }

    /// Write every nutrient as a flat key into a raw record
    pub fn write_payload(&self, record: &mut Map<String, Value>) {
        for n in Nutrient::ALL {
            record.insert(n.as_str().to_string(), json!(self.get(n)));
        }
    }
}

impl std::ops::Add for NutrientProfile {
    type Output = NutrientProfile;

    fn add(self, other: NutrientProfile) -> NutrientProfile {
        NutrientProfile::add(&self, &other)
    }
}

impl std::ops::AddAssign for NutrientProfile {
    fn add_assign(&mut self, other: NutrientProfile) {
        *self = NutrientProfile::add(self, &other);
    }
}

impl std::ops::Mul<f64> for NutrientProfile {
    type Output = NutrientProfile;

    fn mul(self, multiplier: f64) -> NutrientProfile {
        self.scale(multiplier)
    }
}

impl std::iter::Sum for NutrientProfile {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(NutrientProfile::zero(), |acc, n| acc + n)
    }
}
