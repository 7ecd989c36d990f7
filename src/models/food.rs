//! Food model
//!
//! A leaf food with authoritative per-serving nutrition, plus the
//! [`NutrientSource`] capability shared with recipes and the [`BaseFood`]
//! sum type used wherever either kind of food can appear.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::filter::{Searchable, SortField, SortKey, Sortable};
use super::payload::{coerce_f64, coerce_string, PayloadError};
use super::{MacroBreakdown, Nutrient, NutrientProfile, Recipe};

/// Food kind tag as carried on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FoodType {
    /// A plain food ([`Food`])
    Simple,
    /// A food made of other foods ([`Recipe`])
    Compound,
}

impl FoodType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FoodType::Simple => "simple",
            FoodType::Compound => "compound",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "simple" => Some(FoodType::Simple),
            "compound" => Some(FoodType::Compound),
            _ => None,
        }
    }
}

/// Serving size and unit
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServingInfo {
    pub size: f64,
    pub unit: String,
}

impl ServingInfo {
    pub fn new(size: f64, unit: impl Into<String>) -> Self {
        Self {
            size,
            unit: unit.into(),
        }
    }
}

/// Anything with a serving and a per-serving nutrient profile
pub trait NutrientSource {
    fn serving(&self) -> &ServingInfo;

    fn nutrients(&self) -> &NutrientProfile;

    /// Nutrients for `amount` of this food: the profile scaled by
    /// `amount / serving.size`, each field rounded to one decimal.
    ///
    /// A zero serving size yields a zero profile. `unit` is not converted;
    /// callers must pass amounts in the serving's unit.
    fn calculate_nutrients(&self, amount: f64, unit: &str) -> NutrientProfile {
        let serving = self.serving();
        if serving.size == 0.0 {
            return NutrientProfile::zero();
        }

        if !unit.is_empty() && !unit.eq_ignore_ascii_case(&serving.unit) {
            tracing::debug!(
                "Unit '{}' differs from serving unit '{}'; amount used as-is",
                unit,
                serving.unit
            );
        }

        self.nutrients().scale_rounded(amount / serving.size)
    }

    fn calories(&self) -> i64 {
        self.nutrients().calories()
    }

    fn macro_breakdown(&self) -> MacroBreakdown {
        self.nutrients().macro_breakdown()
    }

    fn chart_data(&self) -> Vec<(&'static str, f64)> {
        self.nutrients().chart_data()
    }
}

/// A food with per-serving nutrition
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Food {
    id: String,
    pub name: String,
    pub brand: String,
    serving: ServingInfo,
    nutrients: NutrientProfile,
}

impl Food {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            brand: String::new(),
            serving: ServingInfo::default(),
            nutrients: NutrientProfile::zero(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn food_type(&self) -> FoodType {
        FoodType::Simple
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = brand.into();
        self
    }

    pub fn with_serving(mut self, size: f64, unit: impl Into<String>) -> Self {
        self.serving = ServingInfo::new(size, unit);
        self
    }

    pub fn with_nutrients(mut self, nutrients: NutrientProfile) -> Self {
        self.nutrients = nutrients;
        self
    }

    pub fn with_nutrient(mut self, nutrient: Nutrient, value: f64) -> Self {
        self.nutrients.set(nutrient, value);
        self
    }

    pub fn with_protein(self, value: f64) -> Self {
        self.with_nutrient(Nutrient::Protein, value)
    }

    pub fn with_fat(self, value: f64) -> Self {
        self.with_nutrient(Nutrient::Fat, value)
    }

    pub fn with_carbs(self, value: f64) -> Self {
        self.with_nutrient(Nutrient::Carbs, value)
    }

    pub fn with_fiber(self, value: f64) -> Self {
        self.with_nutrient(Nutrient::Fiber, value)
    }

    pub fn with_sugar(self, value: f64) -> Self {
        self.with_nutrient(Nutrient::Sugar, value)
    }

    pub fn with_sodium(self, value: f64) -> Self {
        self.with_nutrient(Nutrient::Sodium, value)
    }

    pub fn set_serving(&mut self, size: f64, unit: impl Into<String>) {
        self.serving = ServingInfo::new(size, unit);
    }

    pub fn set_nutrient(&mut self, nutrient: Nutrient, value: f64) {
        self.nutrients.set(nutrient, value);
    }

    /// Build a food from a raw API record, coercing loose numbers to 0
    pub fn from_payload(payload: &Value) -> Self {
        Food::new(coerce_string(&payload["id"]))
            .with_name(coerce_string(&payload["name"]))
            .with_brand(coerce_string(&payload["brand"]))
            .with_serving(
                coerce_f64(&payload["servingSize"]),
                coerce_string(&payload["servingSizeMeasurementType"]),
            )
            .with_nutrients(NutrientProfile::from_payload(payload))
    }

    /// Raw API record for this food
    pub fn to_payload(&self) -> Value {
        let mut record = Map::new();
        record.insert("id".into(), json!(self.id));
        record.insert("type".into(), json!(FoodType::Simple.as_str()));
        record.insert("name".into(), json!(self.name));
        record.insert("brand".into(), json!(self.brand));
        record.insert("servingSize".into(), json!(self.serving.size));
        record.insert(
            "servingSizeMeasurementType".into(),
            json!(self.serving.unit),
        );
        self.nutrients.write_payload(&mut record);
        Value::Object(record)
    }
}

impl NutrientSource for Food {
    fn serving(&self) -> &ServingInfo {
        &self.serving
    }

    fn nutrients(&self) -> &NutrientProfile {
        &self.nutrients
    }
}

/// Either kind of food
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum BaseFood {
    Simple(Food),
    Compound(Recipe),
}

impl BaseFood {
    pub fn id(&self) -> &str {
        match self {
            BaseFood::Simple(food) => food.id(),
            BaseFood::Compound(recipe) => recipe.id(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            BaseFood::Simple(food) => &food.name,
            BaseFood::Compound(recipe) => &recipe.name,
        }
    }

    pub fn brand(&self) -> &str {
        match self {
            BaseFood::Simple(food) => &food.brand,
            BaseFood::Compound(recipe) => &recipe.brand,
        }
    }

    pub fn food_type(&self) -> FoodType {
        match self {
            BaseFood::Simple(_) => FoodType::Simple,
            BaseFood::Compound(_) => FoodType::Compound,
        }
    }

    /// Build from a nested food record. `type: "simple"` is a food and
    /// `type: "compound"` a recipe; untagged records are recipes when they
    /// carry `parts`.
    pub fn from_payload(payload: &Value) -> Result<Self, PayloadError> {
        let tagged = payload["type"].as_str().and_then(FoodType::from_str);
        let food_type = tagged.unwrap_or(if payload.get("parts").is_some() {
            FoodType::Compound
        } else {
            FoodType::Simple
        });

        match food_type {
            FoodType::Simple => Ok(BaseFood::Simple(Food::from_payload(payload))),
            FoodType::Compound => Ok(BaseFood::Compound(Recipe::from_payload(payload)?)),
        }
    }

    pub fn to_payload(&self) -> Value {
        match self {
            BaseFood::Simple(food) => food.to_payload(),
            BaseFood::Compound(recipe) => recipe.to_payload(),
        }
    }
}

impl NutrientSource for BaseFood {
    fn serving(&self) -> &ServingInfo {
        match self {
            BaseFood::Simple(food) => food.serving(),
            BaseFood::Compound(recipe) => recipe.serving(),
        }
    }

    fn nutrients(&self) -> &NutrientProfile {
        match self {
            BaseFood::Simple(food) => food.nutrients(),
            BaseFood::Compound(recipe) => recipe.nutrients(),
        }
    }
}

impl From<Food> for BaseFood {
    fn from(food: Food) -> Self {
        BaseFood::Simple(food)
    }
}

impl From<Recipe> for BaseFood {
    fn from(recipe: Recipe) -> Self {
        BaseFood::Compound(recipe)
    }
}

/// Fields foods and recipes can be sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FoodSortField {
    Name,
    Brand,
    Calories,
    ServingSize,
    Nutrient(Nutrient),
}

impl SortField for FoodSortField {
    fn as_str(&self) -> &'static str {
        match self {
            FoodSortField::Name => "name",
            FoodSortField::Brand => "brand",
            FoodSortField::Calories => "calories",
            FoodSortField::ServingSize => "servingSize",
            FoodSortField::Nutrient(n) => n.as_str(),
        }
    }

    fn parse(name: &str) -> Option<Self> {
        match name.to_lowercase().replace('_', "").as_str() {
            "name" => Some(FoodSortField::Name),
            "brand" => Some(FoodSortField::Brand),
            "calories" => Some(FoodSortField::Calories),
            "servingsize" | "serving" => Some(FoodSortField::ServingSize),
            _ => Nutrient::from_str(name).map(FoodSortField::Nutrient),
        }
    }
}

/// Sort key for anything food-like
pub(crate) fn food_sort_key<S: NutrientSource>(
    source: &S,
    name: &str,
    brand: &str,
    field: FoodSortField,
) -> SortKey {
    match field {
        FoodSortField::Name => SortKey::optional_text(name),
        FoodSortField::Brand => SortKey::optional_text(brand),
        FoodSortField::Calories => SortKey::from(source.calories()),
        FoodSortField::ServingSize => SortKey::from(source.serving().size),
        FoodSortField::Nutrient(n) => SortKey::from(source.nutrients().get(n)),
    }
}

impl Searchable for Food {
    fn search_text(&self) -> String {
        format!("{} {}", self.name, self.brand)
    }
}

impl Sortable for Food {
    type Field = FoodSortField;

    fn sort_key(&self, field: FoodSortField) -> SortKey {
        food_sort_key(self, &self.name, &self.brand, field)
    }
}

impl Searchable for BaseFood {
    fn search_text(&self) -> String {
        format!("{} {}", self.name(), self.brand())
    }
}

impl Sortable for BaseFood {
    type Field = FoodSortField;

    fn sort_key(&self, field: FoodSortField) -> SortKey {
        food_sort_key(self, self.name(), self.brand(), field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{FilterOptions, Sort};

    fn chicken() -> Food {
        Food::new("f1")
            .with_name("Chicken Breast")
            .with_brand("Tyson")
            .with_serving(100.0, "g")
            .with_protein(31.0)
            .with_fat(3.6)
            .with_carbs(0.0)
            .with_sodium(74.0)
            .with_nutrient(Nutrient::VitaminB6, 0.6)
    }

    #[test]
    fn test_calculate_nutrients_scales_by_serving() {
        let n = chicken().calculate_nutrients(150.0, "g");
        assert_eq!(n.protein, 46.5);
        assert_eq!(n.fat, 5.4);
        assert_eq!(n.sodium, 111.0);
        assert_eq!(n.vitamin_b6, 0.9);
    }

    #[test]
    fn test_calculate_nutrients_zero_serving_is_zero_profile() {
        let food = chicken().with_serving(0.0, "g");
        assert_eq!(food.calculate_nutrients(100.0, "g"), NutrientProfile::zero());
    }

    #[test]
    fn test_calculate_nutrients_ignores_unit() {
        let food = chicken();
        assert_eq!(
            food.calculate_nutrients(50.0, "oz"),
            food.calculate_nutrients(50.0, "g")
        );
    }

    #[test]
    fn test_calories_and_breakdown() {
        let food = Food::new("x").with_protein(10.0).with_fat(5.0).with_carbs(20.0);
        assert_eq!(food.calories(), 165);
        let split = food.macro_breakdown();
        assert_eq!((split.protein, split.fat, split.carbs), (29, 14, 57));
    }

    #[test]
    fn test_payload_round_trip() {
        let food = chicken();
        let back = Food::from_payload(&food.to_payload());
        assert_eq!(back, food);
        assert_eq!(back.nutrients(), food.nutrients());
    }

    #[test]
    fn test_from_payload_coerces_loose_values() {
        let payload = json!({
            "id": 17,
            "name": "Oats",
            "brand": null,
            "servingSize": "40",
            "servingSizeMeasurementType": "g",
            "protein": "5.3",
            "fat": "",
            "carbs": 27,
            "iron": "n/a"
        });
        let food = Food::from_payload(&payload);
        assert_eq!(food.id(), "17");
        assert_eq!(food.brand, "");
        assert_eq!(food.serving(), &ServingInfo::new(40.0, "g"));
        assert_eq!(food.nutrients().protein, 5.3);
        assert_eq!(food.nutrients().fat, 0.0);
        assert_eq!(food.nutrients().carbs, 27.0);
        assert_eq!(food.nutrients().iron, 0.0);
    }

    #[test]
    fn test_base_food_dispatch_by_type_tag() {
        let simple = BaseFood::from_payload(&chicken().to_payload()).unwrap();
        assert_eq!(simple.food_type(), FoodType::Simple);

        let compound = BaseFood::from_payload(&json!({
            "id": "r1", "type": "compound", "name": "Empty", "parts": []
        }))
        .unwrap();
        assert_eq!(compound.food_type(), FoodType::Compound);
        assert_eq!(compound.serving(), &ServingInfo::new(1.0, "recipe"));

        let untagged = BaseFood::from_payload(&json!({ "id": "r2", "parts": [] })).unwrap();
        assert_eq!(untagged.food_type(), FoodType::Compound);
    }

    #[test]
    fn test_sort_field_parse() {
        assert_eq!(FoodSortField::parse("Name"), Some(FoodSortField::Name));
        assert_eq!(FoodSortField::parse("serving_size"), Some(FoodSortField::ServingSize));
        assert_eq!(
            FoodSortField::parse("vitaminC"),
            Some(FoodSortField::Nutrient(Nutrient::VitaminC))
        );
        assert_eq!(FoodSortField::parse("created"), None);
    }

    #[test]
    fn test_search_and_sort_foods() {
        let foods = vec![
            chicken(),
            Food::new("f2").with_name("Beef Jerky").with_brand("Jack Link's").with_protein(9.0),
            Food::new("f3").with_name("Chicken Thigh").with_protein(26.0),
        ];

        let options = FilterOptions::new()
            .with_search("chick")
            .with_sort(Sort::asc(FoodSortField::Nutrient(Nutrient::Protein)));
        let names: Vec<_> = options.apply(foods.iter().collect::<Vec<_>>())
            .iter()
            .map(|f| f.name.as_str())
            .collect();
        assert_eq!(names, vec!["Chicken Thigh", "Chicken Breast"]);
    }

    #[test]
    fn test_missing_brand_sorts_last() {
        let foods = vec![
            Food::new("a").with_name("A"),
            Food::new("b").with_name("B").with_brand("Zed"),
            Food::new("c").with_name("C").with_brand("Acme"),
        ];
        let sorted = Sort::desc(FoodSortField::Brand).apply(foods);
        let ids: Vec<_> = sorted.iter().map(|f| f.id()).collect();
        assert_eq!(ids, vec!["b", "c", "a"]);
    }
}
