use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Urban cost-of-living bucket used to calibrate price expectations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
pub enum CityTier {
    #[serde(rename = "Tier-1")]
    #[value(name = "tier-1", alias = "1")]
    Tier1,
    #[default]
    #[serde(rename = "Tier-2")]
    #[value(name = "tier-2", alias = "2")]
    Tier2,
    #[serde(rename = "Tier-3")]
    #[value(name = "tier-3", alias = "3")]
    Tier3,
}

impl CityTier {
    pub const ALL: [CityTier; 3] = [CityTier::Tier1, CityTier::Tier2, CityTier::Tier3];

    pub fn label(&self) -> &'static str {
        match self {
            CityTier::Tier1 => "Tier-1",
            CityTier::Tier2 => "Tier-2",
            CityTier::Tier3 => "Tier-3",
        }
    }
}

impl fmt::Display for CityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Coarse bucket of available cooking equipment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
pub enum KitchenSetup {
    Minimal,
    #[default]
    Medium,
    Full,
}

impl KitchenSetup {
    pub const ALL: [KitchenSetup; 3] = [
        KitchenSetup::Minimal,
        KitchenSetup::Medium,
        KitchenSetup::Full,
    ];

    /// Label including the equipment this setup implies.
    pub fn label(&self) -> &'static str {
        match self {
            KitchenSetup::Minimal => "Minimal (Single Induction/Kettle)",
            KitchenSetup::Medium => "Medium (Gas Stove, Basic Cookware)",
            KitchenSetup::Full => "Full (Oven, Microwave, Mixer, Stove)",
        }
    }
}

impl fmt::Display for KitchenSetup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Default pantry a new session starts with.
pub const DEFAULT_PANTRY: [&str; 7] = [
    "rice",
    "dal",
    "onions",
    "tomatoes",
    "potatoes",
    "turmeric",
    "chilli powder",
];

/// User-chosen planning inputs.
///
/// Fields are private so every write goes through a setter. The ingredient
/// list never holds an empty entry or two entries that differ only by case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Preferences {
    city_tier: CityTier,
    diet_type: String,
    budget_per_day: u32,
    time_per_meal: u32,
    kitchen_setup: KitchenSetup,
    ingredients: Vec<String>,
    days: u32,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            city_tier: CityTier::default(),
            diet_type: "Vegetarian".to_string(),
            budget_per_day: 150,
            time_per_meal: 25,
            kitchen_setup: KitchenSetup::default(),
            ingredients: DEFAULT_PANTRY.iter().map(|s| s.to_string()).collect(),
            days: 2,
        }
    }
}

/// Trim and lower-case a raw ingredient name.
pub fn normalize_ingredient(raw: &str) -> String {
    raw.trim().to_lowercase()
}

impl Preferences {
    /// Preferences with an empty pantry and default scalars.
    pub fn with_empty_pantry() -> Self {
        Self {
            ingredients: Vec::new(),
            ..Self::default()
        }
    }

    pub fn city_tier(&self) -> CityTier {
        self.city_tier
    }

    pub fn diet_type(&self) -> &str {
        &self.diet_type
    }

    pub fn budget_per_day(&self) -> u32 {
        self.budget_per_day
    }

    pub fn time_per_meal(&self) -> u32 {
        self.time_per_meal
    }

    pub fn kitchen_setup(&self) -> KitchenSetup {
        self.kitchen_setup
    }

    /// Pantry ingredients in insertion order.
    pub fn ingredients(&self) -> &[String] {
        &self.ingredients
    }

    pub fn days(&self) -> u32 {
        self.days
    }

    pub fn set_city_tier(&mut self, tier: CityTier) {
        debug!(%tier, "set_city_tier");
        self.city_tier = tier;
    }

    /// Blank labels are ignored.
    pub fn set_diet_type(&mut self, diet: &str) {
        let diet = diet.trim();
        if diet.is_empty() {
            return;
        }
        debug!(diet, "set_diet_type");
        self.diet_type = diet.to_string();
    }

    /// Zero is clamped to one.
    pub fn set_budget_per_day(&mut self, budget: u32) {
        debug!(budget, "set_budget_per_day");
        self.budget_per_day = budget.max(1);
    }

    /// Zero is clamped to one.
    pub fn set_time_per_meal(&mut self, minutes: u32) {
        debug!(minutes, "set_time_per_meal");
        self.time_per_meal = minutes.max(1);
    }

    pub fn set_kitchen_setup(&mut self, setup: KitchenSetup) {
        debug!(?setup, "set_kitchen_setup");
        self.kitchen_setup = setup;
    }

    /// Zero is clamped to one.
    pub fn set_days(&mut self, days: u32) {
        debug!(days, "set_days");
        self.days = days.max(1);
    }

    /// Add an ingredient after trimming and lower-casing it.
    ///
    /// Returns `false` without touching the list when the normalized name is
    /// empty or already present.
    pub fn add_ingredient(&mut self, raw: &str) -> bool {
        let name = normalize_ingredient(raw);
        if name.is_empty() || self.has_ingredient(&name) {
            return false;
        }
        debug!(ingredient = %name, "add_ingredient");
        self.ingredients.push(name);
        true
    }

    /// Remove an ingredient by its exact stored name.
    pub fn remove_ingredient(&mut self, stored: &str) -> bool {
        let before = self.ingredients.len();
        self.ingredients.retain(|i| i != stored);
        let removed = self.ingredients.len() != before;
        if removed {
            debug!(ingredient = stored, "remove_ingredient");
        }
        removed
    }

    pub fn has_ingredient(&self, name: &str) -> bool {
        let key = normalize_ingredient(name);
        self.ingredients.iter().any(|i| i.to_lowercase() == key)
    }

    /// Re-apply every invariant after deserializing from an untrusted source.
    pub fn normalized(self) -> Self {
        let mut out = Self {
            ingredients: Vec::new(),
            ..self.clone()
        };
        out.set_budget_per_day(self.budget_per_day);
        out.set_time_per_meal(self.time_per_meal);
        out.set_days(self.days);
        if out.diet_type.trim().is_empty() {
            out.diet_type = Self::default().diet_type;
        }
        for ingredient in &self.ingredients {
            out.add_ingredient(ingredient);
        }
        out
    }
}
