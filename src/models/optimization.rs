use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::PlateError;

/// The lens the model is asked to prioritize when building a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OptimizationFocus {
    #[default]
    Balanced,
    Cheapest,
    Fastest,
    Protein,
}

impl OptimizationFocus {
    pub const ALL: [OptimizationFocus; 4] = [
        OptimizationFocus::Balanced,
        OptimizationFocus::Cheapest,
        OptimizationFocus::Fastest,
        OptimizationFocus::Protein,
    ];

    /// Lower-case form used in the prompt.
    pub fn as_str(&self) -> &'static str {
        match self {
            OptimizationFocus::Balanced => "balanced",
            OptimizationFocus::Cheapest => "cheapest",
            OptimizationFocus::Fastest => "fastest",
            OptimizationFocus::Protein => "protein",
        }
    }

    /// Capitalized form for menus.
    pub fn title(&self) -> &'static str {
        match self {
            OptimizationFocus::Balanced => "Balanced",
            OptimizationFocus::Cheapest => "Cheapest",
            OptimizationFocus::Fastest => "Fastest",
            OptimizationFocus::Protein => "Protein",
        }
    }
}

impl fmt::Display for OptimizationFocus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OptimizationFocus {
    type Err = PlateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|f| f.as_str() == key)
            .ok_or_else(|| PlateError::InvalidInput(format!("Unknown optimization focus: {}", s)))
    }
}
