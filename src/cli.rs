use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::error::{PlateError, Result};
use crate::llm::{GeminiConfig, DEFAULT_BASE_URL, DEFAULT_MODEL};
use crate::models::{CityTier, KitchenSetup, OptimizationFocus, Preferences};
use crate::state::load_preferences;

/// PinkPlate: smart Indian meal planning for students, powered by a hosted AI model.
#[derive(Parser, Debug)]
#[command(name = "pinkplate")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// API key for the Gemini completion service.
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true, global = true)]
    pub api_key: Option<String>,

    /// Model used for plan generation.
    #[arg(long, env = "PINKPLATE_MODEL", default_value = DEFAULT_MODEL, global = true)]
    pub model: String,

    /// Base URL of the completion service.
    #[arg(long, default_value = DEFAULT_BASE_URL, global = true)]
    pub base_url: String,

    /// Give up on a request after this many seconds (no limit by default).
    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,

    /// JSON file with starting preferences.
    #[arg(short, long, global = true)]
    pub prefs: Option<PathBuf>,

    /// Enable debug logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, Default, Clone)]
pub enum Command {
    /// Edit preferences and generate plans interactively.
    #[default]
    Plan,

    /// Generate one plan from flags and print it.
    Generate(GenerateArgs),

    /// Print the response schema sent to the model.
    Schema,

    /// Print the prompt that would be sent, without calling the service.
    Prompt(PreferenceArgs),
}

/// Flags that override the starting preferences.
#[derive(Args, Debug, Default, Clone)]
pub struct PreferenceArgs {
    /// City tier.
    #[arg(long, value_enum)]
    pub city: Option<CityTier>,

    /// Diet type label, e.g. "Vegetarian".
    #[arg(long)]
    pub diet: Option<String>,

    /// Daily budget in rupees.
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub budget: Option<u32>,

    /// Max prep time per meal in minutes.
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub time: Option<u32>,

    /// Kitchen setup.
    #[arg(long, value_enum)]
    pub kitchen: Option<KitchenSetup>,

    /// Pantry ingredient (repeatable). Replaces the starting pantry.
    #[arg(long = "ingredient", short = 'i')]
    pub ingredients: Vec<String>,

    /// Number of days to plan.
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub days: Option<u32>,

    /// Optimization focus.
    #[arg(long, value_enum, default_value_t = OptimizationFocus::Balanced)]
    pub focus: OptimizationFocus,
}

#[derive(Args, Debug, Default, Clone)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub preferences: PreferenceArgs,

    /// Save the plan as JSON.
    #[arg(long)]
    pub save: Option<PathBuf>,

    /// Export the grocery list as CSV.
    #[arg(long)]
    pub groceries_csv: Option<PathBuf>,
}

impl PreferenceArgs {
    /// Apply the given flags on top of `prefs`.
    pub fn apply(&self, prefs: &mut Preferences) {
        if let Some(city) = self.city {
            prefs.set_city_tier(city);
        }
        if let Some(diet) = &self.diet {
            prefs.set_diet_type(diet);
        }
        if let Some(budget) = self.budget {
            prefs.set_budget_per_day(budget);
        }
        if let Some(time) = self.time {
            prefs.set_time_per_meal(time);
        }
        if let Some(kitchen) = self.kitchen {
            prefs.set_kitchen_setup(kitchen);
        }
        if !self.ingredients.is_empty() {
            let stored: Vec<String> = prefs.ingredients().to_vec();
            for ingredient in &stored {
                prefs.remove_ingredient(ingredient);
            }
            for ingredient in &self.ingredients {
                prefs.add_ingredient(ingredient);
            }
        }
        if let Some(days) = self.days {
            prefs.set_days(days);
        }
    }
}

impl Cli {
    /// Starting preferences: the seed file if given, otherwise defaults.
    pub fn starting_preferences(&self) -> Result<Preferences> {
        match &self.prefs {
            Some(path) => load_preferences(path),
            None => Ok(Preferences::default()),
        }
    }

    pub fn gemini_config(&self) -> Result<GeminiConfig> {
        let api_key = self
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or(PlateError::MissingApiKey)?;

        let mut config = GeminiConfig::new(api_key);
        config.model = self.model.clone();
        config.base_url = self.base_url.clone();
        config.timeout = self.timeout_secs.map(Duration::from_secs);
        Ok(config)
    }
}

/// Log filter from a `RUST_LOG` value, `warn` when unset or unparsable.
/// `verbose` adds a debug directive on top.
pub fn log_filter(verbose: bool, rust_log: Option<&str>) -> EnvFilter {
    let filter = rust_log
        .map(str::trim)
        .filter(|spec| !spec.is_empty())
        .and_then(|spec| EnvFilter::try_new(spec).ok())
        .unwrap_or_else(|| EnvFilter::new("warn"));

    if verbose {
        filter.add_directive(LevelFilter::DEBUG.into())
    } else {
        filter
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_command_is_plan() {
        let cli = Cli::try_parse_from(["pinkplate"]).unwrap();
        assert!(matches!(cli.command.unwrap_or_default(), Command::Plan));
    }

    #[test]
    fn test_generate_flags_override_defaults() {
        let cli = Cli::try_parse_from([
            "pinkplate",
            "generate",
            "--city",
            "tier-1",
            "--budget",
            "120",
            "--kitchen",
            "minimal",
            "-i",
            "Poha",
            "-i",
            "peanuts",
            "--focus",
            "protein",
        ])
        .unwrap();

        let Some(Command::Generate(args)) = cli.command else {
            panic!("expected generate");
        };

        let mut prefs = Preferences::default();
        args.preferences.apply(&mut prefs);
        assert_eq!(prefs.city_tier(), CityTier::Tier1);
        assert_eq!(prefs.budget_per_day(), 120);
        assert_eq!(prefs.kitchen_setup(), KitchenSetup::Minimal);
        assert_eq!(prefs.ingredients(), &["poha", "peanuts"]);
        assert_eq!(prefs.days(), 2);
        assert_eq!(args.preferences.focus, OptimizationFocus::Protein);
    }

    #[test]
    fn test_zero_budget_rejected() {
        assert!(Cli::try_parse_from(["pinkplate", "generate", "--budget", "0"]).is_err());
    }

    #[test]
    fn test_missing_api_key() {
        let cli = Cli {
            command: None,
            api_key: Some("   ".to_string()),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: None,
            prefs: None,
            verbose: false,
        };
        assert!(matches!(cli.gemini_config(), Err(PlateError::MissingApiKey)));
    }

    #[test]
    fn test_gemini_config_carries_timeout() {
        let cli = Cli::try_parse_from([
            "pinkplate",
            "--api-key",
            "abc",
            "--timeout-secs",
            "30",
            "schema",
        ])
        .unwrap();
        let config = cli.gemini_config().unwrap();
        assert_eq!(config.api_key, "abc");
        assert_eq!(config.timeout, Some(Duration::from_secs(30)));
    }

    fn under(filter: EnvFilter, check: impl FnOnce() -> bool) -> bool {
        use tracing_subscriber::layer::SubscriberExt;

        let subscriber = tracing_subscriber::registry().with(filter);
        tracing::subscriber::with_default(subscriber, check)
    }

    fn info_enabled() -> bool {
        tracing::enabled!(tracing::Level::INFO)
    }

    fn debug_enabled() -> bool {
        tracing::enabled!(tracing::Level::DEBUG)
    }

    fn warn_enabled() -> bool {
        tracing::enabled!(tracing::Level::WARN)
    }

    #[test]
    fn test_log_filter_honors_rust_log() {
        assert!(under(log_filter(false, Some("info")), info_enabled));
        assert!(!under(log_filter(false, Some("info")), debug_enabled));
    }

    #[test]
    fn test_log_filter_defaults_to_warn() {
        assert!(!under(log_filter(false, None), info_enabled));
        assert!(under(log_filter(false, None), warn_enabled));
        assert!(!under(log_filter(false, Some("  ")), info_enabled));
    }

    #[test]
    fn test_log_filter_verbose_adds_debug() {
        assert!(under(log_filter(true, None), debug_enabled));
        assert!(under(log_filter(true, Some("info")), debug_enabled));
    }
}
