use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use pinkplate_rs::cli::{log_filter, Cli, Command, GenerateArgs, PreferenceArgs};
use pinkplate_rs::error::{PlateError, Result};
use pinkplate_rs::interface::{
    await_with_status, display_state, edit_preferences, prompt_form_action, prompt_path,
    prompt_result_action, prompt_yes_no, render_plan, render_preferences, FormAction,
    ResultAction,
};
use pinkplate_rs::llm::GeminiClient;
use pinkplate_rs::models::OptimizationFocus;
use pinkplate_rs::orchestrator::{PlanOrchestrator, PlanResult};
use pinkplate_rs::planner::{build_prompt, get_meal_plan_schema};
use pinkplate_rs::state::{export_grocery_csv, save_plan, PlanSession};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Log to stderr so records do not interleave with the form on stdout.
fn setup_logging(verbose: bool) {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_env_filter(log_filter(verbose, rust_log.as_deref()))
        .init();

    debug!("Logging initialized (verbose: {})", verbose);
}

async fn run(cli: Cli) -> Result<()> {
    let command = cli.command.clone().unwrap_or_default();

    match command {
        Command::Plan => cmd_plan(&cli).await,
        Command::Generate(args) => cmd_generate(&cli, &args).await,
        Command::Schema => cmd_schema(),
        Command::Prompt(args) => cmd_prompt(&cli, &args),
    }
}

fn build_session(cli: &Cli) -> Result<PlanSession<GeminiClient>> {
    let preferences = cli.starting_preferences()?;
    let client = GeminiClient::new(cli.gemini_config()?)?;
    info!(model = client.model(), "Using completion model");
    Ok(PlanSession::new(preferences, PlanOrchestrator::new(client)))
}

/// Run one generation with the status line and record its focus.
async fn generate_with_status(
    session: &mut PlanSession<GeminiClient>,
    focus: OptimizationFocus,
) -> Option<PlanResult> {
    let generation = session.start_generation(focus);
    let outcome = await_with_status(session.orchestrator(), generation).await;
    session.apply_outcome(focus, outcome.as_ref());
    outcome
}

/// Interactive form: edit preferences, generate, then regenerate or export.
async fn cmd_plan(cli: &Cli) -> Result<()> {
    let mut session = build_session(cli)?;

    println!("PinkPlate: Smart Indian Meal Planning for Students");
    println!();

    loop {
        print!("{}", render_preferences(session.preferences()));
        display_state(
            &session.state(),
            session.orchestrator().status_message(),
            session.focus(),
        );

        let next_focus = match session.orchestrator().result() {
            Some(PlanResult::Success(plan)) => match prompt_result_action(session.focus())? {
                ResultAction::Regenerate(focus) => Some(focus),
                ResultAction::SavePlan => {
                    let path = prompt_path("Save plan to", "meal_plan.json")?;
                    match save_plan(&path, &plan) {
                        Ok(()) => println!("Plan saved to {}", path),
                        Err(e) => eprintln!("Could not save plan: {}", e),
                    }
                    continue;
                }
                ResultAction::ExportGroceries => {
                    let path = prompt_path("Export grocery list to", "groceries.csv")?;
                    match export_grocery_csv(&path, &plan) {
                        Ok(()) => println!("Grocery list exported to {}", path),
                        Err(e) => eprintln!("Could not export grocery list: {}", e),
                    }
                    continue;
                }
                ResultAction::EditPreferences => None,
                ResultAction::Quit => break,
            },
            _ => match prompt_form_action()? {
                FormAction::Generate => Some(session.focus()),
                FormAction::Edit => None,
                FormAction::Quit => break,
            },
        };

        match next_focus {
            Some(focus) => {
                generate_with_status(&mut session, focus).await;
            }
            None => {
                if let Some(prefs) = session.preferences_mut() {
                    edit_preferences(prefs)?;
                }
                if prompt_yes_no("Generate a plan with these preferences?", true)? {
                    let focus = session.focus();
                    generate_with_status(&mut session, focus).await;
                }
            }
        }
    }

    Ok(())
}

/// One-shot generation driven entirely by flags.
async fn cmd_generate(cli: &Cli, args: &GenerateArgs) -> Result<()> {
    let mut session = build_session(cli)?;
    if let Some(prefs) = session.preferences_mut() {
        args.preferences.apply(prefs);
    }

    let focus = args.preferences.focus;
    let outcome = generate_with_status(&mut session, focus).await;

    match outcome {
        Some(PlanResult::Success(plan)) => {
            print!("{}", render_plan(&plan, focus));
            if let Some(path) = &args.save {
                save_plan(path, &plan)?;
                println!("Plan saved to {}", path.display());
            }
            if let Some(path) = &args.groceries_csv {
                export_grocery_csv(path, &plan)?;
                println!("Grocery list exported to {}", path.display());
            }
            Ok(())
        }
        Some(PlanResult::Failure(message)) => Err(PlateError::GenerationFailed(message)),
        None => Ok(()),
    }
}

fn cmd_schema() -> Result<()> {
    let schema = serde_json::to_string_pretty(&get_meal_plan_schema())?;
    println!("{}", schema);
    Ok(())
}

fn cmd_prompt(cli: &Cli, args: &PreferenceArgs) -> Result<()> {
    let mut prefs = cli.starting_preferences()?;
    args.apply(&mut prefs);
    print!("{}", build_prompt(&prefs, args.focus));
    Ok(())
}
