//! Rep Analyzer - squat and bench press rep counting
//!
//! Counts repetitions in pose-landmark sequences and validates their form.

use anyhow::Context;
use rep_analyzer::app::cli::{Cli, Commands, ConfigAction};
use rep_analyzer::app::config::Config;
use rep_analyzer::feedback::{CoachPrompt, SessionSummary};
use rep_analyzer::pose::PoseSequence;
use rep_analyzer::workflow::{analyze, Exercise, ExerciseReport};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Parse CLI arguments first so we can use --verbose to set log level
    let cli = Cli::parse_args();

    // Initialize tracing (--verbose enables debug-level output)
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    // Load config
    let config = match &cli.config {
        Some(path) => {
            if !path.exists() {
                warn!("Config file {} not found, using defaults", path.display());
            }
            Config::load_or_default(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?
        }
        None => Config::load_default().with_context(|| {
            format!("Failed to load config from {}", Config::default_path().display())
        })?,
    };

    // Execute command
    match cli.command {
        Commands::Analyze {
            exercise,
            input,
            output,
        } => {
            run_analyze(exercise, &input, output.as_deref(), &config)?;
        }
        Commands::Feedback {
            exercise,
            input,
            prompt,
        } => {
            run_feedback(exercise, &input, prompt, &config)?;
        }
        Commands::Init { force } => {
            run_init(force, cli.config.as_ref(), &config)?;
        }
        Commands::Config { action } => {
            run_config(action, cli.config.as_ref(), config)?;
        }
    }

    Ok(())
}

fn run_analyze(
    exercise: Exercise,
    input: &Path,
    output: Option<&Path>,
    config: &Config,
) -> anyhow::Result<()> {
    info!("Analyzing {} reps in {}", exercise.name(), input.display());

    let sequence = PoseSequence::load(input)
        .with_context(|| format!("Failed to read pose sequence {}", input.display()))?;
    info!(
        "Loaded {} frames ({} with a detected pose)",
        sequence.len(),
        sequence.detected_count()
    );

    let report = analyze(exercise, &sequence, config);
    let json = report.to_json_pretty()?;

    match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, &json)?;
            println!("Counted {} reps", report.rep_count());
            println!("Report saved to {}", path.display());
        }
        None => println!("{}", json),
    }

    Ok(())
}

fn run_feedback(exercise: Exercise, input: &Path, prompt: bool, config: &Config) -> anyhow::Result<()> {
    let report = ExerciseReport::load(exercise, input)
        .with_context(|| format!("Failed to read {} report {}", exercise.name(), input.display()))?;

    let summary = SessionSummary::from_exercise_report(&report, config.report.inches_per_unit);

    if prompt {
        let coach = CoachPrompt::for_summary(&summary);
        println!("{}", coach.combined());
    } else {
        print!("{}", summary.render());
    }

    Ok(())
}

/// Config file in use: the `--config` override or the default location
fn resolve_config_path(custom: Option<&PathBuf>) -> PathBuf {
    custom.cloned().unwrap_or_else(Config::default_path)
}

fn save_config(config: &Config, custom: Option<&PathBuf>) -> anyhow::Result<()> {
    match custom {
        Some(path) => config.save(path)?,
        None => config.save_default()?,
    }
    Ok(())
}

fn run_init(force: bool, custom: Option<&PathBuf>, config: &Config) -> anyhow::Result<()> {
    let config_path = resolve_config_path(custom);
    if config_path.exists() && !force {
        anyhow::bail!(
            "Config already exists at {:?}. Use --force to overwrite.",
            config_path
        );
    }

    save_config(config, custom)?;
    println!("Created config at {:?}", config_path);
    println!("\nConfig content:\n{}", config.to_toml()?);

    Ok(())
}

fn run_config(action: ConfigAction, custom: Option<&PathBuf>, mut config: Config) -> anyhow::Result<()> {
    let config_path = resolve_config_path(custom);
    match action {
        ConfigAction::Show => {
            let toml_str = config.to_toml()?;
            println!("Configuration ({:?}):\n", config_path);
            println!("{}", toml_str);
        }
        ConfigAction::Get { key } => {
            let value = config.get_value(&key)?;
            println!("{} = {}", key, value);
        }
        ConfigAction::Set { key, value } => {
            if !config_path.exists() {
                anyhow::bail!("No config file found. Run 'rep-analyzer init' first.");
            }

            config.set_value(&key, &value)?;
            save_config(&config, custom)?;
            println!("Set {} = {}", key, config.get_value(&key)?);
        }
        ConfigAction::Reset { force } => {
            if config_path.exists() && !force {
                println!("Config exists at {:?}", config_path);
                println!("Use --force to reset to defaults");
                return Ok(());
            }

            save_config(&Config::default(), custom)?;
            println!("Reset config to defaults at {:?}", config_path);
        }
    }

    Ok(())
}
