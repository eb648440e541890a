use std::path::PathBuf;

use clap::{Parser, Subcommand};
use eyre::Result;
use klara_assessment::scoring::Thresholds;
use klara_assessment::{Questionnaire, Session, State, bank};
use klara_cli::config::{self, KlaraConfig, LogFormat};
use klara_cli::replay::{self, AnswerFile};
use klara_cli::{history, interactive, report};
use klara_core::models::assessment::ScoringInput;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "klara")]
#[command(about = "Dry-eye symptom assessment")]
struct Cli {
    /// Config file (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Take the assessment interactively
    Take {
        /// Do not append the result to history
        #[arg(long)]
        no_save: bool,
    },
    /// Run the assessment from a JSON file of answers
    Assess {
        /// File of {"screening": {id: option}, "clinical": {id: option}}
        answers: PathBuf,
        #[arg(long)]
        no_save: bool,
    },
    /// Classify scores directly
    Score {
        #[arg(long)]
        total: i32,
        #[arg(long)]
        deq5: i32,
        #[arg(long)]
        deq5_positive: bool,
        #[arg(long, default_value_t = 0)]
        risk_factors: i32,
    },
    /// Print the active question bank as JSON
    Questions,
    /// Show symptom history
    History {
        /// Remove all stored results
        #[arg(long)]
        clear: bool,
    },
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    let config_path = match cli.config {
        Some(path) => path,
        None => config::config_path()?,
    };
    let config = config::load_config(&config_path)?;
    init_tracing(config.log_format);

    match cli.command {
        Commands::Take { no_save } => {
            let questionnaire = questionnaire(&config)?;
            let stdin = std::io::stdin();
            let session = interactive::run(&questionnaire, stdin.lock(), std::io::stdout())?;
            finish(&questionnaire, &config, session, no_save)?;
        }
        Commands::Assess { answers, no_save } => {
            let questionnaire = questionnaire(&config)?;
            let answers = AnswerFile::load(&answers)?;
            let session = replay::replay(&questionnaire, &answers)?;
            if let State::Referral { red_flags } = session.state() {
                print!("{}", report::referral(red_flags));
            }
            finish(&questionnaire, &config, session, no_save)?;
        }
        Commands::Score {
            total,
            deq5,
            deq5_positive,
            risk_factors,
        } => {
            let input = ScoringInput {
                total_score: total,
                deq5_score: deq5,
                deq5_positive,
                risk_factor_count: risk_factors,
            };
            let severity = Thresholds::default().assess(&input)?;
            println!("{severity}");
        }
        Commands::Questions => {
            let questionnaire = questionnaire(&config)?;
            println!("{}", serde_json::to_string_pretty(questionnaire.bank())?);
        }
        Commands::History { clear } => {
            let mut stored = history::load_history(&config.history_path)?;
            if clear {
                stored.clear();
                history::save_history(&config.history_path, &stored)?;
                println!("History cleared.");
            } else {
                print!("{}", report::history(&stored));
            }
        }
    }

    Ok(())
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config::DEFAULT_LOG_FILTER));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    match format {
        LogFormat::Pretty => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

fn questionnaire(config: &KlaraConfig) -> Result<Questionnaire> {
    let Some(path) = &config.question_bank else {
        return Ok(Questionnaire::dry_eye());
    };
    let contents = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("failed to read question bank at {}: {e}", path.display()))?;
    let bank = bank::from_json(&contents)?;
    tracing::info!(path = %path.display(), "loaded question bank");
    Ok(Questionnaire::new(bank, Thresholds::default())?)
}

/// Print the result of a completed session and record it.
fn finish(
    questionnaire: &Questionnaire,
    config: &KlaraConfig,
    session: Session,
    no_save: bool,
) -> Result<()> {
    let Some(result) = session.result() else {
        return Ok(());
    };
    print!(
        "\n{}",
        report::result(result, questionnaire.bank().max_total_score())
    );
    if !no_save {
        history::append_result(&config.history_path, result.clone())?;
    }
    Ok(())
}
