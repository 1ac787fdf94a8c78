use clap::Parser;
use netsaviors_forms::cli::{Cli, Commands};
use netsaviors_forms::config::SiteConfig;
use netsaviors_forms::core::validation::{SubmissionResult, validate_form};
use netsaviors_forms::core::value::FieldValues;
use netsaviors_forms::input::{CharCount, phone};
use netsaviors_forms::logging;
use netsaviors_forms::runtime::{Runtime, Session};
use netsaviors_forms::task::{ExecutionMode, SimulatedSubmitter};
use netsaviors_forms::terminal::Terminal;
use std::error::Error;
use std::fs;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Instant;

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode, Box<dyn Error>> {
    match cli.command {
        Commands::Run {
            page,
            config,
            log_file,
        } => {
            logging::init_file(&log_file)?;
            let site = load_site(config.as_deref())?;
            let submitter = Arc::new(SimulatedSubmitter::for_forms(site.forms()));
            let session = Session::open(
                site,
                &page,
                submitter,
                ExecutionMode::Threaded,
                Instant::now(),
            )?;
            Runtime::new(session, Terminal::new()?).run()?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::FormatPhone { input } => {
            println!("{}", phone::format(&input));
            Ok(ExitCode::SUCCESS)
        }
        Commands::Count { text } => {
            let count = CharCount::of(&text);
            println!("{} ({:?})", count.label(), count.tier);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Check {
            form,
            values,
            config,
        } => {
            logging::init_stderr()?;
            let site = load_site(config.as_deref())?;
            let form = site.form(&form)?;
            let raw: FieldValues = serde_json::from_str(&fs::read_to_string(&values)?)?;
            match validate_form(form, &raw) {
                SubmissionResult::Valid(values) => {
                    println!("valid");
                    println!("{}", serde_json::to_string_pretty(&values)?);
                    Ok(ExitCode::SUCCESS)
                }
                SubmissionResult::Invalid(failures) => {
                    println!("invalid");
                    for failure in &failures {
                        println!(
                            "  {}: {} ({})",
                            failure.field,
                            failure.error,
                            form.failure_message(failure)
                        );
                    }
                    Ok(ExitCode::from(1))
                }
            }
        }
    }
}

fn load_site(path: Option<&Path>) -> Result<SiteConfig, Box<dyn Error>> {
    Ok(match path {
        Some(path) => SiteConfig::load(path)?,
        None => SiteConfig::builtin(),
    })
}
