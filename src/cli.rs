use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "netsaviors-forms",
    version,
    about = "NetSaviors Technology site forms in the terminal"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Browse the site and fill in its forms
    Run {
        /// Page to open: index, contact or support
        #[arg(long, default_value = "index")]
        page: String,

        /// Site config (YAML, or JSON by extension); built-in pages when absent
        #[arg(long)]
        config: Option<PathBuf>,

        /// Where to write logs while the screen is in use
        #[arg(long, default_value = "netsaviors-forms.log")]
        log_file: PathBuf,
    },

    /// Print a phone number in (555) 123-4567 form
    FormatPhone {
        input: String,
    },

    /// Print the character counter for a text
    Count {
        text: String,
    },

    /// Validate a JSON object of field values against a form
    Check {
        /// Form id, or `contact` / `support`
        #[arg(long)]
        form: String,

        /// JSON file with field id -> value
        #[arg(long)]
        values: PathBuf,

        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use super::{Cli, Commands};
    use clap::Parser;

    #[test]
    fn run_defaults_to_home_page() {
        let cli = Cli::try_parse_from(["netsaviors-forms", "run"]).expect("parse");
        match cli.command {
            Commands::Run { page, config, .. } => {
                assert_eq!(page, "index");
                assert!(config.is_none());
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn check_requires_form_and_values() {
        assert!(Cli::try_parse_from(["netsaviors-forms", "check", "--form", "contact"]).is_err());
        let cli = Cli::try_parse_from([
            "netsaviors-forms",
            "check",
            "--form",
            "support",
            "--values",
            "ticket.json",
        ])
        .expect("parse");
        assert!(matches!(cli.command, Commands::Check { ref form, .. } if form == "support"));
    }

    #[test]
    fn format_phone_takes_positional_input() {
        let cli = Cli::try_parse_from(["netsaviors-forms", "format-phone", "5551234567"])
            .expect("parse");
        assert!(matches!(cli.command, Commands::FormatPhone { ref input } if input == "5551234567"));
    }
}
