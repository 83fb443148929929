use clap::{Parser, Subcommand};
use std::path::PathBuf;
use time::{macros::format_description, Date};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Daily nutrition goals, day validation and compensatory meals",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the daily energy and macro goals for a profile
    Goals {
        /// Path to the profile JSON file
        #[arg(short, long)]
        profile: PathBuf,
    },
    /// Validate one day of meals against the profile's goals
    Validate {
        /// Path to the profile JSON file
        #[arg(short, long)]
        profile: PathBuf,
        /// Path to the meals JSON file (array of meals)
        #[arg(short, long)]
        meals: PathBuf,
        /// Only keep meals logged on this day (YYYY-MM-DD)
        #[arg(short, long, value_parser = parse_date)]
        date: Option<Date>,
        /// Compensatory catalog CSV (overrides NUTRI_CATALOG_PATH)
        #[arg(short, long)]
        catalog: Option<PathBuf>,
        /// Print the day summary instead, failing if the day is invalid
        #[arg(long, requires = "date")]
        finalize: bool,
    },
    /// Validate many days at once
    Batch {
        /// JSON array of {"profile": ..., "meals": [...]} objects
        #[arg(short, long)]
        input: PathBuf,
        /// Compensatory catalog CSV (overrides NUTRI_CATALOG_PATH)
        #[arg(short, long)]
        catalog: Option<PathBuf>,
    },
    /// Search reference foods by name
    Search {
        #[arg(short, long)]
        query: String,
        /// Reference foods CSV (overrides NUTRI_FOODS_PATH)
        #[arg(short, long)]
        foods: Option<PathBuf>,
    },
}

pub fn parse_date(value: &str) -> Result<Date, String> {
    Date::parse(value.trim(), format_description!("[year]-[month]-[day]"))
        .map_err(|e| format!("expected YYYY-MM-DD: {}", e))
}

pub fn parse_args() -> Cli {
    Cli::parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("2025-03-10"), Ok(date!(2025 - 03 - 10)));
        assert!(parse_date("10/03/2025").is_err());
    }

    #[test]
    fn test_finalize_requires_date() {
        let args = ["nutri_day", "validate", "-p", "p.json", "-m", "m.json", "--finalize"];
        assert!(Cli::try_parse_from(args).is_err());

        let args = [
            "nutri_day",
            "validate",
            "-p",
            "p.json",
            "-m",
            "m.json",
            "--finalize",
            "--date",
            "2025-03-10",
        ];
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Command::Validate { finalize, date, .. } => {
                assert!(finalize);
                assert_eq!(date, Some(date!(2025 - 03 - 10)));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }
}
