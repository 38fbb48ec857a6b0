//! CLI argument definitions for the survey normalizer.

use std::path::PathBuf;

use clap::{Args, Parser, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use survey_model::DEFAULT_MARKER_LABEL;

#[derive(Parser)]
#[command(
    name = "surveydi",
    version,
    about = "Normalize survey export CSV files into relational tables",
    long_about = "Convert a directory of survey export CSV files into five \
                  tab-delimited relations (Surveys, Questions, SurveysQuestions,\n\
                  Respondents, QuestionResponses) that can be imported into a database.\n\n\
                  Questions with identical text share one id across every survey."
)]
pub struct Cli {
    #[command(flatten)]
    pub run: RunArgs,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(long = "log-format", value_enum, default_value = "pretty")]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Directory containing the survey export CSV files.
    #[arg(short = 'i', long = "input-dir", value_name = "DIR")]
    pub input_dir: PathBuf,

    /// Directory that will contain the output .tab files.
    #[arg(short = 'o', long = "output-dir", value_name = "DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Also load every table into this SQLite database.
    #[arg(long = "db", value_name = "PATH")]
    pub database: Option<PathBuf>,

    /// Load only into the database; skip the .tab files.
    #[arg(long = "db-only", requires = "database")]
    pub db_only: bool,

    /// Header label that separates respondent metadata from questions.
    #[arg(long = "marker", value_name = "LABEL", default_value = DEFAULT_MARKER_LABEL)]
    pub marker: String,

    /// Write a JSON run report (table counts and recorded issues).
    #[arg(long = "report", value_name = "PATH")]
    pub report: Option<PathBuf>,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults_apply() {
        let cli = Cli::try_parse_from(["surveydi", "-i", "exports"]).unwrap();
        assert_eq!(cli.run.input_dir, PathBuf::from("exports"));
        assert_eq!(cli.run.output_dir, PathBuf::from("."));
        assert_eq!(cli.run.marker, "Custom Data");
        assert!(cli.run.database.is_none());
        assert!(!cli.run.db_only);
    }

    #[test]
    fn input_dir_is_required() {
        assert!(Cli::try_parse_from(["surveydi"]).is_err());
    }

    #[test]
    fn db_only_requires_db() {
        assert!(Cli::try_parse_from(["surveydi", "-i", "x", "--db-only"]).is_err());
        let cli =
            Cli::try_parse_from(["surveydi", "-i", "x", "--db", "out.db", "--db-only"]).unwrap();
        assert!(cli.run.db_only);
        assert_eq!(cli.run.database, Some(PathBuf::from("out.db")));
    }
}
