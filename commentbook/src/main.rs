//! Oracle comments export tool.
//!
//! This binary connects to an Oracle schema and writes the table and column
//! comments of every table into `<username>.xlsx`: a contents sheet linking
//! to one sheet per table.
//!
//! # Security Guarantees
//! - Read-only catalog queries only
//! - The password is never logged or echoed back
//! - Connect strings are only logged in their credential-free form

use clap::{Args, CommandFactory, Parser, ValueEnum};
use commentbook_core::{
    ExportConfig, Result, TitleFormat,
    catalog::create_catalog,
    init_logging,
    security::{Credentials, parse_connect_string},
};
use std::path::PathBuf;
use tracing::{error, info, warn};

#[derive(Parser)]
#[command(name = "commentbook")]
#[command(about = "Export Oracle table and column comments to an Excel workbook")]
#[command(version)]
#[command(after_help = "\
NOTES:
  The Oracle driver needs Oracle Instant Client; make sure it is installed and
  on the library path (LD_LIBRARY_PATH, PATH or ORACLE_HOME) before running.
  Garbled text usually means the client NLS_LANG differs from the database
  NLS_LANG; set them to the same character set. Details:
  https://docs.oracle.com/cd/E12102_01/books/AnyInstAdm784/AnyInstAdmPreInstall18.html

EXAMPLES:
  commentbook -u yourname -p yourpwd -c '127.0.0.1:1521/orcl'
  commentbook -u yourname -p yourpwd -c '127.0.0.1:1521/orcl' --output-dir docs --no-title-row
")]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Schema user; also names the output file
    #[arg(short, long, help = "Oracle username (output is written to <username>.xlsx)")]
    pub username: String,

    /// Schema password
    #[arg(short, long, help = "Oracle password (never logged)")]
    pub password: String,

    /// Easy Connect target
    #[arg(
        short = 'c',
        long,
        help = "Connect string in host:port/service form, eg: 127.0.0.1:1521/orcl"
    )]
    pub connect_string: String,

    /// Output directory
    #[arg(long, help = "Directory to write the workbook into (default: current directory)")]
    pub output_dir: Option<PathBuf>,

    /// Table sheet title format
    #[arg(
        long,
        value_enum,
        default_value_t = TitleFormatArg::NameWithComment,
        help = "How table sheets are titled"
    )]
    pub title_format: TitleFormatArg,

    /// Skip the merged title row
    #[arg(long, help = "Do not write the merged title row above each table")]
    pub no_title_row: bool,
}

#[derive(Args)]
pub struct GlobalArgs {
    /// Increase verbosity
    #[arg(
        short,
        long,
        action = clap::ArgAction::Count,
        help = "Increase verbosity (-v, -vv)"
    )]
    pub verbose: u8,

    /// Suppress output
    #[arg(short, long, help = "Suppress all output except errors")]
    pub quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TitleFormatArg {
    /// Table name only, e.g. EMP
    NameOnly,
    /// Table name with its comment, e.g. EMP(employee records)
    NameWithComment,
}

impl From<TitleFormatArg> for TitleFormat {
    fn from(arg: TitleFormatArg) -> Self {
        match arg {
            TitleFormatArg::NameOnly => TitleFormat::NameOnly,
            TitleFormatArg::NameWithComment => TitleFormat::NameWithComment,
        }
    }
}

impl Cli {
    /// Builds the export configuration from the layout flags.
    fn export_config(&self) -> ExportConfig {
        let mut config = ExportConfig::new()
            .with_title_format(self.title_format.into())
            .with_title_row(!self.no_title_row);

        if let Some(dir) = &self.output_dir {
            config = config.with_output_dir(dir.clone());
        }

        config
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(&cli).await {
        error!("Export failed: {}", e);
        eprintln!("Error: {}", e);
        eprintln!();
        // Help output is best effort; the failure is already reported.
        let _ = Cli::command().print_help();
        std::process::exit(1);
    }
}

/// Connects, exports and closes the session.
async fn run(cli: &Cli) -> Result<()> {
    init_logging(cli.global.verbose, cli.global.quiet)?;

    let target = parse_connect_string(&cli.connect_string)?;
    let credentials = Credentials::new(cli.username.clone(), cli.password.clone());
    let config = cli.export_config();

    info!("Connecting to Oracle...");
    let catalog = create_catalog(&credentials, &target).await?;
    info!("Connected to Oracle.");
    info!("Target: {}", target);

    let outcome =
        commentbook_core::run_export(catalog.as_ref(), &config, credentials.username()).await;

    if let Err(e) = catalog.close().await {
        warn!("Failed to close the {} session: {}", catalog.database_type(), e);
    }

    let summary = outcome?;
    println!("{} exported successfully", summary.file_name());
    println!("Sheets: {}", summary.sheets);
    println!("Tables: {}", summary.table_sheets);
    println!("Catalog entries: {}", summary.contents_rows);

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use commentbook_core::CommentBookError;

    fn parse(args: &[&str]) -> std::result::Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("commentbook").chain(args.iter().copied()))
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_required_options() {
        assert!(parse(&["-u", "scott", "-p", "tiger"]).is_err());
        assert!(parse(&["-u", "scott", "-c", "127.0.0.1:1521/orcl"]).is_err());

        let cli = parse(&["-u", "scott", "-p", "tiger", "-c", "127.0.0.1:1521/orcl"]).unwrap();
        assert_eq!(cli.username, "scott");
        assert_eq!(cli.connect_string, "127.0.0.1:1521/orcl");
        assert_eq!(cli.title_format, TitleFormatArg::NameWithComment);
        assert!(!cli.no_title_row);
    }

    #[test]
    fn test_layout_flags_reach_config() {
        let cli = parse(&[
            "-u",
            "scott",
            "-p",
            "tiger",
            "-c",
            "db:1521/orcl",
            "--title-format",
            "name-only",
            "--no-title-row",
            "--output-dir",
            "out",
            "-vv",
        ])
        .unwrap();

        let config = cli.export_config();
        assert_eq!(config.options.title_format, TitleFormat::NameOnly);
        assert!(!config.options.include_title_row);
        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert_eq!(cli.global.verbose, 2);
    }

    #[test]
    fn test_default_config_matches_library_default() {
        let cli = parse(&["-u", "scott", "-p", "tiger", "-c", "db/orcl"]).unwrap();
        assert_eq!(cli.export_config(), ExportConfig::default());
    }

    #[test]
    fn test_help_carries_driver_notes() {
        let help = Cli::command().render_long_help().to_string();
        assert!(help.contains("Instant Client"));
        assert!(help.contains("NLS_LANG"));
        assert!(help.contains("-c '127.0.0.1:1521/orcl'"));
    }

    #[test]
    fn test_bad_connect_string_is_configuration_error() {
        let err = parse_connect_string("host:notaport/orcl").unwrap_err();
        assert!(matches!(err, CommentBookError::Configuration { .. }));
    }
}
