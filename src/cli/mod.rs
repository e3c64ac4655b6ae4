//! Command-line interface for `sqa`.
//!
//! This module provides the CLI parsing and command routing using clap.

pub mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use crate::config::{self, Config, Workspace};
use crate::logging;

/// `sqa` - issue tracker for software quality assurance testing.
#[derive(Parser, Debug)]
#[command(name = "sqa")]
#[command(
    author,
    version,
    about = "Issue tracker for software quality assurance testing",
    long_about = None,
    after_help = "Data lives in ./.sqa unless --data-dir or SQA_DATA_DIR says otherwise."
)]
pub struct Cli {
    /// Output format: text (default) or json
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbose output (repeat for more)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Directory holding store.json and config.yaml
    #[arg(long, global = true, env = "SQA_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize the data directory
    Init(InitArgs),

    /// Manage projects
    #[command(alias = "projects")]
    Project(ProjectCommand),

    /// Manage issues in the active project
    Issue(IssueCommand),

    /// List issues of the active project
    #[command(alias = "ls")]
    List(ListArgs),

    /// Dashboard counts for the active project
    #[command(alias = "stats")]
    Summary,

    /// Export issues of the active project to CSV or XLSX
    Export(ExportArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),

    /// Show version information
    Version(VersionArgs),
}

#[derive(Args, Debug, Default)]
pub struct InitArgs {
    /// Start with no projects instead of the demo data
    #[arg(long)]
    pub empty: bool,
}

// ============================================================================
// Projects
// ============================================================================

#[derive(Args, Debug)]
pub struct ProjectCommand {
    #[command(subcommand)]
    pub command: ProjectSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ProjectSubcommand {
    /// List projects with issue counts
    List(ProjectListArgs),

    /// Create a project and make it active
    Create(ProjectCreateArgs),

    /// Make a project active
    Select {
        /// Project ID
        id: String,
    },

    /// Show a project (default: the active one)
    Show {
        /// Project ID
        id: Option<String>,
    },

    /// Edit project settings
    Update(ProjectUpdateArgs),

    /// Archive a project
    Archive {
        /// Project ID
        id: String,
    },
}

#[derive(Args, Debug, Default)]
pub struct ProjectListArgs {
    /// Only projects whose name or description contains this text
    #[arg(long, short = 's')]
    pub search: Option<String>,

    /// Include archived projects
    #[arg(long, short = 'a')]
    pub all: bool,
}

#[derive(Args, Debug, Default)]
pub struct ProjectCreateArgs {
    /// Project name
    pub name: String,

    #[arg(long, short = 'd')]
    pub description: Option<String>,

    #[arg(long, default_value_t = 1)]
    pub team_size: u32,

    /// Web App, Mobile App, API or Desktop
    #[arg(long = "type", short = 't')]
    pub type_: Option<String>,
}

#[derive(Args, Debug, Default)]
pub struct ProjectUpdateArgs {
    /// Project ID
    pub id: String,

    #[arg(long)]
    pub name: Option<String>,

    /// New description (empty string clears it)
    #[arg(long, short = 'd')]
    pub description: Option<String>,

    #[arg(long)]
    pub team_size: Option<u32>,

    #[arg(long = "type", short = 't')]
    pub type_: Option<String>,
}

// ============================================================================
// Issues
// ============================================================================

#[derive(Args, Debug)]
pub struct IssueCommand {
    #[command(subcommand)]
    pub command: IssueSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum IssueSubcommand {
    /// Report a new issue
    #[command(alias = "create")]
    Add(IssueAddArgs),

    /// Edit an existing issue
    Update(IssueUpdateArgs),

    /// Delete an issue
    #[command(alias = "rm")]
    Delete {
        /// Issue ID
        id: String,
    },

    /// Show issue details
    Show {
        /// Issue ID
        id: String,
    },
}

/// Issue fields shared by `add` and `update`.
#[derive(Args, Debug, Default, Clone)]
pub struct IssueFields {
    /// Test type (ui, func, smoke, int, api, perf, sec, reg)
    #[arg(long = "type", short = 't')]
    pub type_: Option<String>,

    /// Date reported (YYYY-MM-DD)
    #[arg(long)]
    pub date: Option<String>,

    #[arg(long, short = 'r')]
    pub reporter: Option<String>,

    /// Page or screen where the issue appears
    #[arg(long)]
    pub page: Option<String>,

    /// Test case identifier
    #[arg(long)]
    pub test_case: Option<String>,

    #[arg(long, short = 'd')]
    pub description: Option<String>,

    #[arg(long)]
    pub steps: Option<String>,

    #[arg(long)]
    pub expected: Option<String>,

    #[arg(long)]
    pub actual: Option<String>,

    /// Critical, High, Medium or Low
    #[arg(long)]
    pub severity: Option<String>,

    /// P0-P3
    #[arg(long, short = 'p')]
    pub priority: Option<String>,

    /// Open, "In Progress", Fixed or Closed
    #[arg(long, short = 's')]
    pub status: Option<String>,

    #[arg(long)]
    pub browser: Option<String>,

    #[arg(long)]
    pub screenshot: Option<String>,

    #[arg(long, short = 'a')]
    pub assignee: Option<String>,

    /// Date fixed (YYYY-MM-DD)
    #[arg(long)]
    pub fixed_date: Option<String>,

    #[arg(long)]
    pub comments: Option<String>,
}

#[derive(Args, Debug, Default)]
pub struct IssueAddArgs {
    /// Issue title
    pub title: Option<String>,

    /// Issue title (alternative to positional argument)
    #[arg(long = "title")]
    pub title_flag: Option<String>,

    /// Explicit ID instead of the next sequential one
    #[arg(long)]
    pub id: Option<String>,

    #[command(flatten)]
    pub fields: IssueFields,
}

#[derive(Args, Debug, Default)]
pub struct IssueUpdateArgs {
    /// Issue ID
    pub id: String,

    #[arg(long)]
    pub title: Option<String>,

    #[command(flatten)]
    pub fields: IssueFields,
}

// ============================================================================
// Views
// ============================================================================

/// Filter and tab selection shared by `list` and `export`.
#[derive(Args, Debug, Default, Clone)]
pub struct FilterArgs {
    /// Text to find in title, description or ID
    #[arg(long)]
    pub search: Option<String>,

    /// Filter by status (repeatable, comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub status: Vec<String>,

    /// Filter by severity (repeatable, comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub severity: Vec<String>,

    /// Filter by priority (repeatable, comma-separated)
    #[arg(long, short = 'p', value_delimiter = ',')]
    pub priority: Vec<String>,

    /// Filter by test type (repeatable, comma-separated)
    #[arg(long = "type", short = 't', value_delimiter = ',')]
    pub type_: Vec<String>,

    /// Test type tab ("all" or one type)
    #[arg(long)]
    pub tab: Option<String>,
}

/// Sort order shared by `list` and `export`.
#[derive(Args, Debug, Default, Clone)]
pub struct SortArgs {
    /// Sort column: id, date, title, severity, priority, status
    #[arg(long)]
    pub sort: Option<String>,

    /// Sort ascending
    #[arg(long, conflicts_with = "desc")]
    pub asc: bool,

    /// Sort descending
    #[arg(long)]
    pub desc: bool,
}

#[derive(Args, Debug, Default, Clone)]
pub struct ListArgs {
    #[command(flatten)]
    pub filters: FilterArgs,

    #[command(flatten)]
    pub sort: SortArgs,

    /// Show at most this many rows
    #[arg(long)]
    pub limit: Option<usize>,
}

#[derive(Args, Debug, Default, Clone)]
pub struct ExportArgs {
    /// Output format: xlsx or csv
    #[arg(long, short = 'f', default_value = "xlsx")]
    pub format: String,

    /// Output file (default: <export_basename>.<ext> in the current directory)
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub filters: FilterArgs,

    #[command(flatten)]
    pub sort: SortArgs,
}

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Target shell
    #[arg(value_enum)]
    pub shell: Shell,
}

#[derive(Args, Debug, Default)]
pub struct VersionArgs {
    /// Print only the version number
    #[arg(long)]
    pub short: bool,
}

/// Run the CLI.
///
/// # Errors
///
/// Returns an error if the command fails to execute.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let data_dir = config::resolve_data_dir(cli.data_dir.as_deref());
    let loaded = Config::load(&data_dir);
    let log_format = loaded.as_ref().ok().and_then(|c| c.log_format);
    logging::init_logging(cli.verbose, cli.quiet, log_format)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {e}"))?;

    let Some(command) = cli.command else {
        println!("sqa - issue tracker for software quality assurance. Use --help for usage.");
        return Ok(());
    };

    // Commands that do not touch the data directory.
    match &command {
        Commands::Completions(args) => {
            commands::completions::execute(args.shell);
            return Ok(());
        }
        Commands::Version(args) => {
            commands::version::execute(args, cli.json)?;
            return Ok(());
        }
        _ => {}
    }

    let workspace = Workspace::new(data_dir, loaded?);
    let json = cli.json;
    match command {
        Commands::Init(args) => commands::init::execute(&args, &workspace, json)?,
        Commands::Project(project) => commands::project::execute(project.command, &workspace, json)?,
        Commands::Issue(issue) => commands::issue::execute(issue.command, &workspace, json)?,
        Commands::List(args) => commands::list::execute(&args, &workspace, json)?,
        Commands::Summary => commands::summary::execute(&workspace, json)?,
        Commands::Export(args) => commands::export::execute(&args, &workspace, json)?,
        Commands::Completions(_) | Commands::Version(_) => {}
    }
    Ok(())
}
