//! CLI module for skhokho
//!
//! Provides the command-line interface using clap.

pub mod commands;
mod output;

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{ArgGroup, Parser, Subcommand};
use inquire::PasswordDisplayMode;

use crate::api::ApiClient;
use crate::config::load_config;
use crate::domain::TimeWindow;
use crate::errors::{Result, SkhokhoError};
use crate::fs::resolve_config_dir;
use crate::schemas::{ClientStatus, Config, MilestoneStatus, Priority, ProjectStatus, SprintStatus};
use crate::session::{Session, SessionStore};
use crate::workflow::{AutoConfirm, Confirm};

pub use output::{print_json, print_table};

/// Skhokho - clients, projects, sprints and tasks from the terminal
#[derive(Parser, Debug)]
#[command(name = "skhokho")]
#[command(version)]
#[command(about = "Manage clients, projects, sprints and tasks on a Skhokho workspace")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress info-level output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Answer yes to every confirmation
    #[arg(short, long, global = true)]
    pub yes: bool,

    /// Override the config directory
    #[arg(long, global = true)]
    pub config_dir: Option<PathBuf>,

    /// Override the API base URL
    #[arg(long, global = true)]
    pub api_url: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log in and store the session
    Login {
        email: String,

        /// Prompted for (hidden) when omitted
        #[arg(long)]
        password: Option<String>,
    },

    /// Create an account and its company workspace
    Signup {
        email: String,

        #[arg(long)]
        first_name: String,

        #[arg(long)]
        last_name: String,

        /// Company (tenant) name
        #[arg(long)]
        company: String,

        /// Prompted for (hidden) when omitted
        #[arg(long)]
        password: Option<String>,
    },

    /// Remove the stored session
    Logout,

    /// Show the logged-in user
    Whoami,

    /// Manage clients
    #[command(subcommand)]
    Clients(ClientsCommand),

    /// Manage projects
    #[command(subcommand)]
    Projects(ProjectsCommand),

    /// Manage milestones
    #[command(subcommand)]
    Milestones(MilestonesCommand),

    /// Manage sprints
    #[command(subcommand)]
    Sprints(SprintsCommand),

    /// Manage tasks
    #[command(subcommand)]
    Tasks(TasksCommand),

    /// Show a project's health
    Health {
        /// Project ID
        project: i64,
    },
}

#[derive(Subcommand, Debug)]
pub enum ClientsCommand {
    /// List clients with optional filtering
    List {
        /// Match name, email, phone or status
        #[arg(long, default_value = "")]
        search: String,

        /// Filter by status (active, inactive, prospect)
        #[arg(long)]
        status: Option<ClientStatus>,

        /// Created within: all, 30d, 90d
        #[arg(long, default_value = "all")]
        since: TimeWindow,

        /// Page number, starting at 1
        #[arg(long, default_value_t = 1)]
        page: usize,
    },

    /// Add a client
    Add {
        name: String,

        email: String,

        #[arg(long)]
        phone: Option<String>,

        #[arg(long, default_value = "prospect")]
        status: ClientStatus,
    },

    /// Change a client; omitted fields keep their value
    Edit {
        /// Client ID
        id: i64,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        email: Option<String>,

        /// Pass an empty string to clear
        #[arg(long)]
        phone: Option<String>,

        #[arg(long)]
        status: Option<ClientStatus>,
    },

    /// Delete a client
    Delete {
        /// Client ID
        id: i64,
    },
}

#[derive(Subcommand, Debug)]
pub enum ProjectsCommand {
    /// List projects
    List,

    /// Show a project with its milestones and sprints
    Show {
        /// Project ID
        id: i64,
    },

    /// Create a project for a client
    Add {
        name: String,

        /// Client ID
        #[arg(long)]
        client: i64,

        #[arg(long, default_value = "planning")]
        status: ProjectStatus,

        #[arg(long, default_value = "medium")]
        priority: Priority,

        /// YYYY-MM-DD
        #[arg(long)]
        start: Option<NaiveDate>,

        /// YYYY-MM-DD
        #[arg(long)]
        end: Option<NaiveDate>,

        /// Decimal amount, e.g. 12500.00
        #[arg(long)]
        budget: Option<String>,

        /// Team member user ID (repeatable)
        #[arg(long = "member")]
        members: Vec<i64>,
    },

    /// Change a project; omitted fields keep their value
    Edit {
        /// Project ID
        id: i64,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        client: Option<i64>,

        #[arg(long)]
        status: Option<ProjectStatus>,

        #[arg(long)]
        priority: Option<Priority>,

        #[arg(long)]
        start: Option<NaiveDate>,

        #[arg(long)]
        end: Option<NaiveDate>,

        #[arg(long)]
        budget: Option<String>,
    },

    /// Delete a project
    Delete {
        /// Project ID
        id: i64,
    },
}

#[derive(Subcommand, Debug)]
pub enum MilestonesCommand {
    /// List a project's milestones
    List {
        /// Project ID
        project: i64,
    },

    /// Create a milestone
    Add {
        /// Project ID
        project: i64,

        name: String,

        #[arg(long, default_value = "")]
        description: String,

        #[arg(long, default_value = "planning")]
        status: MilestoneStatus,

        /// YYYY-MM-DD
        #[arg(long)]
        due: Option<NaiveDate>,
    },

    /// Change a milestone; omitted fields keep their value
    Edit {
        /// Project ID
        project: i64,

        /// Milestone ID
        id: i64,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        description: Option<String>,

        #[arg(long)]
        status: Option<MilestoneStatus>,

        #[arg(long)]
        due: Option<NaiveDate>,
    },

    /// Delete a milestone with its sprints and tasks
    Delete {
        /// Project ID
        project: i64,

        /// Milestone ID
        id: i64,
    },
}

#[derive(Subcommand, Debug)]
pub enum SprintsCommand {
    /// List a project's sprints
    List {
        /// Project ID
        project: i64,

        /// Only sprints of this milestone
        #[arg(long)]
        milestone: Option<i64>,
    },

    /// Create a sprint inside a milestone
    Add {
        /// Milestone ID
        milestone: i64,

        name: String,

        #[arg(long, default_value = "planned")]
        status: SprintStatus,

        /// YYYY-MM-DD
        #[arg(long)]
        start: Option<NaiveDate>,

        /// YYYY-MM-DD
        #[arg(long)]
        end: Option<NaiveDate>,
    },

    /// Change a sprint; omitted fields keep their value
    Edit {
        /// Sprint ID
        id: i64,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        status: Option<SprintStatus>,

        #[arg(long)]
        start: Option<NaiveDate>,

        #[arg(long)]
        end: Option<NaiveDate>,
    },

    /// Delete a sprint
    Delete {
        /// Project ID
        project: i64,

        /// Sprint ID
        id: i64,
    },
}

#[derive(Subcommand, Debug)]
pub enum TasksCommand {
    /// List tasks of a project or sprint
    #[command(group(ArgGroup::new("scope").required(true).multiple(true).args(["project", "sprint"])))]
    List {
        #[arg(long)]
        project: Option<i64>,

        #[arg(long)]
        sprint: Option<i64>,
    },

    /// Create a task
    Add {
        /// Project ID, used to load sprints
        project: i64,

        title: String,

        /// Sprint ID; the milestone is taken from it
        #[arg(long)]
        sprint: Option<i64>,

        /// Milestone ID, for backlog tasks without a sprint
        #[arg(long)]
        milestone: Option<i64>,

        #[arg(long)]
        description: Option<String>,

        #[arg(long, default_value = "medium")]
        priority: Priority,

        /// Assignee user ID
        #[arg(long)]
        assignee: Option<i64>,

        /// YYYY-MM-DD
        #[arg(long)]
        start: Option<NaiveDate>,

        /// YYYY-MM-DD
        #[arg(long)]
        end: Option<NaiveDate>,

        #[arg(long)]
        hours: Option<f64>,
    },

    /// Move a task one step along the workflow
    Advance {
        /// Sprint ID the task belongs to
        sprint: i64,

        /// Task ID
        id: i64,
    },

    /// Change a task; only the given fields are sent
    Edit {
        /// Sprint ID the task belongs to
        sprint: i64,

        /// Task ID
        id: i64,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        description: Option<String>,

        #[arg(long)]
        priority: Option<Priority>,

        /// Assignee user ID
        #[arg(long)]
        assignee: Option<i64>,

        /// YYYY-MM-DD
        #[arg(long)]
        start: Option<NaiveDate>,

        /// YYYY-MM-DD
        #[arg(long)]
        end: Option<NaiveDate>,

        #[arg(long)]
        hours: Option<f64>,
    },

    /// Delete a task
    Delete {
        /// Sprint ID the task belongs to
        sprint: i64,

        /// Task ID
        id: i64,
    },
}

/// Everything a command needs from the global flags
#[derive(Debug, Clone)]
pub struct Context {
    pub config: Config,
    pub store: SessionStore,
    pub json: bool,
    pub yes: bool,
}

impl Context {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let dir = resolve_config_dir(cli.config_dir.as_deref())?;
        let config = load_config(&dir, cli.api_url.as_deref())?;
        Ok(Context {
            config,
            store: SessionStore::in_dir(&dir),
            json: cli.json,
            yes: cli.yes,
        })
    }

    /// Client without credentials, for login and signup
    pub fn public_api(&self) -> Result<ApiClient> {
        ApiClient::new(&self.config)
    }

    /// Client using the stored session
    pub fn api(&self) -> Result<(ApiClient, Session)> {
        let session = self.store.require()?;
        let api = ApiClient::with_session(&self.config, &session)?;
        Ok((api, session))
    }

    pub fn confirmer(&self) -> Box<dyn Confirm> {
        if self.yes {
            Box::new(AutoConfirm(true))
        } else {
            Box::new(TerminalConfirm)
        }
    }
}

/// Interactive yes/no prompt, defaulting to no
#[derive(Debug, Clone, Copy)]
pub struct TerminalConfirm;

impl Confirm for TerminalConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        // Esc, Ctrl-C or a non-interactive stdin all count as "no"
        inquire::Confirm::new(prompt)
            .with_default(false)
            .prompt()
            .unwrap_or(false)
    }
}

/// Password from the flag, or typed without echo.
///
/// `confirm` asks a second time and requires both entries to match.
pub(crate) fn password_or_prompt(password: Option<&str>, confirm: bool) -> Result<String> {
    if let Some(p) = password {
        return Ok(p.to_string());
    }
    let prompt = inquire::Password::new("Password:").with_display_mode(PasswordDisplayMode::Masked);
    let prompt = if confirm {
        prompt.with_custom_confirmation_message("Confirm password:")
    } else {
        prompt.without_confirmation()
    };
    prompt
        .prompt()
        .map_err(|e| SkhokhoError::wrap(e, "Password input cancelled"))
}
