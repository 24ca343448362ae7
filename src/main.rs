//! Skhokho CLI - clients, projects, sprints and tasks from the terminal

use clap::Parser;
use skhokho::cli::commands::clients::ClientEdit;
use skhokho::cli::commands::milestones::MilestoneEdit;
use skhokho::cli::commands::projects::ProjectEdit;
use skhokho::cli::commands::sprints::SprintEdit;
use skhokho::cli::commands::{auth, clients, health, milestones, projects, sprints, tasks};
use skhokho::cli::{
    ClientsCommand, Cli, Commands, Context, MilestonesCommand, ProjectsCommand, SprintsCommand,
    TasksCommand,
};
use skhokho::domain::{ClientFilter, ProjectDraft, TaskDraft};
use skhokho::schemas::{MilestoneInput, SprintInput, TaskUpdate};
use skhokho::errors::to_exit_code;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run(cli).await {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {}", e);
            if e.requires_login() {
                eprintln!("Run `skhokho login` to sign in again.");
            }
            std::process::exit(to_exit_code(&e));
        }
    }
}

async fn run(cli: Cli) -> skhokho::Result<()> {
    let Some(command) = cli.command.as_ref() else {
        // Default to showing help - clap handles this
        println!("Use --help for usage information");
        return Ok(());
    };
    let ctx = Context::from_cli(&cli)?;

    match command {
        Commands::Login { email, password } => auth::login(&ctx, email, password.as_deref()).await,
        Commands::Signup {
            email,
            first_name,
            last_name,
            company,
            password,
        } => auth::signup(&ctx, email, first_name, last_name, company, password.as_deref()).await,
        Commands::Logout => auth::logout(&ctx).await,
        Commands::Whoami => auth::whoami(&ctx).await,

        Commands::Clients(ClientsCommand::List {
            search,
            status,
            since,
            page,
        }) => {
            let filter = ClientFilter {
                search: search.clone(),
                status: *status,
                window: *since,
            };
            clients::list(&ctx, &filter, *page).await
        }
        Commands::Clients(ClientsCommand::Add {
            name,
            email,
            phone,
            status,
        }) => clients::add(&ctx, name, email, phone.as_deref(), *status).await,
        Commands::Clients(ClientsCommand::Edit {
            id,
            name,
            email,
            phone,
            status,
        }) => {
            let changes = ClientEdit {
                name: name.clone(),
                email: email.clone(),
                phone: phone.clone(),
                status: *status,
            };
            clients::edit(&ctx, *id, &changes).await
        }
        Commands::Clients(ClientsCommand::Delete { id }) => clients::delete(&ctx, *id).await,

        Commands::Projects(ProjectsCommand::List) => projects::list(&ctx).await,
        Commands::Projects(ProjectsCommand::Show { id }) => projects::show(&ctx, *id).await,
        Commands::Projects(ProjectsCommand::Add {
            name,
            client,
            status,
            priority,
            start,
            end,
            budget,
            members,
        }) => {
            let draft = ProjectDraft {
                name: name.clone(),
                client: *client,
                status: status.clone(),
                priority: *priority,
                start_date: *start,
                end_date: *end,
                budget: budget.clone(),
                team_members: members.clone(),
            };
            projects::add(&ctx, &draft).await
        }
        Commands::Projects(ProjectsCommand::Edit {
            id,
            name,
            client,
            status,
            priority,
            start,
            end,
            budget,
        }) => {
            let changes = ProjectEdit {
                name: name.clone(),
                client: *client,
                status: status.clone(),
                priority: *priority,
                start_date: *start,
                end_date: *end,
                budget: budget.clone(),
            };
            projects::edit(&ctx, *id, &changes).await
        }
        Commands::Projects(ProjectsCommand::Delete { id }) => projects::delete(&ctx, *id).await,

        Commands::Milestones(MilestonesCommand::List { project }) => {
            milestones::list(&ctx, *project).await
        }
        Commands::Milestones(MilestonesCommand::Add {
            project,
            name,
            description,
            status,
            due,
        }) => {
            let input = MilestoneInput {
                name: name.clone(),
                description: description.clone(),
                status: *status,
                due_date: *due,
                project: *project,
            };
            milestones::add(&ctx, &input).await
        }
        Commands::Milestones(MilestonesCommand::Edit {
            project,
            id,
            name,
            description,
            status,
            due,
        }) => {
            let changes = MilestoneEdit {
                name: name.clone(),
                description: description.clone(),
                status: *status,
                due_date: *due,
            };
            milestones::edit(&ctx, *project, *id, &changes).await
        }
        Commands::Milestones(MilestonesCommand::Delete { project, id }) => {
            milestones::delete(&ctx, *project, *id).await
        }

        Commands::Sprints(SprintsCommand::List { project, milestone }) => {
            sprints::list(&ctx, *project, *milestone).await
        }
        Commands::Sprints(SprintsCommand::Add {
            milestone,
            name,
            status,
            start,
            end,
        }) => {
            let input = SprintInput {
                name: name.clone(),
                status: status.clone(),
                start_date: *start,
                end_date: *end,
                milestone: *milestone,
            };
            sprints::add(&ctx, &input).await
        }
        Commands::Sprints(SprintsCommand::Edit {
            id,
            name,
            status,
            start,
            end,
        }) => {
            let changes = SprintEdit {
                name: name.clone(),
                status: status.clone(),
                start_date: *start,
                end_date: *end,
            };
            sprints::edit(&ctx, *id, &changes).await
        }
        Commands::Sprints(SprintsCommand::Delete { project, id }) => {
            sprints::delete(&ctx, *project, *id).await
        }

        Commands::Tasks(TasksCommand::List { project, sprint }) => {
            tasks::list(&ctx, *project, *sprint).await
        }
        Commands::Tasks(TasksCommand::Add {
            project,
            title,
            sprint,
            milestone,
            description,
            priority,
            assignee,
            start,
            end,
            hours,
        }) => {
            let draft = TaskDraft {
                title: title.clone(),
                description: description.clone(),
                priority: *priority,
                assignee: *assignee,
                milestone: *milestone,
                sprint: *sprint,
                start_date: *start,
                end_date: *end,
                estimated_hours: *hours,
            };
            tasks::add(&ctx, *project, &draft).await
        }
        Commands::Tasks(TasksCommand::Edit {
            sprint,
            id,
            title,
            description,
            priority,
            assignee,
            start,
            end,
            hours,
        }) => {
            let update = TaskUpdate {
                title: title.clone(),
                description: description.clone(),
                priority: *priority,
                assignee: *assignee,
                start_date: *start,
                end_date: *end,
                estimated_hours: *hours,
            };
            tasks::edit(&ctx, *sprint, *id, &update).await
        }
        Commands::Tasks(TasksCommand::Advance { sprint, id }) => {
            tasks::advance(&ctx, *sprint, *id).await
        }
        Commands::Tasks(TasksCommand::Delete { sprint, id }) => {
            tasks::delete(&ctx, *sprint, *id).await
        }

        Commands::Health { project } => health::run(&ctx, *project).await,
    }
}
