//! Command-line front end for the staffdesk core.
//!
//! # Responsibility
//! - Resolve store configuration and logging from flags/environment.
//! - Call core services and render their results; no SQL lives here.

use anyhow::{bail, Context};
use clap::Parser;
use cli::{Cli, Commands, Entity, OutputFormat};
use log::debug;
use staffdesk_core::{Cell, Report, Staffdesk, StoreConfig, Table};
use std::path::Path;
use std::process::ExitCode;

mod cli;
mod edit;
mod output;

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(error) => {
            eprintln!("staffdesk error: {error:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let config = resolve_config(&cli)?;
    debug!(
        "event=cli_start module=cli status=ok db={}",
        config.database_path.display()
    );
    let desk = Staffdesk::new(config);

    match cli.command {
        Commands::Init => {
            let version = desk.provider().initialize()?;
            println!(
                "initialized {} (schema version {version})",
                desk.provider().config().database_path.display()
            );
        }
        Commands::Status => {
            let store = desk.provider().probe();
            print!(
                "{}",
                output::render_status(&desk.provider().config().database_path, &store)
            );
            if store.is_err() {
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::List { entity, format } => {
            let rendered = match (entity, format) {
                (Entity::Employees, OutputFormat::Json) => {
                    serde_json::to_string_pretty(&desk.employees.list()?)?
                }
                (Entity::Departments, OutputFormat::Json) => {
                    serde_json::to_string_pretty(&desk.departments.list()?)?
                }
                (Entity::Projects, OutputFormat::Json) => {
                    serde_json::to_string_pretty(&desk.projects.list()?)?
                }
                (Entity::Assignments, OutputFormat::Json) => {
                    serde_json::to_string_pretty(&desk.assignments.list()?)?
                }
                (entity, format) => output::render_table(&entity_table(&desk, entity)?, format)?,
            };
            print!("{}", with_trailing_newline(rendered));
        }
        Commands::Create { record } => println!("{}", edit::create(&desk, record)?),
        Commands::Update { record } => println!("{}", edit::update(&desk, record)?),
        Commands::Delete { target } => println!("{}", edit::delete(&desk, target)?),
        Commands::Report {
            name,
            format,
            output: path,
        } => {
            let report: Report = match name.parse() {
                Ok(report) => report,
                Err(message) => bail!(message),
            };
            let table = desk.reports.run(report)?;
            let rendered = output::render_table(&table, format)?;
            match path {
                Some(path) => write_output(&path, &rendered)?,
                None => print!("{rendered}"),
            }
        }
        Commands::Summary { top, format } => {
            let summary = desk.reports.summary(top)?;
            if format == OutputFormat::Json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
                return Ok(ExitCode::SUCCESS);
            }
            println!("employees:      {}", summary.employees);
            println!("departments:    {}", summary.departments);
            println!("projects:       {}", summary.projects);
            println!("assignments:    {}", summary.assignments);
            match summary.average_salary {
                Some(average) => println!("average salary: {average:.2}"),
                None => println!("average salary: -"),
            }
            let earners = Table {
                columns: vec![
                    "EmployeeID".to_string(),
                    "EmployeeName".to_string(),
                    "AverageSalary".to_string(),
                ],
                rows: summary
                    .top_earners
                    .iter()
                    .map(|earner| {
                        vec![
                            Cell::Integer(earner.employee_id),
                            Cell::Text(earner.employee_name.clone()),
                            Cell::Real(earner.average_salary),
                        ]
                    })
                    .collect(),
            };
            println!();
            print!("{}", output::render_table(&earners, format)?);
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn init_logging(cli: &Cli) -> anyhow::Result<()> {
    let result = match cli.log_dir.as_deref() {
        Some(dir) => staffdesk_core::init_logging(&cli.log_level, dir),
        None => staffdesk_core::init_console_logging(&cli.log_level),
    };
    result.map_err(anyhow::Error::msg)
}

fn resolve_config(cli: &Cli) -> anyhow::Result<StoreConfig> {
    if let Some(path) = &cli.config {
        return StoreConfig::load(path)
            .with_context(|| format!("failed to load config `{}`", path.display()));
    }
    match &cli.db {
        Some(path) => Ok(StoreConfig::new(path)),
        None => bail!("no database configured; pass --db, --config or set STAFFDESK_DB"),
    }
}

fn entity_table(desk: &Staffdesk, entity: Entity) -> anyhow::Result<Table> {
    Ok(match entity {
        Entity::Employees => output::employees_table(&desk.employees.list()?),
        Entity::Departments => output::departments_table(&desk.departments.list()?),
        Entity::Projects => output::projects_table(&desk.projects.list()?),
        Entity::Assignments => output::assignments_table(&desk.assignments.list()?),
    })
}

fn write_output(path: &Path, rendered: &str) -> anyhow::Result<()> {
    std::fs::write(path, rendered)
        .with_context(|| format!("failed to write `{}`", path.display()))?;
    eprintln!("wrote {}", path.display());
    Ok(())
}

fn with_trailing_newline(mut text: String) -> String {
    if !text.ends_with('\n') {
        text.push('\n');
    }
    text
}

#[cfg(test)]
mod tests {
    use super::resolve_config;
    use crate::cli::Cli;
    use clap::Parser;
    use std::path::PathBuf;

    #[test]
    fn config_file_wins_over_db_flag() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("staffdesk.json");
        std::fs::write(&config_path, r#"{ "database_path": "/tmp/from-config.db" }"#).unwrap();

        let cli = Cli::try_parse_from([
            "staffdesk",
            "--db",
            "/tmp/from-flag.db",
            "--config",
            config_path.to_str().unwrap(),
            "status",
        ])
        .unwrap();

        let config = resolve_config(&cli).unwrap();
        assert_eq!(config.database_path, PathBuf::from("/tmp/from-config.db"));
    }

    #[test]
    fn db_flag_is_used_without_config() {
        let cli = Cli::try_parse_from(["staffdesk", "--db", "/tmp/from-flag.db", "status"]).unwrap();
        let config = resolve_config(&cli).unwrap();
        assert_eq!(config.database_path, PathBuf::from("/tmp/from-flag.db"));
    }
}
