//! CLI handlers for `tasks` and `status`

use crate::cli::{load_config, open_store, OutputFormat, StatusArgs, TasksArgs};
use crate::store::{TaskRecord, TaskStore};
use tracing::info;

pub async fn execute(args: TasksArgs) -> anyhow::Result<()> {
    let config = load_config(&args.config)?;
    let store = open_store(&config);

    let mut tasks = store.tasks_for_company(&args.company).await?;
    if let Some(year) = args.cycle_year {
        tasks.retain(|t| t.cycle_year == year);
    }

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&tasks)?),
        OutputFormat::Table => print_tasks(&tasks),
    }
    Ok(())
}

pub async fn set_status(args: StatusArgs) -> anyhow::Result<()> {
    let config = load_config(&args.config)?;
    let store = open_store(&config);

    let task = store.update_status(&args.task, args.status).await?;
    info!("{} ({}) is now {}", task.title, task.id, task.status);
    println!("{}", serde_json::to_string_pretty(&task)?);
    Ok(())
}

fn print_tasks(tasks: &[TaskRecord]) {
    if tasks.is_empty() {
        println!("No tasks");
        return;
    }

    println!(
        "{:<36} {:<6} {:<12} {:<12} TITLE",
        "ID", "CYCLE", "DUE", "STATUS"
    );
    for task in tasks {
        println!(
            "{:<36} {:<6} {:<12} {:<12} {}",
            task.id,
            task.cycle_year,
            task.due_date.to_string(),
            task.status.to_string(),
            task.title
        );
    }
}
