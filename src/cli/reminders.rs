use crate::cli::{load_config, open_store, today_or, OutputFormat, RemindersArgs};
use crate::reminders::{plan_reminders, reminders_due, Reminder};
use crate::store::TaskStore;

pub async fn execute(args: RemindersArgs) -> anyhow::Result<()> {
    let config = load_config(&args.config)?;
    let store = open_store(&config);

    let tasks = store.tasks_for_company(&args.company).await?;
    let reminders = if args.all {
        plan_reminders(&tasks, &config.reminders)
    } else {
        reminders_due(&tasks, &config.reminders, today_or(args.today))
    };

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&reminders)?),
        OutputFormat::Table => print_reminders(&reminders),
    }
    Ok(())
}

fn print_reminders(reminders: &[Reminder]) {
    if reminders.is_empty() {
        println!("No reminders");
        return;
    }

    for reminder in reminders {
        println!(
            "{} [{}] {} due {} (J-{})",
            reminder.remind_on,
            reminder.channel,
            reminder.title,
            reminder.due_date,
            reminder.days_before
        );
    }
}
