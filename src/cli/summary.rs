use crate::cli::{load_config, open_store, today_or, OutputFormat, SummaryArgs};
use crate::output::{build_summary_markdown, summarize, write_summary};
use crate::store::TaskStore;
use tracing::info;

pub async fn execute(args: SummaryArgs) -> anyhow::Result<()> {
    let config = load_config(&args.config)?;
    let store = open_store(&config);

    let tasks = store.tasks_for_company(&args.company).await?;
    let summary = summarize(&args.company, &tasks, today_or(args.today));

    if args.write {
        write_summary(&config.report_dir, &summary)?;
        info!("Wrote summary to {:?}", config.report_dir);
    }

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
        OutputFormat::Table => print!("{}", build_summary_markdown(&summary)),
    }
    Ok(())
}
