use anyhow::{Context, Result};
use log::info;
use std::time::Instant;

use comment_harvest::config::{Cli, Command};
use comment_harvest::export;
use comment_harvest::pipeline::AnalysisSummary;
use comment_harvest::{CommentPipeline, NameGenderTable};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::load();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("comment-harvest starting");
    let names = NameGenderTable::load_or_empty(&cli.names.name_table, cli.names.name_table_timeout).await;
    let pipeline = CommentPipeline::new();

    match cli.command {
        Command::Process { input, output_dir } => {
            let start = Instant::now();
            let document = std::fs::read(&input)
                .with_context(|| format!("Failed to read HTML page: {}", input.display()))?;
            let output = pipeline.process_document(&document, &names);

            export::write_artifacts(&output_dir, &output.records, &output.frequencies, &output.log)
                .with_context(|| format!("Failed to write tables to {}", output_dir.display()))?;

            info!(
                "Wrote {} comments and {} words to {} in {:.2}s",
                output.records.len(),
                output.frequencies.len(),
                output_dir.display(),
                start.elapsed().as_secs_f64()
            );
        }
        Command::Analyze {
            comments,
            words,
            top_words,
            json,
        } => {
            let rows = export::read_comments_file(&comments)
                .with_context(|| format!("Failed to read comments table: {}", comments.display()))?;
            let imported_words = match &words {
                Some(path) => Some(
                    export::read_words_file(path)
                        .with_context(|| format!("Failed to read words table: {}", path.display()))?,
                ),
                None => None,
            };

            let (summary, _) = pipeline.reanalyze(&rows, imported_words.as_deref(), &names, top_words);
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                print_summary(&summary);
            }
        }
    }

    Ok(())
}

fn print_summary(summary: &AnalysisSummary) {
    println!("=== Analysis summary ===");
    println!("Total comments: {}", summary.total_comments);
    println!("Gender distribution:");
    for gc in &summary.genders {
        println!("  {}: {}", gc.gender, gc.count);
    }
    println!("Top words:");
    for entry in &summary.top_words {
        println!("  {:<20} {}", entry.word, entry.count);
    }
}
