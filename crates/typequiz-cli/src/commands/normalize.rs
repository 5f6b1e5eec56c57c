//! The `typequiz normalize` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use typequiz_core::config::load_config_from;
use typequiz_core::normalizer::normalize_directory;
use typequiz_core::statistics::Statistics;
use typequiz_core::store::CorpusStore;

pub fn execute(config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;

    let corpus = normalize_directory(&config.raw_dir)?;
    let store = CorpusStore::new(&config.output_dir);
    store.write(&corpus)?;

    for failure in &corpus.failures {
        let kind = if failure.error.is_data_quality() {
            "DATA"
        } else {
            "FAIL"
        };
        eprintln!("  {kind}: {}: {}", failure.source, failure.error);
    }

    println!(
        "Normalized {} test(s), {} skipped, written to {}",
        corpus.tests.len(),
        corpus.failures.len(),
        config.output_dir.display()
    );
    print_statistics(&corpus.statistics);

    Ok(())
}

fn print_statistics(stats: &Statistics) {
    let mut table = Table::new();
    table.set_header(vec!["Statistic", "Value"]);
    table.add_row(vec![
        Cell::new("Total tests"),
        Cell::new(stats.total_tests),
    ]);
    table.add_row(vec![
        Cell::new("Total questions"),
        Cell::new(stats.total_questions),
    ]);
    table.add_row(vec![
        Cell::new("Average questions"),
        Cell::new(stats.average_questions),
    ]);
    for (category, count) in &stats.categories {
        table.add_row(vec![
            Cell::new(format!("Category: {category}")),
            Cell::new(count),
        ]);
    }
    for (difficulty, count) in &stats.difficulties {
        table.add_row(vec![
            Cell::new(format!("Difficulty: {difficulty}")),
            Cell::new(count),
        ]);
    }

    println!("\n{table}");
}
