//! The `typequiz score` command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use comfy_table::{Cell, Table};

use typequiz_core::config::load_config_from;
use typequiz_core::model::Answer;
use typequiz_core::scoring::{QuizResult, ScoringEngine};
use typequiz_core::store::{CorpusStore, ResultStore, TestResult};
use typequiz_core::typology::Axis;

pub fn execute(
    test_id: String,
    answers_path: PathBuf,
    save: bool,
    json: bool,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;

    let store = CorpusStore::new(&config.output_dir);
    let test = store
        .get(&test_id)?
        .with_context(|| format!("test not found in {}: {test_id}", config.output_dir.display()))?;

    let content = std::fs::read_to_string(&answers_path)
        .with_context(|| format!("failed to read answers: {}", answers_path.display()))?;
    let answers: Vec<Answer> =
        serde_json::from_str(&content).context("failed to parse answers JSON")?;

    let result = ScoringEngine::new(&test).score(&answers);

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_result(&result);
    }

    if save {
        let record = TestResult::new(test.id.clone(), answers, result);
        let path = ResultStore::new(&config.results_dir).save(&record)?;
        eprintln!("Result saved to: {}", path.display());
    }

    Ok(())
}

fn print_result(result: &QuizResult) {
    let profile = &result.profile;
    println!("Type: {}", result.code());
    println!("{}", profile.title);
    if !profile.description.is_empty() {
        println!("{}", profile.description);
    }
    if result.fallback {
        println!("(no profile for this type in the test, showing a generic result)");
    }

    let mut table = Table::new();
    table.set_header(vec!["Axis", "Score", "%", "Score", "%"]);
    for axis in Axis::ALL {
        let (first, second) = axis.letters();
        table.add_row(vec![
            Cell::new(format!("{first}/{second}")),
            Cell::new(result.tally.get(first)),
            Cell::new(format!("{}%", result.percentage().get(first))),
            Cell::new(result.tally.get(second)),
            Cell::new(format!("{}%", result.percentage().get(second))),
        ]);
    }
    println!("\n{table}");

    for (label, items) in [
        ("Characteristics", &profile.characteristics),
        ("Strengths", &profile.strengths),
        ("Weaknesses", &profile.weaknesses),
        ("Careers", &profile.career_suggestions),
    ] {
        if !items.is_empty() {
            println!("{label}: {}", items.join(", "));
        }
    }
}
