//! The `typequiz validate` command.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use typequiz_core::model::TestDefinition;
use typequiz_core::validate::validate_test;

pub fn execute(input: PathBuf) -> Result<()> {
    let tests = if input.is_dir() {
        load_directory(&input)?
    } else {
        load_file(&input)?
    };

    let mut total_warnings = 0;

    for test in &tests {
        println!("Test: {} ({} questions)", test.title, test.questions.len());

        let warnings = validate_test(test);
        for w in &warnings {
            let prefix = w
                .question_id
                .map(|id| format!("  [q{id}]"))
                .unwrap_or_else(|| "  ".to_string());
            println!("{prefix} WARNING: {}", w.message);
        }
        total_warnings += warnings.len();
    }

    if total_warnings == 0 {
        println!("All tests valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}

/// A single document, or a `testsList.json`-style array of them.
fn load_file(path: &Path) -> Result<Vec<TestDefinition>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let value: serde_json::Value = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    let tests = if value.is_array() {
        serde_json::from_value(value)
    } else {
        serde_json::from_value::<TestDefinition>(value).map(|test| vec![test])
    };
    tests.with_context(|| format!("not a canonical test document: {}", path.display()))
}

fn load_directory(dir: &Path) -> Result<Vec<TestDefinition>> {
    let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "json"))
        .collect();
    paths.sort();

    let mut tests = Vec::new();
    for path in &paths {
        tests.extend(load_file(path)?);
    }
    Ok(tests)
}
