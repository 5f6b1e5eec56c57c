//! The `typequiz generate` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use typequiz_core::config::load_config_from;
use typequiz_core::generator::{topic_description, topic_file_name, TestGenerator};

pub fn execute(config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    anyhow::ensure!(!config.topics.is_empty(), "no topics configured");

    std::fs::create_dir_all(&config.raw_dir).with_context(|| {
        format!("failed to create raw directory: {}", config.raw_dir.display())
    })?;

    let mut generator = match config.seed {
        Some(seed) => TestGenerator::seeded(seed),
        None => TestGenerator::from_entropy(),
    };

    eprintln!("Generating {} test(s)...", config.topics.len());

    for topic in &config.topics {
        let test = generator.generate(topic, &topic_description(topic));
        let file_name = topic_file_name(topic);
        let path = config.raw_dir.join(&file_name);
        let json = serde_json::to_string_pretty(&test)
            .with_context(|| format!("failed to serialize {file_name}"))?;
        std::fs::write(&path, json)
            .with_context(|| format!("failed to write {}", path.display()))?;
        tracing::info!(id = %test.id, questions = test.questions.len(), "generated {file_name}");
        println!("Created {}", path.display());
    }

    println!("\nAll {} test(s) generated.", config.topics.len());
    Ok(())
}
