//! The `typequiz init` command.

use std::path::Path;

use anyhow::Result;

pub fn execute() -> Result<()> {
    if Path::new("typequiz.toml").exists() {
        println!("typequiz.toml already exists, skipping.");
    } else {
        std::fs::write("typequiz.toml", SAMPLE_CONFIG)?;
        println!("Created typequiz.toml");
    }

    std::fs::create_dir_all("data/tests")?;
    let sample_path = Path::new("data/tests/sample_mbti_test.json");
    if sample_path.exists() {
        println!("data/tests/sample_mbti_test.json already exists, skipping.");
    } else {
        std::fs::write(sample_path, SAMPLE_TEST)?;
        println!("Created data/tests/sample_mbti_test.json");
    }

    println!("\nNext steps:");
    println!("  1. Edit typequiz.toml to pick topics and directories");
    println!("  2. Run: typequiz generate");
    println!("  3. Run: typequiz normalize");
    println!("  4. Run: typequiz score --test-id <ID> --answers answers.json");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# typequiz configuration

raw_dir = "data/tests"
output_dir = "data/canonical"
results_dir = "data/results"

topics = ["여행", "음악", "영화", "독서", "운동"]

# Fix the seed for reproducible generator output.
# seed = 42
"#;

// Hand-authored, using the legacy `score` and `type` field names.
const SAMPLE_TEST: &str = r#"{
  "id": "sample_mbti_test",
  "title": "주말 MBTI 테스트",
  "description": "주말을 보내는 방식으로 알아보는 성격 유형",
  "tags": ["여행", "MBTI"],
  "questions": [
    {
      "text": "토요일 아침, 가장 먼저 하고 싶은 일은?",
      "options": [
        { "text": "친구들과 브런치 약속을 잡는다", "score": { "E": 2, "J": 1 } },
        { "text": "집에서 조용히 책을 읽는다", "score": { "I": 2, "N": 1 } }
      ]
    },
    {
      "text": "여행 계획을 세울 때 나는?",
      "options": [
        { "text": "일정을 시간 단위로 짠다", "score": { "J": 2, "S": 1 } },
        { "text": "도착해서 그때그때 정한다", "score": { "P": 2, "N": 1 } }
      ]
    },
    {
      "text": "친구가 고민을 털어놓으면?",
      "options": [
        { "text": "해결책을 함께 찾는다", "score": { "T": 2 } },
        { "text": "먼저 마음을 공감해 준다", "score": { "F": 2 } }
      ]
    }
  ],
  "resultTypes": [
    {
      "type": "ENFP",
      "title": "자유로운 모험가",
      "description": "새로운 경험에서 에너지를 얻는 유형",
      "characteristics": ["호기심", "열정"],
      "strengths": ["적응력"],
      "weaknesses": ["계획 부족"]
    },
    {
      "type": "ISTJ",
      "title": "꼼꼼한 계획가",
      "description": "차분하게 준비된 주말을 좋아하는 유형",
      "characteristics": ["신중함", "책임감"],
      "strengths": ["꾸준함"],
      "weaknesses": ["융통성 부족"]
    }
  ]
}
"#;
