use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use super::{Article, Difficulty, W1hAnswers};

/// 저장된 활동지
///
/// 저장 시점의 글, 화면에 보이던 본문, 답안을 그대로 담는다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Worksheet {
    pub saved_at: DateTime<Local>,
    pub difficulty: Difficulty,
    /// 쉬운 글 보기 상태였는지 여부
    pub simplified: bool,
    pub displayed_content: String,
    pub article: Article,
    pub answers: W1hAnswers,
}

impl Worksheet {
    /// 파일 이름 (`{글 id}_{저장 시각(밀리초)}.toml`)
    pub fn file_name(&self) -> String {
        format!("{}.toml", self.file_stem())
    }

    /// 같은 이름이 이미 있을 때 쓰는 `n` 번째 대체 이름
    pub fn numbered_file_name(&self, n: u32) -> String {
        format!("{}_{}.toml", self.file_stem(), n)
    }

    fn file_stem(&self) -> String {
        let safe_id: String = self
            .article
            .id
            .chars()
            .map(|c| if c.is_alphanumeric() || c == '_' || c == '-' { c } else { '_' })
            .collect();
        format!("{}_{}", safe_id, self.saved_at.format("%Y%m%d%H%M%S%3f"))
    }

    /// 인쇄용 평문
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("{}\n", "=".repeat(60)));
        out.push_str(&format!("육하원칙 활동지 - {}\n", self.article.title));
        out.push_str(&format!(
            "분류: {} | 출처: {} | 난이도: {}\n",
            self.article.category, self.article.source, self.difficulty
        ));
        out.push_str(&format!("저장 시각: {}\n", self.saved_at.format("%Y-%m-%d %H:%M:%S")));
        out.push_str(&format!("{}\n\n", "=".repeat(60)));

        if self.simplified {
            out.push_str("[쉬운 글]\n");
        }
        out.push_str(self.displayed_content.trim_end());
        out.push_str(&format!("\n\n{}\n", "─".repeat(60)));

        for (key, value) in self.answers.iter() {
            let value = if value.is_empty() { "____________" } else { value };
            out.push_str(&format!("{}: {}\n", key.label(), value));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::W1hKey;

    fn sample() -> Worksheet {
        let mut answers = W1hAnswers::default();
        answers.set(W1hKey::Who, "철수");
        Worksheet {
            saved_at: Local::now(),
            difficulty: Difficulty::Easy,
            simplified: true,
            displayed_content: "쉬운 본문".to_string(),
            article: Article {
                id: "wiki/1 2".to_string(),
                category: "지식 백과".to_string(),
                title: "제목".to_string(),
                content: "원문".to_string(),
                source: "위키백과".to_string(),
                read_time: "읽기".to_string(),
                keywords: vec!["키워드".to_string()],
            },
            answers,
        }
    }

    #[test]
    fn test_render_text_contains_answers() {
        let text = sample().render_text();
        assert!(text.contains("제목"));
        assert!(text.contains("[쉬운 글]"));
        assert!(text.contains("누가: 철수"));
        assert!(text.contains("왜:"));
    }

    #[test]
    fn test_file_name_is_sanitized() {
        let name = sample().file_name();
        assert!(name.starts_with("wiki_1_2_"));
        assert!(name.ends_with(".toml"));
        assert_ne!(name, sample().numbered_file_name(1));
    }

    #[test]
    fn test_toml_round_trip_keeps_answers() {
        let sheet = sample();
        let text = toml::to_string(&sheet).unwrap();
        let back: Worksheet = toml::from_str(&text).unwrap();
        assert_eq!(back.answers, sheet.answers);
        assert_eq!(back.article, sheet.article);
    }
}
