use serde::{Deserialize, Serialize};

/// 문해력 난이도
///
/// 학생의 생활연령과는 무관하게 어휘와 문장 복잡도만 조절한다.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

/// 난이도별 글쓰기 정책
#[derive(Debug, PartialEq, Eq)]
pub struct DifficultyProfile {
    /// 대상 독자의 문해력 수준
    pub literacy_label: &'static str,
    /// 문체 지침
    pub style_guideline: &'static str,
    /// 목표 분량
    pub length_target: &'static str,
    /// 분석 답안의 문장 수준
    pub answer_level: &'static str,
    /// 읽기 안내 문구
    pub read_time_label: &'static str,
}

static PROFILES: [DifficultyProfile; 3] = [
    DifficultyProfile {
        literacy_label: "글을 거의 읽지 못하거나 유치원생 수준의 문해력을 가진 학생",
        style_guideline: "가장 기초적인 단어만 사용. 복문 금지(주어+서술어 형태). 추상적인 표현 배제.",
        length_target: "300~400자 내외 (부담 없이 읽을 수 있는 분량)",
        answer_level: "유치원생도 이해할 수 있는 아주 기초적인 단어와 매우 짧은 문장",
        read_time_label: "쉬움",
    },
    DifficultyProfile {
        literacy_label: "초등학교 저학년(1~3학년) 수준의 문해력을 가진 학생",
        style_guideline: "일상적인 쉬운 어휘 사용. 문장은 길지 않게 끊어서 작성.",
        length_target: "600자 내외 (적당한 분량)",
        answer_level: "초등학교 저학년 수준의 쉬운 문장",
        read_time_label: "보통",
    },
    DifficultyProfile {
        literacy_label: "초등학교 고학년(4~6학년) 수준의 문해력을 가진 학생",
        style_guideline: "육하원칙이 잘 드러나는 표준적인 문장 구조. 인과관계가 명확한 서술.",
        length_target: "800~1000자 내외 (내용이 풍부하고 긴 분량)",
        answer_level: "초등학교 고학년 수준의 표준적인 문장",
        read_time_label: "어려움",
    },
];

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// 난이도별 정책 조회
    pub fn profile(self) -> &'static DifficultyProfile {
        match self {
            Difficulty::Easy => &PROFILES[0],
            Difficulty::Medium => &PROFILES[1],
            Difficulty::Hard => &PROFILES[2],
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl std::str::FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" | "쉬움" => Ok(Difficulty::Easy),
            "medium" | "보통" => Ok(Difficulty::Medium),
            "hard" | "어려움" => Ok(Difficulty::Hard),
            other => Err(format!("알 수 없는 난이도: {}", other)),
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.profile().read_time_label)
    }
}
