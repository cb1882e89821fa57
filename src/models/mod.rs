pub mod answers;
pub mod article;
pub mod difficulty;
pub mod worksheet;

pub use answers::{AnalysisResult, W1hAnswers, W1hKey, W1hQuotes, UNKNOWN_ANSWER};
pub use article::Article;
pub use difficulty::{Difficulty, DifficultyProfile};
pub use worksheet::Worksheet;
