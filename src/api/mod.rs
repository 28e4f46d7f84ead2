// リモートチャットプロバイダ境界
pub mod gemini;

pub use gemini::{GeminiClient, GeminiError};
