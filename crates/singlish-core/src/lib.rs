//! Singlish (romanized Sinhala) to Sinhala script conversion.
//!
//! [`convert`] runs a buffer through the default [`Engine`]: tokenize,
//! classify each word as Singlish or literal, transliterate the Singlish
//! words by longest-match phoneme rules, and reassemble with separators
//! untouched.

mod assemble;
pub mod classifier;
mod engine;
pub mod explain;
mod literal;
pub mod rules;
pub mod settings;
pub mod tokenizer;
pub mod transliterate;
pub mod unicode;

#[cfg(test)]
mod tests;

use std::sync::OnceLock;

pub use classifier::{Classifier, Disposition, HeuristicClassifier, PreserveReason, WordContext};
pub use engine::{Engine, EngineBuilder};
pub use explain::{Explanation, TokenExplanation};
pub use rules::{RuleConfigError, RuleTable};

/// Convert with the process-wide default engine.
///
/// The engine is built on first use from the shared rule table and global
/// settings; call `rules::RuleTable::init_custom` / `settings::init_custom`
/// before that to override them.
pub fn convert(buffer: &str) -> String {
    default_engine().convert(buffer)
}

pub fn default_engine() -> &'static Engine {
    static ENGINE: OnceLock<Engine> = OnceLock::new();
    ENGINE.get_or_init(Engine::default)
}

impl Default for Engine {
    fn default() -> Self {
        Engine::builder().build()
    }
}
