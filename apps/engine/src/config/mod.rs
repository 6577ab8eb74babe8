pub mod rules;

pub use rules::RulesConfig;
