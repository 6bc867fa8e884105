pub mod evaluation;
pub mod sessions;
pub mod settings;
