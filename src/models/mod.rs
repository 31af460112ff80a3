// Module exports for models

pub mod meeting;
pub mod settings;
