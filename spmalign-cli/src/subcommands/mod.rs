mod check_config;
pub use check_config::CheckConfigApp;

mod tokenize;
pub use tokenize::TokenizeApp;
