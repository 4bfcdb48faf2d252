pub mod db;
pub mod password;
pub mod prompt_llm;

pub use db::DbAdapter;
pub use password::Argon2PasswordHasher;
pub use prompt_llm::OpenAiPromptAdapter;
