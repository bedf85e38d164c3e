pub mod memory;
pub mod seaorm;

pub use memory::InMemoryCredentialStore;
pub use seaorm::SeaOrmCredentialStore;
