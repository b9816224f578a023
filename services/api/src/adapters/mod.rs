pub mod completion;
pub mod db;
pub mod timings;

pub use completion::OpenAiDuaAdapter;
pub use db::SqliteStorage;
pub use timings::AladhanClient;
