pub mod storage;

pub use storage::{JsonFileStorage, MemoryStorage, QuestionStorage, StoredBoard};
