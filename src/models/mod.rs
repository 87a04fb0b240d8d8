pub mod question;
pub mod status;
pub mod view;

pub use question::{Question, QuestionId};
pub use status::QuestionStatus;
pub use view::{QuestionFilter, SortMode};
