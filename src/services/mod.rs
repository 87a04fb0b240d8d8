pub mod draw_service;
pub mod identity_service;
pub mod query_service;
pub mod question_store;

pub use draw_service::{draw_one, draw_one_with};
pub use identity_service::{generate_author_label, generate_author_label_with};
pub use query_service::{filtered_view, sorted_view, sorted_view_by_name, sorted_view_with, visible_view};
pub use question_store::QuestionStore;
