pub mod json_store;

pub use json_store::{load_question_set, save_question_set};
