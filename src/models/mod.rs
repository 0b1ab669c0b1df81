pub mod label_mapping;
pub mod loaders;
pub mod question;

pub use label_mapping::{LabelMapping, LabelPair, LABEL_DELIMITER};
pub use loaders::{load_question_set, save_question_set};
pub use question::{QuestionRecord, QuestionSet, MCQ_TYPE};
