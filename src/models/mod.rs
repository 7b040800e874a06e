mod player;
mod question;
mod topic;

pub use player::{Outcome, Player, Scores, Selection, Selections};
pub use question::{ANSWER_COUNT, Provenance, QuestionRecord, QuestionSet};
pub use topic::{EMPTY_TOPIC_MESSAGE, Topic, TopicError};
