mod input;
mod round;
mod timer;

pub use input::{InputRouter, KEY_BINDINGS, KeyBinding, key_name};
pub use round::{
    AnswerMark, LoadRequest, Phase, QUESTION_TIME, REVEAL_DELAY, ResolvedQuestion, RoundController,
    RoundError, RoundState, TRY_AGAIN_MESSAGE,
};
pub use timer::{Scheduled, TaskKind, TimerEvent, TimerSlot};
