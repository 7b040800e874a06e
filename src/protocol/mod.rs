mod messages;

pub use messages::{
    DEFAULT_PORT, ErrorResponse, GENERATE_QUESTIONS_PATH, GENERATION_FAILED_MESSAGE,
    GenerateRequest, GenerateResponse,
};
