use serde::{Deserialize, Serialize};

/// Number of answer options every question carries.
pub const ANSWER_COUNT: usize = 4;

/// A single multiple-choice question admitted into a round.
///
/// The answer array length and the range of `correct_index` are enforced at
/// construction, so a record that exists is always playable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "WireQuestion")]
pub struct QuestionRecord {
    id: u32,
    #[serde(rename = "question")]
    text: String,
    answers: [String; ANSWER_COUNT],
    #[serde(rename = "correct")]
    correct_index: usize,
}

impl QuestionRecord {
    /// Build a record, rejecting a correct index outside `0..4`.
    pub fn new(
        id: u32,
        text: impl Into<String>,
        answers: [String; ANSWER_COUNT],
        correct_index: usize,
    ) -> Option<Self> {
        if correct_index >= ANSWER_COUNT {
            return None;
        }
        Some(Self {
            id,
            text: text.into(),
            answers,
            correct_index,
        })
    }

    /// Build a record whose first answer is the correct one.
    ///
    /// Curated and template questions are authored this way.
    pub fn with_first_correct(id: u32, text: impl Into<String>, answers: [&str; ANSWER_COUNT]) -> Self {
        Self {
            id,
            text: text.into(),
            answers: answers.map(str::to_string),
            correct_index: 0,
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn answers(&self) -> &[String; ANSWER_COUNT] {
        &self.answers
    }

    pub fn correct_index(&self) -> usize {
        self.correct_index
    }

    pub fn is_correct(&self, answer_index: usize) -> bool {
        answer_index == self.correct_index
    }
}

#[derive(Deserialize)]
struct WireQuestion {
    id: u32,
    question: String,
    answers: [String; ANSWER_COUNT],
    correct: usize,
}

impl TryFrom<WireQuestion> for QuestionRecord {
    type Error = String;

    fn try_from(wire: WireQuestion) -> Result<Self, Self::Error> {
        let correct = wire.correct;
        QuestionRecord::new(wire.id, wire.question, wire.answers, correct)
            .ok_or_else(|| format!("correct index {} is out of range", correct))
    }
}

/// Where a question set came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    /// Produced by a remote language model and validated.
    Generated,
    /// Taken from the built-in curated topic table.
    Curated,
    /// Synthesised from topic-parameterised templates.
    Generic,
}

impl Provenance {
    pub fn as_str(self) -> &'static str {
        match self {
            Provenance::Generated => "generated",
            Provenance::Curated => "curated",
            Provenance::Generic => "generic",
        }
    }

    /// Parse a wire name. Unknown names yield `None`.
    pub fn from_wire(name: &str) -> Option<Self> {
        match name {
            "generated" | "openai" => Some(Provenance::Generated),
            "curated" => Some(Provenance::Curated),
            "generic" | "fallback" => Some(Provenance::Generic),
            _ => None,
        }
    }
}

impl std::fmt::Display for Provenance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The full ordered question list for one round, with its provenance.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionSet {
    pub questions: Vec<QuestionRecord>,
    pub provenance: Provenance,
    /// Set when a remote attempt failed and a local strategy answered instead.
    pub warning: Option<String>,
}

impl QuestionSet {
    pub fn new(questions: Vec<QuestionRecord>, provenance: Provenance) -> Self {
        Self {
            questions,
            provenance,
            warning: None,
        }
    }

    pub fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.warning = Some(warning.into());
        self
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}
