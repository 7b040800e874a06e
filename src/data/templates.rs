//! Topic-parameterised template questions, the last resort of the
//! question source.
//!
//! Every template lists its intended answer first, so generated records always
//! have `correct_index == 0`. This is a known weakness of the template decks.

use rand::seq::SliceRandom;

use crate::models::{QuestionRecord, Topic};

const TOPIC_PLACEHOLDER: &str = "{topic}";

struct Template {
    question: &'static str,
    answers: [&'static str; 4],
}

const fn t(question: &'static str, answers: [&'static str; 4]) -> Template {
    Template { question, answers }
}

const FIXED: [Template; 5] = [
    t(
        "What is a key characteristic of {topic}?",
        ["Complexity", "Simplicity", "Rarity", "Abundance"],
    ),
    t(
        "When did {topic} first become popular?",
        ["20th century", "19th century", "18th century", "21st century"],
    ),
    t(
        "Which field is most associated with {topic}?",
        ["General knowledge", "Specialized study", "Entertainment", "Sports"],
    ),
    t(
        "What makes {topic} interesting to study?",
        ["Its depth", "Its simplicity", "Its age", "Its novelty"],
    ),
    t(
        "How would you describe {topic} to a beginner?",
        ["Fascinating subject", "Boring topic", "Too complex", "Very simple"],
    ),
];

const POOL: [Template; 10] = [
    t(
        "What is considered the most important aspect of {topic}?",
        ["Historical significance", "Cultural impact", "Scientific value", "Economic importance"],
    ),
    t(
        "Which of the following is most closely associated with {topic}?",
        ["Innovation", "Tradition", "Complexity", "Simplicity"],
    ),
    t(
        "When studying {topic}, what should beginners focus on first?",
        ["Basic principles", "Advanced concepts", "Historical context", "Practical applications"],
    ),
    t(
        "What makes {topic} unique compared to related subjects?",
        ["Distinctive characteristics", "Similar features", "Common elements", "Shared properties"],
    ),
    t(
        "How has {topic} evolved over time?",
        ["Continuous development", "Remained unchanged", "Declined in importance", "Became obsolete"],
    ),
    t(
        "What is the primary benefit of studying {topic}?",
        ["Enhanced understanding", "Entertainment value", "Social status", "Financial gain"],
    ),
    t(
        "Which skill is most important when learning about {topic}?",
        ["Critical thinking", "Memorization", "Physical ability", "Artistic talent"],
    ),
    t(
        "What role does {topic} play in modern society?",
        ["Significant influence", "Minor impact", "No relevance", "Negative effect"],
    ),
    t(
        "How would experts describe the current state of {topic}?",
        ["Rapidly evolving", "Completely static", "In decline", "Becoming irrelevant"],
    ),
    t(
        "What is the best approach to mastering {topic}?",
        ["Consistent practice", "Occasional study", "Passive observation", "Avoiding difficulty"],
    ),
];

/// Which template deck to draw from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TemplateDeck {
    /// The five fixed templates, always in the same order.
    #[default]
    Fixed,
    /// A random draw of up to `count` templates from the larger pool.
    Sampled,
}

/// Generic question synthesis. Never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct GenericTemplates {
    deck: TemplateDeck,
}

impl GenericTemplates {
    pub fn new(deck: TemplateDeck) -> Self {
        Self { deck }
    }

    pub fn generate(&self, topic: &Topic, count: usize) -> Vec<QuestionRecord> {
        let chosen: Vec<&Template> = match self.deck {
            TemplateDeck::Fixed => FIXED.iter().collect(),
            TemplateDeck::Sampled => {
                let take = count.clamp(1, POOL.len());
                POOL.choose_multiple(&mut rand::thread_rng(), take).collect()
            }
        };

        chosen
            .into_iter()
            .zip(1..)
            .map(|(template, id)| {
                QuestionRecord::with_first_correct(
                    id,
                    template.question.replace(TOPIC_PLACEHOLDER, topic.as_str()),
                    template.answers,
                )
            })
            .collect()
    }
}
