//! Built-in curated question decks, keyed by lower-cased topic.

use crate::models::{QuestionRecord, Topic};

struct CuratedQuestion {
    question: &'static str,
    answers: [&'static str; 4],
}

const fn q(question: &'static str, answers: [&'static str; 4]) -> CuratedQuestion {
    CuratedQuestion { question, answers }
}

const SCIENCE: [CuratedQuestion; 5] = [
    q("What is the chemical symbol for gold?", ["Au", "Ag", "Go", "Gd"]),
    q("How many bones are in the adult human body?", ["206", "208", "204", "210"]),
    q("What planet is known as the Red Planet?", ["Mars", "Venus", "Jupiter", "Saturn"]),
    q(
        "What gas makes up about 78% of Earth's atmosphere?",
        ["Nitrogen", "Oxygen", "Carbon Dioxide", "Argon"],
    ),
    q(
        "What is the speed of light in a vacuum?",
        ["299,792,458 m/s", "300,000,000 m/s", "299,000,000 m/s", "298,792,458 m/s"],
    ),
];

const HISTORY: [CuratedQuestion; 5] = [
    q("In which year did World War II end?", ["1945", "1944", "1946", "1943"]),
    q(
        "Who was the first person to walk on the moon?",
        ["Neil Armstrong", "Buzz Aldrin", "John Glenn", "Alan Shepard"],
    ),
    q(
        "Which ancient wonder of the world was located in Alexandria?",
        ["Lighthouse of Alexandria", "Hanging Gardens", "Colossus of Rhodes", "Temple of Artemis"],
    ),
    q("What year did the Berlin Wall fall?", ["1989", "1987", "1991", "1985"]),
    q(
        "Who was the first President of the United States?",
        ["George Washington", "Thomas Jefferson", "John Adams", "Benjamin Franklin"],
    ),
];

const MOVIES: [CuratedQuestion; 5] = [
    q(
        "Who directed the movie 'Jaws'?",
        ["Steven Spielberg", "George Lucas", "Martin Scorsese", "Francis Ford Coppola"],
    ),
    q(
        "Which movie won the Academy Award for Best Picture in 1994?",
        ["Forrest Gump", "Pulp Fiction", "The Lion King", "The Shawshank Redemption"],
    ),
    q(
        "What is the highest-grossing film of all time?",
        ["Avatar", "Avengers: Endgame", "Titanic", "Star Wars: The Force Awakens"],
    ),
    q(
        "Who played the character of Jack Sparrow?",
        ["Johnny Depp", "Orlando Bloom", "Geoffrey Rush", "Keira Knightley"],
    ),
    q("In which year was the first Star Wars movie released?", ["1977", "1975", "1979", "1980"]),
];

/// Topics with a curated deck.
pub const CURATED_TOPICS: [&str; 3] = ["science", "history", "movies"];

/// Look up the curated deck for a topic. Matching is exact on the
/// lower-cased topic; there is no fuzzy matching.
pub fn curated_questions(topic: &Topic) -> Option<Vec<QuestionRecord>> {
    let deck: &[CuratedQuestion] = match topic.lookup_key().as_str() {
        "science" => &SCIENCE,
        "history" => &HISTORY,
        "movies" => &MOVIES,
        _ => return None,
    };

    Some(
        deck.iter()
            .zip(1..)
            .map(|(entry, id)| QuestionRecord::with_first_correct(id, entry.question, entry.answers))
            .collect(),
    )
}
