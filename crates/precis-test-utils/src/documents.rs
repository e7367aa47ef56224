//! Sample documents with known summaries.

/// Three sentences; `cat` and `the` occur twice each.
pub const CAT_AND_DOG: &str = "The cat sat. The cat ran. A dog barked.";

/// `"Dr."` must not end the first sentence.
pub const TITLED: &str = "Dr. Smith arrived. He left.";

/// Four sentences; the summary keeps two.
pub const FOUR_SENTENCES: &str = "Rust is fast. Rust is safe and Rust is fun. \
    Cargo builds Rust code. Lunch was late.";

/// No ASCII letters anywhere.
pub const NO_LETTERS: &str = "123. 456! 789. 000? 42.";

/// One sentence repeated, plus one other.
pub const REPEATED: &str = "Again and again. Again and again. Again and again. Something else.";

/// A longer passage for property and round-trip style checks.
pub const ARTICLE: &str = "Mr. Holmes lived on Baker Street. \
    He shared rooms with Dr. Watson for many years. \
    Holmes solved cases that baffled the police. \
    Watson wrote about the cases that Holmes solved. \
    Mrs. Hudson kept the house on Baker Street. \
    The police often visited Baker Street for help. \
    Many cases began with a knock at the door.";

/// Every sample, for tests that should hold on any input.
pub fn all() -> Vec<&'static str> {
    vec![
        "",
        "OneSentenceOnly",
        CAT_AND_DOG,
        TITLED,
        FOUR_SENTENCES,
        NO_LETTERS,
        REPEATED,
        ARTICLE,
        "   \n\t  ",
        ". . . .",
        "Prof. Plum met St. Ives. Mr. Green waved.",
        "Unicode — café, naïve, Ærøskøbing. Ünïcödé again. Ok.",
    ]
}
