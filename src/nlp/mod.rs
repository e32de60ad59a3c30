/*! Natural-language toolkit interface.

Tokenization, part-of-speech tagging, lemmatization and stop-word lookup
are provided by a [Toolkit]. The processing stages only talk to the trait,
so backends can be swapped without touching them.

[English] is the bundled rule-based backend.
!*/
mod english;
mod stopwords;

pub use english::English;
pub use stopwords::STOPWORDS;

use crate::error::Error;

/// Coarse part-of-speech classes understood by lemmatizers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pos {
    Noun,
    Verb,
    Adjective,
    Adverb,
}

impl Pos {
    /// Map a Penn Treebank tag onto a lemmatizer class.
    ///
    /// Tags that are not adjective (`J*`), verb (`V*`) or adverb (`R*`) tags are nouns.
    pub fn from_treebank(tag: &str) -> Self {
        match tag.chars().next() {
            Some('J') => Pos::Adjective,
            Some('V') => Pos::Verb,
            Some('R') => Pos::Adverb,
            _ => Pos::Noun,
        }
    }
}

pub trait Toolkit: Send + Sync {
    /// Split text into word tokens.
    fn tokenize(&self, text: &str) -> Result<Vec<String>, Error>;

    /// Attach a Penn Treebank tag to each token. Output is aligned with input.
    fn tag(&self, tokens: &[String]) -> Result<Vec<(String, String)>, Error>;

    /// Dictionary form of `token` for the given part of speech.
    fn lemmatize(&self, token: &str, pos: Pos) -> Result<String, Error>;

    fn is_stopword(&self, token: &str) -> bool;
}

/// Tag, filter and lemmatize a token sequence.
///
/// Tokens that are stop-words or that contain non-alphabetic characters are discarded.
/// Stop-word lookup and lemmatization work on the lowercased token.
pub fn lemmatize_tokens<T: Toolkit + ?Sized>(
    toolkit: &T,
    tokens: &[String],
) -> Result<Vec<String>, Error> {
    let tagged = toolkit.tag(tokens)?;
    let mut lemmas = Vec::with_capacity(tagged.len());

    for (token, tag) in tagged {
        if token.is_empty() || !token.chars().all(char::is_alphabetic) {
            continue;
        }
        let token = token.to_lowercase();
        if toolkit.is_stopword(&token) {
            continue;
        }
        lemmas.push(toolkit.lemmatize(&token, Pos::from_treebank(&tag))?);
    }

    Ok(lemmas)
}
