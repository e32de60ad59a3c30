//! Rule-based English backend.
//!
//! - tokens follow Unicode word boundaries (UAX #29), with Treebank-style
//!   clitics split off (`don't` -> `do` `n't`, `Smith's` -> `Smith` `'s`).
//! - tags are Penn Treebank tags from a closed-class lexicon, suffix rules and
//!   the previous tag.
//! - lemmas come from irregular-form tables, then suffix detachment rules.
use std::collections::HashMap;

use lazy_static::lazy_static;
use unicode_segmentation::UnicodeSegmentation;

use super::{stopwords::STOPWORDS, Pos, Toolkit};
use crate::error::Error;

/// Clitics split off the end of a word, longest first.
const CLITICS: [&str; 14] = [
    "n't", "n\u{2019}t", "'re", "\u{2019}re", "'ve", "\u{2019}ve", "'ll", "\u{2019}ll", "'s",
    "\u{2019}s", "'d", "\u{2019}d", "'m", "\u{2019}m",
];

lazy_static! {
    static ref LEXICON: HashMap<&'static str, &'static str> = {
        let mut m = HashMap::new();
        for w in ["the", "a", "an", "this", "that", "these", "those", "every", "each", "some", "any", "no"] {
            m.insert(w, "DT");
        }
        for w in [
            "of", "in", "on", "at", "by", "for", "with", "from", "into", "about", "over", "under",
            "after", "before", "through", "between", "against", "during", "without", "upon", "among",
        ] {
            m.insert(w, "IN");
        }
        for w in ["and", "or", "but", "nor", "yet"] {
            m.insert(w, "CC");
        }
        for w in ["i", "you", "he", "she", "it", "we", "they", "me", "him", "us", "them"] {
            m.insert(w, "PRP");
        }
        for w in ["my", "your", "his", "her", "its", "our", "their"] {
            m.insert(w, "PRP$");
        }
        for w in ["can", "could", "will", "would", "shall", "should", "may", "might", "must", "'ll", "'d"] {
            m.insert(w, "MD");
        }
        for w in ["not", "n't", "never", "very", "so", "too", "also", "then", "there", "here", "now"] {
            m.insert(w, "RB");
        }
        for w in ["is", "has", "does"] {
            m.insert(w, "VBZ");
        }
        for w in ["are", "am", "have", "do", "'re", "'m", "'ve"] {
            m.insert(w, "VBP");
        }
        for w in [
            "was", "were", "had", "did", "went", "came", "said", "made", "took", "saw", "knew",
            "thought", "got", "gave", "found", "told", "became", "left", "felt", "brought", "began",
            "kept", "held", "stood", "heard", "meant", "ran", "wrote", "spoke",
        ] {
            m.insert(w, "VBD");
        }
        for w in ["good", "bad", "great", "little", "old", "new", "young", "long"] {
            m.insert(w, "JJ");
        }
        for w in ["better", "worse"] {
            m.insert(w, "JJR");
        }
        for w in ["best", "worst"] {
            m.insert(w, "JJS");
        }
        m.insert("be", "VB");
        m.insert("been", "VBN");
        m.insert("being", "VBG");
        m.insert("to", "TO");
        m.insert("'s", "POS");
        m
    };

    static ref IRREGULAR_NOUNS: HashMap<&'static str, &'static str> = [
        ("men", "man"), ("women", "woman"), ("children", "child"), ("feet", "foot"),
        ("teeth", "tooth"), ("mice", "mouse"), ("geese", "goose"), ("oxen", "ox"),
        ("lives", "life"), ("wives", "wife"), ("knives", "knife"), ("leaves", "leaf"),
        ("wolves", "wolf"), ("halves", "half"), ("selves", "self"),
    ]
    .into_iter()
    .collect();

    static ref IRREGULAR_VERBS: HashMap<&'static str, &'static str> = [
        ("is", "be"), ("are", "be"), ("am", "be"), ("was", "be"), ("were", "be"),
        ("been", "be"), ("being", "be"), ("has", "have"), ("had", "have"), ("does", "do"),
        ("did", "do"), ("done", "do"), ("went", "go"), ("gone", "go"), ("goes", "go"),
        ("said", "say"), ("made", "make"), ("took", "take"), ("taken", "take"),
        ("saw", "see"), ("seen", "see"), ("came", "come"), ("knew", "know"),
        ("known", "know"), ("thought", "think"), ("got", "get"), ("gotten", "get"),
        ("gave", "give"), ("given", "give"), ("found", "find"), ("told", "tell"),
        ("became", "become"), ("left", "leave"), ("felt", "feel"), ("brought", "bring"),
        ("began", "begin"), ("begun", "begin"), ("kept", "keep"), ("held", "hold"),
        ("stood", "stand"), ("heard", "hear"), ("meant", "mean"), ("ran", "run"),
        ("wrote", "write"), ("written", "write"), ("spoke", "speak"), ("spoken", "speak"),
    ]
    .into_iter()
    .collect();

    static ref IRREGULAR_ADJECTIVES: HashMap<&'static str, &'static str> = [
        ("better", "good"), ("best", "good"), ("worse", "bad"), ("worst", "bad"),
    ]
    .into_iter()
    .collect();
}

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')
}

fn is_consonant(c: char) -> bool {
    c.is_ascii_alphabetic() && !is_vowel(c)
}

/// Restore a stem after `-ing`/`-ed`/`-est` removal:
/// undouble a final consonant (`runn`) or restore a silent `e` (`mak`, `danc`).
fn restore_stem(mut stem: String) -> String {
    let chars: Vec<char> = stem.chars().collect();
    let n = chars.len();
    if n < 2 {
        return stem;
    }
    let (prev, last) = (chars[n - 2], chars[n - 1]);

    if prev == last && is_consonant(last) && !matches!(last, 'l' | 's' | 'z') {
        stem.pop();
        return stem;
    }

    let vowel_groups = chars
        .iter()
        .zip(std::iter::once(&' ').chain(chars.iter()))
        .filter(|(c, before)| is_vowel(**c) && !is_vowel(**before))
        .count();
    let cvc = n >= 3
        && is_consonant(chars[n - 3])
        && is_vowel(prev)
        && is_consonant(last)
        && !matches!(last, 'w' | 'x' | 'y');
    let short = n == 2 && is_vowel(prev) && is_consonant(last);

    if (cvc && vowel_groups == 1) || short || last == 'v' || (last == 'c' && is_consonant(prev)) {
        stem.push('e');
    }
    stem
}

fn noun_lemma(token: &str) -> String {
    if let Some(lemma) = IRREGULAR_NOUNS.get(token) {
        return lemma.to_string();
    }
    if token.len() <= 3 || ["ss", "us", "is"].iter().any(|s| token.ends_with(s)) {
        return token.to_string();
    }
    if let Some(stem) = token.strip_suffix("ies") {
        return format!("{stem}y");
    }
    if ["ches", "shes", "sses", "xes", "zes"]
        .iter()
        .any(|s| token.ends_with(s))
    {
        return token[..token.len() - 2].to_string();
    }
    token.strip_suffix('s').unwrap_or(token).to_string()
}

fn verb_lemma(token: &str) -> String {
    if let Some(lemma) = IRREGULAR_VERBS.get(token) {
        return lemma.to_string();
    }
    if token.len() > 4 {
        if let Some(stem) = token.strip_suffix("ies").or_else(|| token.strip_suffix("ied")) {
            return format!("{stem}y");
        }
        if let Some(stem) = token.strip_suffix("ing") {
            return restore_stem(stem.to_string());
        }
    }
    if token.len() > 3 {
        if let Some(stem) = token.strip_suffix("ed") {
            return restore_stem(stem.to_string());
        }
        if ["ches", "shes", "sses", "xes", "zes", "oes"]
            .iter()
            .any(|s| token.ends_with(s))
        {
            return token[..token.len() - 2].to_string();
        }
        if !token.ends_with("ss") {
            if let Some(stem) = token.strip_suffix('s') {
                return stem.to_string();
            }
        }
    }
    token.to_string()
}

fn adjective_lemma(token: &str) -> String {
    if let Some(lemma) = IRREGULAR_ADJECTIVES.get(token) {
        return lemma.to_string();
    }
    if token.len() > 5 {
        if let Some(stem) = token.strip_suffix("iest") {
            return format!("{stem}y");
        }
        if let Some(stem) = token.strip_suffix("est") {
            return restore_stem(stem.to_string());
        }
    }
    token.to_string()
}

/// Bundled English backend.
#[derive(Debug, Default, Clone)]
pub struct English;

impl English {
    /// Split trailing clitics off a word segment.
    fn split_clitic(word: &str) -> Vec<&str> {
        for clitic in CLITICS {
            if word.len() <= clitic.len() {
                continue;
            }
            let split = word.len() - clitic.len();
            if let Some(tail) = word.get(split..) {
                if tail.eq_ignore_ascii_case(clitic) {
                    return vec![&word[..split], tail];
                }
            }
        }
        vec![word]
    }

    fn tag_one(token: &str, position: usize, prev: Option<&str>) -> String {
        let lower = token.to_lowercase();
        let lower = lower.replace('\u{2019}', "'");

        if let Some(tag) = LEXICON.get(lower.as_str()) {
            return tag.to_string();
        }
        if !token.chars().any(char::is_alphanumeric) {
            return match token {
                "." | "!" | "?" => ".",
                "," => ",",
                _ => ":",
            }
            .to_string();
        }
        if token.chars().any(|c| c.is_ascii_digit()) {
            return "CD".to_string();
        }

        let tag = if matches!(prev, Some("TO") | Some("MD")) {
            "VB"
        } else if lower.ends_with("ly") {
            "RB"
        } else if lower.ends_with("ing") {
            "VBG"
        } else if lower.ends_with("ed") {
            match prev {
                Some("VBZ") | Some("VBP") | Some("VBD") => "VBN",
                _ => "VBD",
            }
        } else if ["ous", "ful", "able", "ible", "ive", "less", "ical", "ish"]
            .iter()
            .any(|s| lower.ends_with(s))
        {
            "JJ"
        } else if position > 0 && token.chars().next().map_or(false, char::is_uppercase) {
            "NNP"
        } else if lower.len() > 3
            && lower.ends_with('s')
            && !["ss", "us", "is"].iter().any(|s| lower.ends_with(s))
        {
            if prev == Some("PRP") {
                "VBZ"
            } else {
                "NNS"
            }
        } else {
            "NN"
        };
        tag.to_string()
    }
}

impl Toolkit for English {
    fn tokenize(&self, text: &str) -> Result<Vec<String>, Error> {
        Ok(text
            .split_word_bounds()
            .filter(|segment| !segment.trim().is_empty())
            .flat_map(Self::split_clitic)
            .map(String::from)
            .collect())
    }

    fn tag(&self, tokens: &[String]) -> Result<Vec<(String, String)>, Error> {
        let mut tagged: Vec<(String, String)> = Vec::with_capacity(tokens.len());
        for (position, token) in tokens.iter().enumerate() {
            let prev = tagged.last().map(|(_, tag)| tag.as_str());
            let tag = Self::tag_one(token, position, prev);
            tagged.push((token.clone(), tag));
        }
        Ok(tagged)
    }

    fn lemmatize(&self, token: &str, pos: Pos) -> Result<String, Error> {
        Ok(match pos {
            Pos::Noun => noun_lemma(token),
            Pos::Verb => verb_lemma(token),
            Pos::Adjective => adjective_lemma(token),
            Pos::Adverb => token.to_string(),
        })
    }

    fn is_stopword(&self, token: &str) -> bool {
        STOPWORDS.contains(token)
    }
}
