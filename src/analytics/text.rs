//! Keyword extraction and lexicon-based sentiment for text columns.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

lazy_static! {
    static ref WORD_REGEX: Regex = Regex::new(r"[a-z0-9]+(?:'[a-z]+)?").unwrap();
    static ref STOPWORDS: HashSet<&'static str> = STOPWORDS_EN.iter().copied().collect();
    static ref LEXICON: HashMap<&'static str, i32> = SENTIMENT_WORDS.iter().copied().collect();
}

const STOPWORDS_EN: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "am", "an", "and", "any", "are",
    "as", "at", "be", "because", "been", "before", "being", "below", "between", "both", "but",
    "by", "can", "could", "did", "do", "does", "doing", "down", "during", "each", "few", "for",
    "from", "further", "had", "has", "have", "having", "he", "her", "here", "hers", "herself",
    "him", "himself", "his", "how", "i", "if", "in", "into", "is", "it", "its", "itself", "just",
    "me", "more", "most", "my", "myself", "no", "nor", "not", "now", "of", "off", "on", "once",
    "only", "or", "other", "our", "ours", "ourselves", "out", "over", "own", "same", "she",
    "should", "so", "some", "such", "than", "that", "the", "their", "theirs", "them",
    "themselves", "then", "there", "these", "they", "this", "those", "through", "to", "too",
    "under", "until", "up", "very", "was", "we", "were", "what", "when", "where", "which",
    "while", "who", "whom", "why", "will", "with", "would", "you", "your", "yours", "yourself",
    "yourselves",
];

/// Word weights from -5 (very negative) to 5 (very positive)
const SENTIMENT_WORDS: &[(&str, i32)] = &[
    ("amazing", 4),
    ("awesome", 4),
    ("outstanding", 5),
    ("superb", 5),
    ("excellent", 3),
    ("fantastic", 4),
    ("great", 3),
    ("love", 3),
    ("loved", 3),
    ("happy", 3),
    ("delighted", 3),
    ("good", 3),
    ("nice", 3),
    ("best", 3),
    ("recommend", 2),
    ("like", 2),
    ("liked", 2),
    ("fast", 2),
    ("easy", 1),
    ("helpful", 2),
    ("satisfied", 2),
    ("win", 4),
    ("growth", 2),
    ("improved", 2),
    ("fine", 2),
    ("ok", 1),
    ("okay", 1),
    ("bad", -3),
    ("poor", -2),
    ("worse", -3),
    ("worst", -3),
    ("terrible", -3),
    ("awful", -3),
    ("horrible", -3),
    ("hate", -3),
    ("hated", -3),
    ("sad", -2),
    ("angry", -3),
    ("disappointed", -2),
    ("disappointing", -2),
    ("slow", -2),
    ("broken", -1),
    ("bug", -2),
    ("crash", -2),
    ("fail", -2),
    ("failed", -2),
    ("problem", -2),
    ("issue", -1),
    ("expensive", -2),
    ("loss", -3),
    ("useless", -2),
    ("annoying", -2),
    ("confusing", -2),
    ("disaster", -2),
];

/// Words that flip the polarity of the word right after them
fn is_negator(token: &str) -> bool {
    matches!(token, "not" | "no" | "never" | "neither" | "nor") || token.ends_with("n't")
}

/// Lowercase word tokens; apostrophes inside words are kept ("don't")
pub fn tokenize(text: &str) -> Vec<String> {
    let lower = text.to_lowercase().replace('\u{2019}', "'");
    WORD_REGEX
        .find_iter(&lower)
        .map(|m| m.as_str().to_string())
        .collect()
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeywordOptions {
    /// How many keywords to return
    pub top_n: usize,
    /// Shorter words are ignored
    pub min_length: usize,
}

impl Default for KeywordOptions {
    fn default() -> Self {
        Self {
            top_n: 10,
            min_length: 3,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Keyword {
    pub word: String,
    pub count: usize,
    /// Share of all counted words, `count / total`
    pub frequency: f64,
}

/// Most frequent words across a set of texts
///
/// Stop-words, purely numeric tokens and words shorter than
/// `options.min_length` are not counted. Ties are broken alphabetically so
/// the output is deterministic.
pub fn extract_keywords<S: AsRef<str>>(texts: &[S], options: &KeywordOptions) -> Vec<Keyword> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut total = 0usize;

    for text in texts {
        for token in tokenize(text.as_ref()) {
            let word = token.trim_end_matches("'s");
            if word.chars().count() < options.min_length
                || STOPWORDS.contains(word)
                || word.chars().all(|c| c.is_ascii_digit())
            {
                continue;
            }
            *counts.entry(word.to_string()).or_insert(0) += 1;
            total += 1;
        }
    }

    let mut keywords: Vec<Keyword> = counts
        .into_iter()
        .map(|(word, count)| Keyword {
            word,
            count,
            frequency: count as f64 / total as f64,
        })
        .collect();
    keywords.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.word.cmp(&b.word)));
    keywords.truncate(options.top_n);
    keywords
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Neutral,
    Negative,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Sentiment {
    /// Sum of word weights after negation
    pub score: i32,
    /// Score divided by the number of tokens
    pub comparative: f64,
    /// Words that counted positively, in order of appearance
    pub positive: Vec<String>,
    /// Words that counted negatively, in order of appearance
    pub negative: Vec<String>,
    pub label: SentimentLabel,
}

/// Lexicon-based sentiment score of a text
///
/// Each word found in the lexicon adds its weight. A negator ("not", "no",
/// "never", "...n't") directly before a word flips that word's sign, so
/// "not good" counts as negative.
pub fn analyze_sentiment(text: &str) -> Sentiment {
    let tokens = tokenize(text);
    let mut score = 0;
    let mut positive = Vec::new();
    let mut negative = Vec::new();

    for (i, token) in tokens.iter().enumerate() {
        let Some(&weight) = LEXICON.get(token.as_str()) else {
            continue;
        };
        let negated = i > 0 && is_negator(&tokens[i - 1]);
        let weight = if negated { -weight } else { weight };
        score += weight;
        if weight > 0 {
            positive.push(token.clone());
        } else if weight < 0 {
            negative.push(token.clone());
        }
    }

    let comparative = if tokens.is_empty() {
        0.0
    } else {
        score as f64 / tokens.len() as f64
    };
    let label = match score {
        s if s > 0 => SentimentLabel::Positive,
        s if s < 0 => SentimentLabel::Negative,
        _ => SentimentLabel::Neutral,
    };

    Sentiment {
        score,
        comparative,
        positive,
        negative,
        label,
    }
}
