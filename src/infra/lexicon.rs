// ============================================================
// Layer 6 - Lexical Resources
// ============================================================
// The English stop-word set and the noun lemmatizer used by
// the cleaner.
//
// Both are loaded once by the driver before cleaning starts
// and shared read-only for the rest of the run. The stop-word
// list is compiled into the binary. The lemmatizer reads a
// WordNet 3.0 dictionary directory (the `dict/` folder of a
// WordNet release, or NLTK's unpacked `corpora/wordnet/`);
// without it the run cannot start.
//
// Lemmatizer file formats:
//   index.noun  - one lemma per line as the first field,
//                 header lines start with two spaces
//   noun.exc    - "inflected base [base...]" per line
//
// Lemma selection follows WordNet's morphy for nouns:
//   1. exception entry → candidates = token + listed bases
//      otherwise       → candidates = token + suffix rewrites
//   2. keep candidates that are lexicon nouns
//   3. shortest survivor wins, earliest on a tie
//   4. no survivor → token unchanged

use anyhow::{Context, Result};
use std::{
    collections::{HashMap, HashSet},
    fs,
    path::Path,
};

use crate::domain::error::PipelineError;

const ENGLISH_STOPWORDS: &str = include_str!("../../resources/stopwords_en.txt");

/// Noun suffix rewrites, tried in this order
const NOUN_SUBSTITUTIONS: [(&str, &str); 9] = [
    ("s",    ""),
    ("ses",  "s"),
    ("ves",  "f"),
    ("xes",  "x"),
    ("zes",  "z"),
    ("ches", "ch"),
    ("shes", "sh"),
    ("men",  "man"),
    ("ies",  "y"),
];

// ─── StopWords ────────────────────────────────────────────────────────────────
#[derive(Debug, Clone)]
pub struct StopWords {
    words: HashSet<String>,
}

impl StopWords {
    /// Parse one word per line; blank lines and `#` comments are skipped
    pub fn parse(source: &str) -> Result<Self, PipelineError> {
        let words: HashSet<String> = source
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty() && !l.starts_with('#'))
            .map(str::to_string)
            .collect();

        if words.is_empty() {
            return Err(PipelineError::EmptyResource("stop words".into()));
        }
        Ok(Self { words })
    }

    /// The standard English list shipped with the binary
    pub fn english() -> Result<Self, PipelineError> {
        Self::parse(ENGLISH_STOPWORDS)
    }

    pub fn contains(&self, token: &str) -> bool {
        self.words.contains(token)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }
}

// ─── Lemmatizer ───────────────────────────────────────────────────────────────
#[derive(Debug, Clone)]
pub struct Lemmatizer {
    /// Every known noun lemma
    nouns: HashSet<String>,

    /// Irregular inflection → its base forms
    exceptions: HashMap<String, Vec<String>>,
}

impl Lemmatizer {
    /// Build from the text of `index.noun` and `noun.exc`
    pub fn parse(index_noun: &str, noun_exc: &str) -> Result<Self, PipelineError> {
        let nouns: HashSet<String> = index_noun
            .lines()
            .filter(|l| !l.starts_with("  "))
            .filter_map(|l| l.split_whitespace().next())
            .map(str::to_string)
            .collect();

        if nouns.is_empty() {
            return Err(PipelineError::EmptyResource("noun lexicon".into()));
        }

        let mut exceptions: HashMap<String, Vec<String>> = HashMap::new();
        for line in noun_exc.lines() {
            let mut fields = line.split_whitespace();
            let Some(inflected) = fields.next() else { continue };
            let bases: Vec<String> = fields.map(str::to_string).collect();
            if !bases.is_empty() {
                exceptions
                    .entry(inflected.to_string())
                    .or_default()
                    .extend(bases);
            }
        }

        Ok(Self { nouns, exceptions })
    }

    /// Reduce a token to its noun base form.
    /// Unknown tokens come back unchanged.
    pub fn lemmatize<'a>(&'a self, token: &'a str) -> &'a str {
        let mut candidates: Vec<String> = vec![token.to_string()];

        match self.exceptions.get(token) {
            Some(bases) => candidates.extend(bases.iter().cloned()),
            None => {
                for (old, new) in NOUN_SUBSTITUTIONS {
                    if let Some(stem) = token.strip_suffix(old) {
                        candidates.push(format!("{stem}{new}"));
                    }
                }
            }
        }

        // min_by_key keeps the first of equally short candidates
        candidates
            .iter()
            .filter_map(|c| self.nouns.get(c))
            .min_by_key(|known| known.chars().count())
            .map_or(token, |known| known.as_str())
    }

    pub fn noun_count(&self) -> usize {
        self.nouns.len()
    }
}

// ─── NlpResources ─────────────────────────────────────────────────────────────
/// Everything the cleaner needs besides the table itself
#[derive(Debug, Clone)]
pub struct NlpResources {
    pub stop_words: StopWords,
    pub lemmatizer: Lemmatizer,
}

impl NlpResources {
    /// Load the English stop words and the WordNet noun lexicon
    /// found in `wordnet_dir`. A missing or empty dictionary is
    /// a fatal error.
    pub fn load(wordnet_dir: &Path) -> Result<Self> {
        let stop_words = StopWords::english()?;

        let index_path = wordnet_dir.join("index.noun");
        let exc_path   = wordnet_dir.join("noun.exc");
        let index = fs::read_to_string(&index_path).with_context(|| {
            format!(
                "Cannot read WordNet noun index '{}'. Place the WordNet 3.0 \
                 dictionary files (index.noun, noun.exc) in '{}'",
                index_path.display(),
                wordnet_dir.display()
            )
        })?;
        let exc = fs::read_to_string(&exc_path).with_context(|| {
            format!("Cannot read WordNet noun exceptions '{}'", exc_path.display())
        })?;
        let lemmatizer = Lemmatizer::parse(&index, &exc)?;

        tracing::info!(
            "Loaded {} stop words and {} noun lemmas from '{}'",
            stop_words.len(),
            lemmatizer.noun_count(),
            wordnet_dir.display()
        );

        Ok(Self { stop_words, lemmatizer })
    }
}

/// A small dictionary in WordNet file layout for tests
#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use std::sync::OnceLock;

    const NOUNS: &[&str] = &[
        "best", "box", "cat", "child", "container", "cup", "dog", "flavor",
        "horse", "leaf", "lid", "love", "neighbor", "one", "potato",
        "purchase", "review", "seal", "shipment", "snack", "taste", "treat",
        "two", "wrapper",
    ];

    const NOUN_EXC: &str = "children child\nleaves leaf\npotatoes potato\n";

    pub fn index_noun() -> String {
        let mut out = String::from(
            "  1 This software and database is being provided to you, the LICENSEE, by\n\
             \x20 2 Princeton University under the following license.\n",
        );
        for noun in NOUNS {
            out.push_str(&format!("{noun} n 1 2 @ ~ 1 0 00000000\n"));
        }
        out
    }

    /// Write `index.noun` and `noun.exc` into `dir`
    pub fn write_wordnet(dir: &Path) {
        fs::create_dir_all(dir).unwrap();
        fs::write(dir.join("index.noun"), index_noun()).unwrap();
        fs::write(dir.join("noun.exc"), NOUN_EXC).unwrap();
    }

    pub fn resources() -> &'static NlpResources {
        static RESOURCES: OnceLock<NlpResources> = OnceLock::new();
        RESOURCES.get_or_init(|| NlpResources {
            stop_words: StopWords::english().unwrap(),
            lemmatizer: Lemmatizer::parse(&index_noun(), NOUN_EXC).unwrap(),
        })
    }
}
