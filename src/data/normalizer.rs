// ============================================================
// Layer 4 - Text Normalizer
// ============================================================
// Turns one review text into its token sequence.
//
// Each step is a separate total function so it can be tested
// on its own; `Normalizer` composes them in order:
//
//   1. lowercase
//   2. delete ASCII punctuation (no space is inserted, so
//      "great-value" becomes "greatvalue")
//   3. split on whitespace
//   4. drop stop words
//   5. lemmatize each token in place
//   6. join with single spaces

use crate::infra::lexicon::{Lemmatizer, NlpResources, StopWords};

pub fn lowercase(text: &str) -> String {
    text.to_lowercase()
}

/// Delete every character of the ASCII punctuation set
/// `!"#$%&'()*+,-./:;<=>?@[\]^_`{|}~`
pub fn strip_punctuation(text: &str) -> String {
    text.chars().filter(|c| !c.is_ascii_punctuation()).collect()
}

pub fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_string).collect()
}

pub fn remove_stop_words(tokens: Vec<String>, stop_words: &StopWords) -> Vec<String> {
    tokens
        .into_iter()
        .filter(|t| !stop_words.contains(t))
        .collect()
}

/// Replace each token by its lemma, keeping order
pub fn lemmatize_tokens(mut tokens: Vec<String>, lemmatizer: &Lemmatizer) -> Vec<String> {
    for token in tokens.iter_mut() {
        let lemma = lemmatizer.lemmatize(token).to_string();
        if lemma != *token {
            *token = lemma;
        }
    }
    tokens
}

pub fn join_tokens(tokens: &[String]) -> String {
    tokens.join(" ")
}

/// Output of normalising a single text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalized {
    /// Lowercased, punctuation-free text
    pub text: String,

    /// Stop-word-free, lemmatized tokens
    pub tokens: Vec<String>,

    /// `tokens` joined with single spaces
    pub processed: String,
}

/// Applies the full chain with a fixed set of resources
pub struct Normalizer<'r> {
    resources: &'r NlpResources,
}

impl<'r> Normalizer<'r> {
    pub fn new(resources: &'r NlpResources) -> Self {
        Self { resources }
    }

    pub fn normalize(&self, raw: &str) -> Normalized {
        let text   = strip_punctuation(&lowercase(raw));
        let tokens = tokenize(&text);
        let tokens = remove_stop_words(tokens, &self.resources.stop_words);
        let tokens = lemmatize_tokens(tokens, &self.resources.lemmatizer);
        let processed = join_tokens(&tokens);

        Normalized { text, tokens, processed }
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::lexicon::fixtures;

    fn strings(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_lowercase() {
        assert_eq!(lowercase("This is AMAZING!"), "this is amazing!");
    }

    #[test]
    fn test_strip_punctuation_deletes_without_spacing() {
        assert_eq!(strip_punctuation("great-value, isn't it?"), "greatvalue isnt it");
        assert_eq!(strip_punctuation(r##"!"#$%&'()*+,-./:;<=>?@[\]^_`{|}~"##), "");
    }

    #[test]
    fn test_strip_punctuation_keeps_non_ascii() {
        // typographic quotes are outside the ASCII set
        assert_eq!(strip_punctuation("café “ok”"), "café “ok”");
    }

    #[test]
    fn test_tokenize_collapses_whitespace() {
        assert_eq!(tokenize("  best \t ever\nreally "), strings(&["best", "ever", "really"]));
        assert!(tokenize("   ").is_empty());
    }

    #[test]
    fn test_remove_stop_words() {
        let stop = StopWords::parse("this\nis\n").unwrap();
        let kept = remove_stop_words(strings(&["this", "is", "amazing", "This"]), &stop);
        // matching is exact, so the capitalised form survives
        assert_eq!(kept, strings(&["amazing", "This"]));
    }

    #[test]
    fn test_lemmatize_tokens_keeps_order() {
        let lem = Lemmatizer::parse("dog n\ncat n\n", "").unwrap();
        let out = lemmatize_tokens(strings(&["cats", "love", "dogs"]), &lem);
        assert_eq!(out, strings(&["cat", "love", "dog"]));
    }

    #[test]
    fn test_join_tokens() {
        assert_eq!(join_tokens(&strings(&["a", "b"])), "a b");
        assert_eq!(join_tokens(&[]), "");
    }

    #[test]
    fn test_full_chain_example() {
        let resources = fixtures::resources();
        let n = Normalizer::new(resources).normalize("This is AMAZING! Best ever.");
        assert_eq!(n.text, "this is amazing best ever");
        assert_eq!(n.tokens, strings(&["amazing", "best", "ever"]));
        assert_eq!(n.processed, "amazing best ever");
    }

    #[test]
    fn test_all_stop_words_gives_empty_text() {
        let resources = fixtures::resources();
        let n = Normalizer::new(resources).normalize("It is what it is.");
        assert!(n.tokens.is_empty());
        assert_eq!(n.processed, "");
    }

    #[test]
    fn test_lemmatizes_plurals() {
        let resources = fixtures::resources();
        let n = Normalizer::new(resources).normalize("The dogs loved these treats!");
        assert_eq!(n.processed, "dog loved treat");
    }

    #[test]
    fn test_lemmatizes_everyday_plurals() {
        let n = Normalizer::new(fixtures::resources()).normalize(
            "The purchases arrived in two shipments; these ones had broken seals and \
             wrappers, plus missing lids for the containers. My cats and the neighbors' \
             horses hated the flavors.",
        );
        assert_eq!(
            n.processed,
            "purchase arrived two shipment one broken seal wrapper plus missing lid \
             container cat neighbor horse hated flavor"
        );
    }
}
