// ============================================================
// Layer 6 - Infrastructure Layer
// ============================================================
//   lexicon.rs - stop-word set and noun lemmatizer, built in
//                or loaded from a WordNet dictionary directory

/// Stop words and lemmatizer resources
pub mod lexicon;
