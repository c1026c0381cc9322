use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::corpus::Corpus;
use crate::error::{Error, Result};

/// Build the RNG for a session: deterministic when a seed is given.
pub fn session_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// The target sentence: word indices into a [`Corpus`], repeats allowed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sentence {
    indices: Vec<usize>,
}

impl Sentence {
    /// Sample `count` indices uniformly from `[0, corpus_len)`, with replacement.
    pub fn generate<R: Rng + ?Sized>(corpus_len: usize, count: usize, rng: &mut R) -> Result<Self> {
        if corpus_len == 0 && count > 0 {
            return Err(Error::EmptyCorpus);
        }

        let indices = (0..count).map(|_| rng.gen_range(0..corpus_len)).collect();
        Ok(Self { indices })
    }

    pub fn from_indices(indices: Vec<usize>) -> Self {
        Self { indices }
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Look every index up in the corpus. Indices past the end are skipped.
    pub fn resolve(&self, corpus: &Corpus) -> Vec<String> {
        self.indices
            .iter()
            .filter_map(|&i| corpus.get(i))
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generates_exactly_count_indices_in_range() {
        let mut rng = session_rng(Some(7));
        for corpus_len in 1..20 {
            for count in 0..30 {
                let sentence = Sentence::generate(corpus_len, count, &mut rng).unwrap();
                assert_eq!(sentence.len(), count);
                assert!(sentence.indices().iter().all(|&i| i < corpus_len));
            }
        }
    }

    #[test]
    fn same_seed_same_sentence() {
        let a = Sentence::generate(1000, 15, &mut session_rng(Some(42))).unwrap();
        let b = Sentence::generate(1000, 15, &mut session_rng(Some(42))).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn empty_corpus_fails_only_when_words_requested() {
        let mut rng = session_rng(Some(1));
        assert!(matches!(
            Sentence::generate(0, 3, &mut rng),
            Err(Error::EmptyCorpus)
        ));
        assert!(Sentence::generate(0, 0, &mut rng).unwrap().is_empty());
    }

    #[test]
    fn single_word_corpus_repeats() {
        let sentence = Sentence::generate(1, 5, &mut session_rng(None)).unwrap();
        assert_eq!(sentence.indices(), &[0, 0, 0, 0, 0]);
    }

    #[test]
    fn resolve_looks_words_up_in_order() {
        let corpus = Corpus::from_words(["cat", "dog"]);
        let sentence = Sentence::from_indices(vec![0, 1, 0, 9]);

        assert_eq!(sentence.resolve(&corpus), vec!["cat", "dog", "cat"]);
    }
}
