use std::collections::HashMap;

/// Cosine similarity between a query string and each document, in [0, 1].
///
/// Builds a term-frequency/inverse-document-frequency space over the
/// documents plus the query treated as one extra document, weights raw term
/// counts with smoothed idf (`ln((1 + n) / (1 + df)) + 1`), L2-normalizes
/// each vector, and scores by dot product. A document sharing no terms with
/// the query scores 0, as does an empty query.
///
/// The space is built from exactly the strings passed in: no term statistics
/// survive the call, so separate recommendation requests never influence
/// each other.
pub fn similarity_to_query(query: &str, documents: &[String]) -> Vec<f64> {
    let mut corpus: Vec<Vec<&str>> = documents
        .iter()
        .map(|document| tokenize(document))
        .collect();
    corpus.push(tokenize(query));

    // Vocabulary indexed in first-encounter order
    let mut vocabulary: HashMap<&str, usize> = HashMap::new();
    for document in &corpus {
        for &token in document {
            let next_index = vocabulary.len();
            vocabulary.entry(token).or_insert(next_index);
        }
    }

    if vocabulary.is_empty() {
        return vec![0.0; documents.len()];
    }

    let mut doc_frequency = vec![0usize; vocabulary.len()];
    for document in &corpus {
        let mut seen = vec![false; vocabulary.len()];
        for &token in document {
            let index = vocabulary[token];
            if !seen[index] {
                seen[index] = true;
                doc_frequency[index] += 1;
            }
        }
    }

    let corpus_size = corpus.len() as f64;
    let idf: Vec<f64> = doc_frequency
        .iter()
        .map(|&df| ((1.0 + corpus_size) / (1.0 + df as f64)).ln() + 1.0)
        .collect();

    let vectors: Vec<Vec<f64>> = corpus
        .iter()
        .map(|document| tfidf_vector(document, &vocabulary, &idf))
        .collect();

    let query_vector = vectors.last().expect("corpus contains the query");
    vectors[..documents.len()]
        .iter()
        .map(|vector| dot(vector, query_vector).min(1.0).max(0.0))
        .collect()
}

#[inline]
fn tokenize(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}

/// L2-normalized tf-idf weights for one document. A document without tokens
/// stays the zero vector.
fn tfidf_vector(tokens: &[&str], vocabulary: &HashMap<&str, usize>, idf: &[f64]) -> Vec<f64> {
    let mut weights = vec![0.0; idf.len()];
    for &token in tokens {
        weights[vocabulary[token]] += 1.0;
    }
    for (weight, term_idf) in weights.iter_mut().zip(idf) {
        *weight *= term_idf;
    }

    let norm = weights.iter().map(|w| w * w).sum::<f64>().sqrt();
    if norm > 0.0 {
        for weight in &mut weights {
            *weight /= norm;
        }
    }
    weights
}

#[inline]
fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn docs(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_identical_text_scores_one() {
        let scores = similarity_to_query(
            "downtown rooftop venue",
            &docs(&["downtown rooftop venue"]),
        );
        assert_eq!(scores.len(), 1);
        assert!((scores[0] - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_disjoint_text_scores_zero() {
        let scores = similarity_to_query("downtown rooftop", &docs(&["suburban garden"]));
        assert_eq!(scores[0], 0.0);
    }

    #[test]
    fn test_partial_overlap_ranks_between() {
        let scores = similarity_to_query(
            "downtown rooftop venue",
            &docs(&["downtown rooftop venue", "downtown garden venue", "quartet"]),
        );

        assert!(scores[0] > scores[1]);
        assert!(scores[1] > scores[2]);
        assert_eq!(scores[2], 0.0);
    }

    #[test]
    fn test_empty_query_scores_zero_everywhere() {
        let scores = similarity_to_query("", &docs(&["downtown venue", "garden venue"]));
        assert_eq!(scores, vec![0.0, 0.0]);
    }

    #[test]
    fn test_empty_document_scores_zero() {
        let scores = similarity_to_query("downtown venue", &docs(&["", "downtown venue"]));
        assert_eq!(scores[0], 0.0);
        assert!(scores[1] > 0.9);
    }

    #[test]
    fn test_single_term_vocabulary_degenerates_to_presence() {
        let scores = similarity_to_query("downtown", &docs(&["downtown", "downtown downtown"]));

        // tf scales both vectors identically after normalization
        assert!((scores[0] - 1.0).abs() < 1e-9);
        assert!((scores[1] - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_scores_within_unit_interval() {
        let scores = similarity_to_query(
            "a b c d",
            &docs(&["a b", "a b c d", "c d e f", "x y z"]),
        );
        for score in scores {
            assert!((0.0..=1.0).contains(&score));
        }
    }

    #[test]
    fn test_deterministic_across_calls() {
        let corpus = docs(&["downtown rooftop", "garden venue", "rooftop bar downtown"]);
        let first = similarity_to_query("downtown rooftop venue", &corpus);
        let second = similarity_to_query("downtown rooftop venue", &corpus);
        assert_eq!(first, second);
    }
}
