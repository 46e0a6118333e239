/// Embedding dimension of the persisted index vectors.
pub const EMBEDDING_DIMENSION: usize = 1536;

/// Byte length of a base64-decoded vector buffer (little-endian f32).
pub const VECTOR_BYTE_LEN: usize = EMBEDDING_DIMENSION * 4;

/// Number of nearest neighbors fetched per language.
pub const PER_LANGUAGE_RESULTS: usize = 3;

/// Maximum number of augmentation results after ranking.
pub const MAX_AUGMENT_RESULTS: usize = 5;

/// Lower similarity bound (inclusive) for queried candidates.
/// Scores below this are too weak to be useful context.
pub const SCORE_FLOOR: f32 = 0.8;

/// Upper similarity bound (exclusive) for queried candidates.
///
/// The index may contain the embedding of the query text itself; scores at
/// or above this bound are near-identical matches and are discarded.
pub const SCORE_CEILING: f32 = 0.996_093_75;

/// Languages queried for every augmentation request.
pub const TARGET_LANGUAGES: [&str; 7] = [
    "csharp",
    "java",
    "javascript.v3",
    "kotlin",
    "php",
    "ruby",
    "swift",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn similarity_window_is_half_open() {
        assert!(SCORE_FLOOR < SCORE_CEILING);
        assert!(SCORE_CEILING < 1.0);
    }

    #[test]
    fn vector_byte_len_matches_dimension() {
        assert_eq!(VECTOR_BYTE_LEN, 6144);
    }
}
