use crate::index::search::Candidate;

/// Sort the candidate pool by score descending and keep the first `limit`.
///
/// Uses an unstable sort; the relative order of equal scores is not
/// guaranteed. Language diversity is not enforced here.
#[must_use]
pub fn rank_top(mut pool: Vec<Candidate>, limit: usize) -> Vec<Candidate> {
    pool.sort_unstable_by(|a, b| b.score.total_cmp(&a.score));
    pool.truncate(limit);
    pool
}
