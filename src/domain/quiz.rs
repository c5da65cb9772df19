//! Next-question selection for a quiz round.

use crate::domain::model::Question;
use rand::Rng;

/// A question is a quiz candidate when it belongs to the requested category
/// and the player has not seen it yet.
pub fn is_candidate(question: &Question, category_id: i32, previous: &[i32]) -> bool {
    question.is_in_category(category_id) && !previous.contains(&question.id)
}

/// Picks one candidate uniformly at random, or `None` when nothing is left.
pub fn pick_next<R: Rng + ?Sized>(mut candidates: Vec<Question>, rng: &mut R) -> Option<Question> {
    if candidates.is_empty() {
        return None;
    }
    let index = rng.gen_range(0..candidates.len());
    Some(candidates.swap_remove(index))
}
