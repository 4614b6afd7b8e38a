//! Random selection of an unseen quiz question.
//!
//! The pool's indices are shuffled once and walked in that order, so every
//! candidate is tried at most once per request and selection always
//! terminates, even when the exclusion list covers the whole pool.

use std::collections::HashSet;

use rand::{Rng, seq::SliceRandom};

use crate::question::{Question, QuestionId};

/// Outcome of [`pick_unseen`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizPick<'a> {
  /// A question the caller has not been served yet.
  Question(&'a Question),
  /// Every question in the pool is already in the exclusion list.
  Exhausted,
  /// The pool had no questions at all.
  EmptyPool,
}

/// Choose a uniformly random question from `pool` whose id is not in
/// `previous`.
pub fn pick_unseen<'a, R>(
  pool: &'a [Question],
  previous: &HashSet<QuestionId>,
  rng: &mut R,
) -> QuizPick<'a>
where
  R: Rng + ?Sized,
{
  if pool.is_empty() {
    return QuizPick::EmptyPool;
  }

  let mut order: Vec<usize> = (0..pool.len()).collect();
  order.shuffle(rng);

  order
    .into_iter()
    .map(|i| &pool[i])
    .find(|q| !previous.contains(&q.id))
    .map_or(QuizPick::Exhausted, QuizPick::Question)
}
