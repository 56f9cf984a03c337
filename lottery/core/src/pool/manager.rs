//! Draw Pool Manager
//!
//! Owns the shuffled pool, the working list drawn from, and the deferred
//! removal used by replace mode. In replace mode a winner stays drawable for
//! exactly one more draw; it leaves the working list when the *next* draw
//! begins.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::DrawError;

/// What [`DrawPool::commit_winner`] did with the winning value
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommitOutcome {
    /// Replace mode: removal is deferred to the next `begin_draw`
    Deferred,
    /// Removed from the working list; numbers remain
    Removed,
    /// Removed from the working list and nothing is left
    Depleted,
}

/// Pool of numbers for one session
#[derive(Clone, Debug, Default)]
pub struct DrawPool {
    /// Shuffled copy of the initial numbers
    pool: Vec<i64>,
    /// Numbers still eligible to be drawn
    working: Vec<i64>,
    /// Winner to remove at the start of the next draw (replace mode)
    pending_removal: Option<i64>,
}

impl DrawPool {
    /// Create an empty, uninitialized pool
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a shuffled copy of `numbers` and reset the working list
    ///
    /// # Errors
    ///
    /// Returns [`DrawError::EmptyPool`] if `numbers` is empty. The pool is
    /// left untouched in that case.
    pub fn initialize<R: Rng + ?Sized>(
        &mut self,
        numbers: Vec<i64>,
        rng: &mut R,
    ) -> Result<(), DrawError> {
        if numbers.is_empty() {
            return Err(DrawError::EmptyPool);
        }

        self.pool = numbers;
        self.pool.shuffle(rng);
        self.working.clone_from(&self.pool);
        self.pending_removal = None;

        tracing::info!(size = self.pool.len(), "Pool initialized");
        Ok(())
    }

    /// Reshuffle the pool into a fresh working list
    ///
    /// Only called on explicit user request. Drops any pending removal.
    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.pool.shuffle(rng);
        self.working.clone_from(&self.pool);
        self.pending_removal = None;
        tracing::debug!(size = self.pool.len(), "Pool reshuffled");
    }

    /// Apply any deferred removal and return the candidates for this draw
    ///
    /// # Errors
    ///
    /// Returns [`DrawError::PoolExhausted`] if the working list is empty once
    /// the deferred removal has been applied.
    pub fn begin_draw(&mut self) -> Result<&[i64], DrawError> {
        if let Some(value) = self.pending_removal.take() {
            if remove_one(&mut self.working, value) {
                tracing::debug!(value, "Deferred removal before next draw");
            }
        }

        if self.working.is_empty() {
            return Err(DrawError::PoolExhausted);
        }
        Ok(&self.working)
    }

    /// Uniformly random index into the working list
    ///
    /// # Errors
    ///
    /// Returns [`DrawError::PoolExhausted`] if the working list is empty.
    pub fn pick_winner_index<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<usize, DrawError> {
        if self.working.is_empty() {
            return Err(DrawError::PoolExhausted);
        }
        Ok(rng.gen_range(0..self.working.len()))
    }

    /// Record the outcome of a draw against the working list
    ///
    /// With `replace_enabled` the value stays in the working list until the
    /// next [`begin_draw`](Self::begin_draw). Otherwise one occurrence is
    /// removed right away.
    pub fn commit_winner(&mut self, value: i64, replace_enabled: bool) -> CommitOutcome {
        if replace_enabled {
            self.pending_removal = Some(value);
            return CommitOutcome::Deferred;
        }

        remove_one(&mut self.working, value);
        if self.working.is_empty() {
            CommitOutcome::Depleted
        } else {
            CommitOutcome::Removed
        }
    }

    /// The full shuffled pool
    #[must_use]
    pub fn pool(&self) -> &[i64] {
        &self.pool
    }

    /// Numbers still eligible to be drawn
    #[must_use]
    pub fn working(&self) -> &[i64] {
        &self.working
    }

    /// Value waiting to be removed at the next draw
    #[must_use]
    pub fn pending_removal(&self) -> Option<i64> {
        self.pending_removal
    }

    /// Whether `initialize` has succeeded at least once
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        !self.pool.is_empty()
    }
}

/// Remove the first occurrence of `value`; `false` if absent
fn remove_one(list: &mut Vec<i64>, value: i64) -> bool {
    match list.iter().position(|&n| n == value) {
        Some(pos) => {
            list.remove(pos);
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    fn sorted(values: &[i64]) -> Vec<i64> {
        let mut v = values.to_vec();
        v.sort_unstable();
        v
    }

    #[test]
    fn test_initialize_is_a_permutation() {
        let mut pool = DrawPool::new();
        pool.initialize(vec![5, 1, 1, 9, 3], &mut rng()).unwrap();

        assert_eq!(sorted(pool.working()), vec![1, 1, 3, 5, 9]);
        assert_eq!(pool.working(), pool.pool());
        assert_eq!(pool.pending_removal(), None);
    }

    #[test]
    fn test_initialize_empty_keeps_previous_state() {
        let mut pool = DrawPool::new();
        pool.initialize(vec![1, 2], &mut rng()).unwrap();
        pool.commit_winner(1, true);

        assert_eq!(pool.initialize(Vec::new(), &mut rng()), Err(DrawError::EmptyPool));
        assert_eq!(sorted(pool.pool()), vec![1, 2]);
        assert_eq!(pool.pending_removal(), Some(1));
    }

    #[test]
    fn test_deferred_removal_happens_at_next_begin() {
        let mut pool = DrawPool::new();
        pool.initialize(vec![4, 8], &mut rng()).unwrap();

        pool.begin_draw().unwrap();
        assert_eq!(pool.commit_winner(4, true), CommitOutcome::Deferred);
        assert!(pool.working().contains(&4));

        let candidates = pool.begin_draw().unwrap();
        assert_eq!(candidates, &[8]);
        assert_eq!(pool.pending_removal(), None);
    }

    #[test]
    fn test_deferred_removal_takes_one_duplicate() {
        let mut pool = DrawPool::new();
        pool.initialize(vec![3, 3, 3], &mut rng()).unwrap();
        pool.commit_winner(3, true);
        assert_eq!(pool.begin_draw().unwrap(), &[3, 3]);
    }

    #[test]
    fn test_deferred_removal_of_absent_value_is_harmless() {
        let mut pool = DrawPool::new();
        pool.initialize(vec![1, 2], &mut rng()).unwrap();
        pool.commit_winner(99, true);
        assert_eq!(pool.begin_draw().unwrap().len(), 2);
    }

    #[test]
    fn test_immediate_removal_and_depletion() {
        let mut pool = DrawPool::new();
        pool.initialize(vec![1, 2], &mut rng()).unwrap();

        assert_eq!(pool.commit_winner(1, false), CommitOutcome::Removed);
        assert_eq!(pool.working(), &[2]);
        assert_eq!(pool.commit_winner(2, false), CommitOutcome::Depleted);
        assert_eq!(pool.begin_draw(), Err(DrawError::PoolExhausted));
    }

    #[test]
    fn test_replace_on_single_number_exhausts_on_second_begin() {
        let mut pool = DrawPool::new();
        pool.initialize(vec![42], &mut rng()).unwrap();
        pool.begin_draw().unwrap();
        pool.commit_winner(42, true);
        assert_eq!(pool.begin_draw(), Err(DrawError::PoolExhausted));
    }

    #[test]
    fn test_pick_index_in_bounds_and_covers_all() {
        let mut pool = DrawPool::new();
        pool.initialize((0..4).collect(), &mut rng()).unwrap();

        let mut rng = rng();
        let mut seen = [0usize; 4];
        for _ in 0..400 {
            let idx = pool.pick_winner_index(&mut rng).unwrap();
            seen[idx] += 1;
        }
        assert!(seen.iter().all(|&count| count > 50), "skewed: {seen:?}");
    }

    #[test]
    fn test_pick_index_on_empty_pool() {
        let pool = DrawPool::new();
        assert_eq!(pool.pick_winner_index(&mut rng()), Err(DrawError::PoolExhausted));
    }

    #[test]
    fn test_reset_restores_full_working_list() {
        let mut pool = DrawPool::new();
        pool.initialize(vec![1, 2, 3], &mut rng()).unwrap();
        pool.commit_winner(2, false);
        pool.commit_winner(3, true);

        pool.reset(&mut rng());
        assert_eq!(sorted(pool.working()), vec![1, 2, 3]);
        assert_eq!(pool.pending_removal(), None);
    }
}
