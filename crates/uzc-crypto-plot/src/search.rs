//! Deadline search over a range of nonces.
//!
//! The search is a pure reduction: every nonce is evaluated independently and
//! the results are folded with [`BestDeadline::min`], which orders by
//! `(deadline, nonce)`. The parallel variant therefore returns exactly what
//! the sequential one does, whatever the worker count or chunk size.

use serde::{Deserialize, Serialize};
use std::ops::Range;
use tokio::task::JoinSet;
use tracing::{debug, trace};

use uzc_crypto_core::AccountId;

use crate::calculator::hit_from_scoop_data;
use crate::error::{PlotError, Result};
use crate::plot::MiningPlot;
use crate::types::{GenerationSignature, PocVersion, Scoop};

// ─────────────────────────────────────────────────────────────────────────────
// Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Parallel search tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Maximum number of chunks evaluated concurrently.
    pub workers: usize,
    /// Nonces per blocking task.
    pub chunk_size: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            workers: std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(4),
            chunk_size: 64,
        }
    }
}

impl SearchConfig {
    fn validate(&self) -> Result<()> {
        if self.workers == 0 {
            return Err(PlotError::InvalidArgument("workers must be positive".into()));
        }
        if self.chunk_size == 0 {
            return Err(PlotError::InvalidArgument("chunk size must be positive".into()));
        }
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Result
// ─────────────────────────────────────────────────────────────────────────────

/// The best nonce found so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BestDeadline {
    pub nonce: u64,
    pub deadline: u64,
}

impl BestDeadline {
    /// The smaller deadline; ties go to the smaller nonce.
    pub fn min(self, other: Self) -> Self {
        if (other.deadline, other.nonce) < (self.deadline, self.nonce) {
            other
        } else {
            self
        }
    }

    fn fold(acc: Option<Self>, next: Option<Self>) -> Option<Self> {
        match (acc, next) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Search
// ─────────────────────────────────────────────────────────────────────────────

/// Everything fixed for one block: who mines, on what, against which target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeadlineSearch {
    account: AccountId,
    gen_sig: GenerationSignature,
    scoop: Scoop,
    base_target: u64,
    poc: PocVersion,
}

impl DeadlineSearch {
    /// Prepare a search. A zero `base_target` is rejected here so the
    /// evaluation loop cannot fail.
    pub fn new(
        account: AccountId,
        gen_sig: GenerationSignature,
        scoop: Scoop,
        base_target: u64,
        poc: PocVersion,
    ) -> Result<Self> {
        if base_target == 0 {
            return Err(PlotError::InvalidArgument(
                "base target must be positive".to_string(),
            ));
        }
        Ok(Self {
            account,
            gen_sig,
            scoop,
            base_target,
            poc,
        })
    }

    /// Deadline of a single nonce.
    pub fn evaluate(&self, nonce: u64) -> u64 {
        let data = MiningPlot::new(self.account, nonce).scoop_data(self.scoop, self.poc);
        hit_from_scoop_data(&self.gen_sig, &data) / self.base_target
    }

    /// Best nonce in `nonces`, or `None` for an empty range.
    pub fn best_in_range(&self, nonces: Range<u64>) -> Option<BestDeadline> {
        nonces
            .map(|nonce| BestDeadline {
                nonce,
                deadline: self.evaluate(nonce),
            })
            .reduce(BestDeadline::min)
    }

    /// Best nonce in `nonces`, evaluated on tokio's blocking pool.
    ///
    /// At most `config.workers` chunks run at once.
    pub async fn search_parallel(
        &self,
        nonces: Range<u64>,
        config: &SearchConfig,
    ) -> Result<Option<BestDeadline>> {
        config.validate()?;
        debug!(
            account = %self.account,
            start = nonces.start,
            end = nonces.end,
            workers = config.workers,
            chunk_size = config.chunk_size,
            "starting deadline search"
        );

        let mut chunks = chunk_ranges(nonces, config.chunk_size);
        let mut tasks = JoinSet::new();
        let mut best = None;

        for chunk in chunks.by_ref().take(config.workers) {
            self.spawn_chunk(&mut tasks, chunk);
        }

        while let Some(joined) = tasks.join_next().await {
            let found = joined.map_err(|e| PlotError::Join(e.to_string()))?;
            trace!(?found, "chunk finished");
            best = BestDeadline::fold(best, found);
            if let Some(chunk) = chunks.next() {
                self.spawn_chunk(&mut tasks, chunk);
            }
        }

        debug!(?best, "deadline search finished");
        Ok(best)
    }

    fn spawn_chunk(&self, tasks: &mut JoinSet<Option<BestDeadline>>, chunk: Range<u64>) {
        let search = *self;
        tasks.spawn_blocking(move || search.best_in_range(chunk));
    }
}

fn chunk_ranges(nonces: Range<u64>, chunk_size: u64) -> impl Iterator<Item = Range<u64>> {
    let end = nonces.end;
    let mut start = nonces.start;
    std::iter::from_fn(move || {
        if start >= end {
            return None;
        }
        let chunk_end = start.saturating_add(chunk_size).min(end);
        let chunk = start..chunk_end;
        start = chunk_end;
        Some(chunk)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const GEN_SIG: &str = "a82239a681fde279d9b50c009b8e87815bb203e34446986a54bd168896fa81a6";

    fn search(poc: PocVersion) -> DeadlineSearch {
        DeadlineSearch::new(
            AccountId::new(7009665667967103287),
            GenerationSignature::from_hex(GEN_SIG).unwrap(),
            Scoop::new(769).unwrap(),
            18325193796,
            poc,
        )
        .unwrap()
    }

    #[test]
    fn test_zero_base_target_rejected() {
        let result = DeadlineSearch::new(
            AccountId::new(1),
            GenerationSignature([0; 32]),
            Scoop::wrapping(0),
            0,
            PocVersion::V1,
        );
        assert!(matches!(result, Err(PlotError::InvalidArgument(_))));
    }

    #[test]
    fn test_evaluate_matches_golden() {
        assert_eq!(search(PocVersion::V1).evaluate(1234), 657330036);
        assert_eq!(search(PocVersion::V2).evaluate(1234), 533484728);
    }

    #[test]
    fn test_best_in_range() {
        let s = search(PocVersion::V1);
        assert_eq!(s.best_in_range(5..5), None);
        let single = s.best_in_range(1234..1235).unwrap();
        assert_eq!(single, BestDeadline { nonce: 1234, deadline: 657330036 });

        let best = s.best_in_range(0..8).unwrap();
        for nonce in 0..8 {
            assert!(best.deadline <= s.evaluate(nonce));
        }
    }

    #[test]
    fn test_min_breaks_ties_by_nonce() {
        let a = BestDeadline { nonce: 7, deadline: 10 };
        let b = BestDeadline { nonce: 3, deadline: 10 };
        let c = BestDeadline { nonce: 1, deadline: 11 };
        assert_eq!(a.min(b), b);
        assert_eq!(b.min(a), b);
        assert_eq!(c.min(a), a);
    }

    #[test]
    fn test_chunk_ranges() {
        let chunks: Vec<_> = chunk_ranges(10..25, 6).collect();
        assert_eq!(chunks, vec![10..16, 16..22, 22..25]);
        assert_eq!(chunk_ranges(5..5, 3).count(), 0);
        let last: Vec<_> = chunk_ranges(u64::MAX - 2..u64::MAX, 10).collect();
        assert_eq!(last, vec![u64::MAX - 2..u64::MAX]);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_parallel_equals_sequential() {
        let s = search(PocVersion::V2);
        let expected = s.best_in_range(0..12);
        for (workers, chunk_size) in [(1, 12), (2, 5), (4, 1), (16, 3)] {
            let config = SearchConfig { workers, chunk_size };
            let found = s.search_parallel(0..12, &config).await.unwrap();
            assert_eq!(found, expected, "workers={workers} chunk={chunk_size}");
        }
    }

    #[tokio::test]
    async fn test_parallel_rejects_bad_config() {
        let s = search(PocVersion::V1);
        let config = SearchConfig { workers: 0, chunk_size: 1 };
        assert!(s.search_parallel(0..1, &config).await.is_err());
        let config = SearchConfig { workers: 1, chunk_size: 0 };
        assert!(s.search_parallel(0..1, &config).await.is_err());
        let empty = s.search_parallel(3..3, &SearchConfig::default()).await.unwrap();
        assert_eq!(empty, None);
    }
}
