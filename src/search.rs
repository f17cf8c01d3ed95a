//! Placement search: candidate combinations of movable blocks over the open cells, tried one by one or across worker threads.

use std::ops::ControlFlow;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};
use std::thread;

use crossbeam_channel::bounded;
use itertools::Itertools;
use log::{debug, error, info, warn};

use crate::board::Board;
use crate::cell::{Block, BlockCounts};
use crate::engine;
use crate::location::Location;
use crate::placement::{Placement, PlacementConflict};

/// The result of a search that was allowed to run.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SearchOutcome {
    /// A placement that routes the lazors through every target point.
    Found(Placement),
    /// Every combination was tried and none works.
    NotFound,
}

impl SearchOutcome {
    /// The placement, if one was found.
    pub fn placement(&self) -> Option<&Placement> {
        match self {
            SearchOutcome::Found(placement) => Some(placement),
            SearchOutcome::NotFound => None,
        }
    }
}

/// One choice of cells for each kind of movable block.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Candidate {
    pub(crate) reflectors: Vec<Location>,
    pub(crate) opaques: Vec<Location>,
    pub(crate) splitters: Vec<Location>,
}

/// The open cells, in their fixed order, with a stack of reservations on top.
///
/// Cells are only taken with [`reserve`](Self::reserve) and given back with [`release`](Self::release),
/// most recent first.
pub(crate) struct CellPool<'a> {
    cells: &'a [Location],
    reserved: Vec<bool>,
    held: Vec<usize>,
}

impl<'a> CellPool<'a> {
    pub(crate) fn new(cells: &'a [Location]) -> Self {
        Self {
            cells,
            reserved: vec![false; cells.len()],
            held: Vec::with_capacity(cells.len()),
        }
    }

    /// Indices of every unreserved cell, in pool order.
    pub(crate) fn available(&self) -> Vec<usize> {
        (0..self.cells.len()).filter(|i| !self.reserved[*i]).collect_vec()
    }

    pub(crate) fn reserve(&mut self, picks: &[usize]) {
        for pick in picks {
            debug_assert!(!self.reserved[*pick]);
            self.reserved[*pick] = true;
            self.held.push(*pick);
        }
    }

    /// Give back the `count` most recently reserved cells.
    pub(crate) fn release(&mut self, count: usize) {
        for _ in 0..count {
            if let Some(pick) = self.held.pop() {
                self.reserved[pick] = false;
            }
        }
    }

    pub(crate) fn locations(&self, picks: &[usize]) -> Vec<Location> {
        picks.iter().map(|i| self.cells[*i]).collect_vec()
    }
}

/// Offer every candidate to `visit` in a fixed order, stopping early if it breaks.
///
/// Reflector cells are chosen first from the whole pool, opaque cells from what remains, splitter cells from what remains after that.
/// Within each level, combinations run lexicographically by pool index.
pub(crate) fn for_each_candidate<B>(
    open: &[Location],
    counts: BlockCounts,
    mut visit: impl FnMut(Candidate) -> ControlFlow<B>,
) -> ControlFlow<B> {
    let mut pool = CellPool::new(open);

    for reflectors in pool.available().into_iter().combinations(counts.reflectors) {
        pool.reserve(&reflectors);

        for opaques in pool.available().into_iter().combinations(counts.opaques) {
            pool.reserve(&opaques);

            // nothing is chosen after the splitters, so they are never reserved
            for splitters in pool.available().into_iter().combinations(counts.splitters) {
                let candidate = Candidate {
                    reflectors: pool.locations(&reflectors),
                    opaques: pool.locations(&opaques),
                    splitters: pool.locations(&splitters),
                };
                if let ControlFlow::Break(b) = visit(candidate) {
                    return ControlFlow::Break(b);
                }
            }

            pool.release(opaques.len());
        }

        pool.release(reflectors.len());
    }

    ControlFlow::Continue(())
}

fn assemble(board: &Board, candidate: &Candidate) -> Result<Placement, PlacementConflict> {
    let mut placement = board.fixed.clone();
    placement.place_all(&candidate.reflectors, Block::Reflector)?;
    placement.place_all(&candidate.opaques, Block::Opaque)?;
    placement.place_all(&candidate.splitters, Block::Splitter)?;
    Ok(placement)
}

/// Build and evaluate one candidate. A candidate that cannot be assembled is reported and treated as a failure.
fn attempt(board: &Board, candidate: &Candidate) -> Option<Placement> {
    let placement = match assemble(board, candidate) {
        Ok(placement) => placement,
        Err(conflict) => {
            error!("abandoning candidate {candidate:?}: {conflict}");
            return None;
        }
    };

    let mut points = board.points.clone();
    engine::evaluate(&placement, &board.lazors, &mut points).then_some(placement)
}

fn warn_if_short(board: &Board) {
    if board.counts.total() > board.open.len() {
        warn!(
            "{} movable blocks but only {} open cells; no candidate exists",
            board.counts.total(),
            board.open.len()
        );
    }
}

/// Try candidates one at a time in a fixed order and return the first that works.
///
/// For a given board the answer is always the same.
pub fn search(board: &Board) -> SearchOutcome {
    warn_if_short(board);
    let mut tried = 0usize;

    let flow = for_each_candidate(&board.open, board.counts, |candidate| {
        tried += 1;
        if tried % 100_000 == 0 {
            debug!("{tried} candidates tried");
        }
        match attempt(board, &candidate) {
            Some(placement) => ControlFlow::Break(placement),
            None => ControlFlow::Continue(()),
        }
    });

    match flow {
        ControlFlow::Break(placement) => {
            info!("solution found after {tried} candidates");
            SearchOutcome::Found(placement)
        }
        ControlFlow::Continue(()) => {
            info!("no solution among {tried} candidates");
            SearchOutcome::NotFound
        }
    }
}

/// Spread candidates over `workers` threads and return whichever success is seen first.
///
/// Candidates are produced in a fixed order into a bounded queue.
/// Once any worker succeeds, queued and in-flight candidates are dropped.
/// When a board has several solutions, which one comes back can vary from run to run
/// and need not be the one [`search`] returns.
pub fn search_parallel(board: &Board, workers: usize) -> SearchOutcome {
    let workers = workers.max(1);
    warn_if_short(board);

    let found = AtomicBool::new(false);
    let tried = AtomicUsize::new(0);
    let slot: Mutex<Option<Placement>> = Mutex::new(None);
    let (tx, rx) = bounded::<Candidate>(workers * 4);

    thread::scope(|scope| {
        for _ in 0..workers {
            let rx = rx.clone();
            let (found, tried, slot) = (&found, &tried, &slot);
            scope.spawn(move || {
                while let Ok(candidate) = rx.recv() {
                    if found.load(Ordering::Acquire) {
                        break;
                    }
                    tried.fetch_add(1, Ordering::Relaxed);
                    if let Some(placement) = attempt(board, &candidate) {
                        if !found.swap(true, Ordering::AcqRel) {
                            *slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(placement);
                        }
                        break;
                    }
                }
            });
        }
        // workers hold the only receivers, so sends fail once they have all stopped
        drop(rx);

        let _ = for_each_candidate(&board.open, board.counts, |candidate| {
            if found.load(Ordering::Acquire) || tx.send(candidate).is_err() {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        });
        drop(tx);
    });

    let tried = tried.into_inner();
    match slot.into_inner().unwrap_or_else(PoisonError::into_inner) {
        Some(placement) => {
            info!("solution found after {tried} candidates across {workers} workers");
            SearchOutcome::Found(placement)
        }
        None => {
            info!("no solution among {tried} candidates across {workers} workers");
            SearchOutcome::NotFound
        }
    }
}

#[cfg(test)]
mod tests {
    use std::ops::ControlFlow;

    use super::*;

    fn row(n: usize) -> Vec<Location> {
        (0..n).map(|x| Location(x, 0)).collect_vec()
    }

    #[test]
    fn pool_restores_in_reverse() {
        let cells = row(4);
        let mut pool = CellPool::new(&cells);
        pool.reserve(&[1]);
        pool.reserve(&[0, 3]);
        assert_eq!(pool.available(), vec![2]);

        pool.release(2);
        assert_eq!(pool.available(), vec![0, 2, 3]);
        pool.release(1);
        assert_eq!(pool.available(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn candidate_order() {
        let cells = row(3);
        let mut seen = Vec::new();
        let _ = for_each_candidate(&cells, BlockCounts::new(1, 1, 0), |candidate| {
            seen.push((candidate.reflectors[0].0, candidate.opaques[0].0));
            ControlFlow::<()>::Continue(())
        });

        assert_eq!(seen, vec![(0, 1), (0, 2), (1, 0), (1, 2), (2, 0), (2, 1)]);
    }

    #[test]
    fn levels_never_share_cells() {
        let cells = row(5);
        let mut count = 0;
        let _ = for_each_candidate(&cells, BlockCounts::new(2, 1, 1), |candidate| {
            count += 1;
            let all = candidate.reflectors.iter()
                .chain(candidate.opaques.iter())
                .chain(candidate.splitters.iter())
                .collect_vec();
            assert_eq!(all.len(), 4);
            assert!(all.iter().all_unique());
            ControlFlow::<()>::Continue(())
        });

        // C(5,2) * C(3,1) * C(2,1)
        assert_eq!(count, 10 * 3 * 2);
    }

    #[test]
    fn oversized_level_yields_nothing() {
        let cells = row(2);
        let mut count = 0;
        let _ = for_each_candidate(&cells, BlockCounts::new(1, 2, 0), |_| {
            count += 1;
            ControlFlow::<()>::Continue(())
        });
        assert_eq!(count, 0);
    }

    #[test]
    fn zero_counts_yield_one_empty_candidate() {
        let cells = row(2);
        let mut seen = Vec::new();
        let _ = for_each_candidate(&cells, BlockCounts::default(), |candidate| {
            seen.push(candidate);
            ControlFlow::<()>::Continue(())
        });
        assert_eq!(seen, vec![Candidate { reflectors: vec![], opaques: vec![], splitters: vec![] }]);
    }
}
