//! Reachability over transition graphs.
//!
//! A [`TransitionGraph`] stores, for every state, the list of its immediate
//! successors and predecessors. It is built either from a boolean adjacency
//! matrix (Kripke structures) or from the support `P(s, s') > 0` of a
//! probability matrix (DTMCs).
//!
//! Closures are computed with an explicit worklist and a visited vector: every
//! state is enqueued at most once, so a closure takes at most `|S|` steps.
//! The bound is checked regardless and reported as
//! [`Error::IterationLimitExceeded`] if it is ever exceeded.

use std::collections::VecDeque;

use log::debug;

use crate::error::{ensure_dimension, Error, Result};
use crate::incidence::IncidenceVector;
use crate::matrix::SquareMatrix;

#[derive(Debug, Clone)]
pub struct TransitionGraph {
    successors: Vec<Vec<usize>>,
    predecessors: Vec<Vec<usize>>,
}

impl TransitionGraph {
    pub fn from_adjacency(t: &SquareMatrix<bool>) -> Self {
        let n = t.size();
        let mut successors = vec![Vec::new(); n];
        let mut predecessors = vec![Vec::new(); n];
        for i in 0..n {
            for (j, &edge) in t.row(i).iter().enumerate() {
                if edge {
                    successors[i].push(j);
                    predecessors[j].push(i);
                }
            }
        }
        Self {
            successors,
            predecessors,
        }
    }

    /// Graph of the transitions with strictly positive probability.
    pub fn from_support(p: &SquareMatrix<f64>) -> Self {
        Self::from_adjacency(&p.support())
    }

    pub fn size(&self) -> usize {
        self.successors.len()
    }

    fn check_state(&self, state: usize) -> Result<()> {
        if state < self.size() {
            Ok(())
        } else {
            Err(Error::IndexOutOfRange {
                index: state,
                len: self.size(),
            })
        }
    }

    /// Immediate successors of `state`, in increasing order.
    pub fn successors(&self, state: usize) -> Result<&[usize]> {
        self.check_state(state)?;
        Ok(&self.successors[state])
    }

    /// Immediate predecessors of `state`, in increasing order.
    pub fn predecessors(&self, state: usize) -> Result<&[usize]> {
        self.check_state(state)?;
        Ok(&self.predecessors[state])
    }

    /// States reachable from `state` in one or more steps.
    pub fn reachable_from(&self, state: usize) -> Result<IncidenceVector> {
        self.check_state(state)?;
        let n = self.size();
        let mut visited = IncidenceVector::zeros(n);
        let mut queue = VecDeque::new();
        for &s in &self.successors[state] {
            if visited.insert(s) {
                queue.push_back(s);
            }
        }
        self.drain(&self.successors, &mut queue, &mut visited, |_| true)?;
        Ok(visited)
    }

    /// `{state} ∪` the states reachable from `state`.
    pub fn path_set(&self, state: usize) -> Result<IncidenceVector> {
        let mut set = self.reachable_from(state)?;
        set.insert(state);
        Ok(set)
    }

    /// Backward constrained closure `Pre*_through(target)`.
    ///
    /// Returns the smallest set containing `target` and every state of
    /// `through` having a successor in the set, i.e. the states that can
    /// reach `target` along a path whose intermediate states all lie in
    /// `through`.
    pub fn backward_closure(&self, target: &IncidenceVector, through: &IncidenceVector) -> Result<IncidenceVector> {
        ensure_dimension(self.size(), target.len())?;
        ensure_dimension(self.size(), through.len())?;
        let mut visited = target.clone();
        let mut queue: VecDeque<usize> = target.iter_ones().collect();
        self.drain(&self.predecessors, &mut queue, &mut visited, |s| through.get(s))?;
        debug!(
            "backward closure: {} target states, {} in closure",
            target.count_ones(),
            visited.count_ones()
        );
        Ok(visited)
    }

    /// Runs the worklist until empty, following `edges` into states accepted
    /// by `admit`.
    fn drain(
        &self,
        edges: &[Vec<usize>],
        queue: &mut VecDeque<usize>,
        visited: &mut IncidenceVector,
        admit: impl Fn(usize) -> bool,
    ) -> Result<()> {
        let limit = self.size();
        let mut steps = 0;
        while let Some(s) = queue.pop_front() {
            steps += 1;
            if steps > limit {
                return Err(Error::IterationLimitExceeded { limit });
            }
            for &t in &edges[s] {
                if admit(t) && visited.insert(t) {
                    queue.push_back(t);
                }
            }
        }
        Ok(())
    }
}
