//! All-pairs shortest paths over the factory graph.
//!
//! The graph is small and fixed for the whole match, so distances are kept
//! in dense `count * count` matrices indexed by factory id. Floyd-Warshall
//! runs once after the links are loaded, and every shortest path is then
//! reconstructed and cached so turn logic can fetch any path in O(1).

use super::error::BoardError;
use super::factory::FactoryId;

/// Distance between factories with no known connection.
pub const UNREACHABLE: u32 = u32::MAX;

/// Shortest-distance and shortest-path index for one match.
#[derive(Debug, Clone)]
pub struct DistanceIndex {
    count: usize,
    dist: Vec<u32>,
    /// `pred[u * count + v]` is the factory before `v` on the best `u -> v` path.
    pred: Vec<Option<FactoryId>>,
    paths: Option<Vec<Vec<FactoryId>>>,
}

impl DistanceIndex {
    /// Creates an index over `count` factories with no links.
    pub fn new(count: usize) -> Self {
        let mut dist = vec![UNREACHABLE; count * count];
        for i in 0..count {
            dist[i * count + i] = 0;
        }
        DistanceIndex {
            count,
            dist,
            pred: vec![None; count * count],
            paths: None,
        }
    }

    /// Number of factories in the graph.
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    #[inline]
    fn idx(&self, u: FactoryId, v: FactoryId) -> usize {
        u * self.count + v
    }

    fn check(&self, id: FactoryId) -> Result<(), BoardError> {
        if id < self.count {
            Ok(())
        } else {
            Err(BoardError::UnknownFactory {
                id,
                count: self.count,
            })
        }
    }

    /// Records an undirected link. Linking the same pair again overwrites it.
    pub fn create_edge(&mut self, u: FactoryId, v: FactoryId, dist: u32) -> Result<(), BoardError> {
        self.check(u)?;
        self.check(v)?;
        if u == v {
            return Ok(());
        }
        let (uv, vu) = (self.idx(u, v), self.idx(v, u));
        self.dist[uv] = dist;
        self.dist[vu] = dist;
        self.pred[uv] = Some(u);
        self.pred[vu] = Some(v);
        self.paths = None;
        Ok(())
    }

    /// Floyd-Warshall relaxation over every intermediate factory.
    pub fn calculate(&mut self) {
        let n = self.count;
        for k in 0..n {
            for u in 0..n {
                let uk = self.dist[u * n + k];
                if uk == UNREACHABLE {
                    continue;
                }
                for v in 0..n {
                    let kv = self.dist[k * n + v];
                    if kv == UNREACHABLE {
                        continue;
                    }
                    let through = uk.saturating_add(kv);
                    if through < self.dist[u * n + v] {
                        self.dist[u * n + v] = through;
                        self.pred[u * n + v] = self.pred[k * n + v];
                    }
                }
            }
        }
        self.paths = None;
    }

    /// Shortest distance between two factories, `UNREACHABLE` if disconnected.
    ///
    /// # Panics
    ///
    /// Panics if either id is outside the graph.
    #[inline]
    pub fn distance(&self, u: FactoryId, v: FactoryId) -> u32 {
        assert!(
            u < self.count && v < self.count,
            "factory id out of range: ({}, {}) with {} factories",
            u,
            v,
            self.count
        );
        self.dist[self.idx(u, v)]
    }

    /// Walks predecessors back from `v` to `u`. Empty when unreachable.
    fn reconstruct(&self, u: FactoryId, v: FactoryId) -> Vec<FactoryId> {
        if u != v && self.dist[self.idx(u, v)] == UNREACHABLE {
            return Vec::new();
        }
        let mut path = Vec::new();
        let mut cur = Some(v);
        while let Some(k) = cur {
            path.push(k);
            if k == u || path.len() > self.count {
                break;
            }
            cur = self.pred[self.idx(u, k)];
        }
        path.reverse();
        path
    }

    /// Reconstructs and stores the shortest path for every ordered pair.
    /// Must follow `calculate()`.
    pub fn cache_all_paths(&mut self) {
        let n = self.count;
        let mut paths = Vec::with_capacity(n * n);
        for u in 0..n {
            for v in 0..n {
                paths.push(self.reconstruct(u, v));
            }
        }
        self.paths = Some(paths);
    }

    pub fn is_cached(&self) -> bool {
        self.paths.is_some()
    }

    /// The cached shortest path from `u` to `v`, both ends inclusive.
    pub fn path(&self, u: FactoryId, v: FactoryId) -> Result<&[FactoryId], BoardError> {
        self.check(u)?;
        self.check(v)?;
        let paths = self.paths.as_ref().ok_or(BoardError::PathsNotCached)?;
        let path = &paths[self.idx(u, v)];
        if path.is_empty() {
            return Err(BoardError::Unreachable { from: u, to: v });
        }
        Ok(path)
    }

    /// The factory after `u` on the shortest path to `v`, or `None` if `u == v`.
    pub fn next_hop(&self, u: FactoryId, v: FactoryId) -> Result<Option<FactoryId>, BoardError> {
        Ok(self.path(u, v)?.get(1).copied())
    }
}
