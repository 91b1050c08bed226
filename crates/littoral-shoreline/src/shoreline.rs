//! Shoreline chains stored in the node arena.

use indexmap::IndexMap;
use littoral_core::{CellPos, ChainId, NodeId, TopologyError};
use littoral_grid::{Grid, GridEdge};

use crate::arena::NodeArena;
use crate::node::{Node, NodeKind};

/// Head and shape of one chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Chain {
    /// First node: the start sentinel of an open chain, any interior node
    /// of a closed one.
    pub head: NodeId,
    /// Whether the chain is cyclic (a fully interior landmass).
    pub closed: bool,
}

/// Every shoreline chain on a grid, with their nodes.
#[derive(Clone, Debug, Default)]
pub struct Shoreline {
    arena: NodeArena,
    chains: IndexMap<ChainId, Chain>,
    next_chain: u32,
}

impl Shoreline {
    /// An empty shoreline.
    pub fn new() -> Self {
        Self::default()
    }

    /// The node arena.
    pub fn arena(&self) -> &NodeArena {
        &self.arena
    }

    /// The node behind `id`, if it is still live.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.arena.get(id)
    }

    /// Mutable access to the node behind `id`, if it is still live.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.arena.get_mut(id)
    }

    /// The node behind `id`.
    ///
    /// # Errors
    ///
    /// [`TopologyError::StaleNode`] if the handle no longer resolves.
    pub fn node(&self, id: NodeId) -> Result<&Node, TopologyError> {
        self.arena.get(id).ok_or(TopologyError::StaleNode { node: id })
    }

    /// Mutable access to the node behind `id`.
    pub fn node_mut(&mut self, id: NodeId) -> Result<&mut Node, TopologyError> {
        self.arena
            .get_mut(id)
            .ok_or(TopologyError::StaleNode { node: id })
    }

    /// Predecessor of `id`.
    pub fn prev(&self, id: NodeId) -> Option<NodeId> {
        self.arena.get(id).and_then(|n| n.prev)
    }

    /// Successor of `id`.
    pub fn next(&self, id: NodeId) -> Option<NodeId> {
        self.arena.get(id).and_then(|n| n.next)
    }

    /// Grid position of an interior node.
    pub fn position(&self, id: NodeId) -> Option<CellPos> {
        self.arena.get(id).and_then(Node::pos)
    }

    /// Whether `id` is a live boundary sentinel.
    pub fn is_boundary(&self, id: NodeId) -> bool {
        self.arena.get(id).is_some_and(Node::is_boundary)
    }

    /// Number of chains.
    pub fn chain_count(&self) -> usize {
        self.chains.len()
    }

    /// Number of live nodes, sentinels included.
    pub fn node_count(&self) -> usize {
        self.arena.len()
    }

    /// Chain ids in discovery order.
    pub fn chain_ids(&self) -> Vec<ChainId> {
        self.chains.keys().copied().collect()
    }

    /// Head and shape of chain `id`.
    pub fn chain(&self, id: ChainId) -> Option<Chain> {
        self.chains.get(&id).copied()
    }

    /// Whether `chain` is cyclic. Unknown chains are not.
    pub fn is_closed(&self, chain: ChainId) -> bool {
        self.chains.get(&chain).is_some_and(|c| c.closed)
    }

    /// Nodes of `chain` in link order from its head.
    ///
    /// Bounded by the arena size, so a corrupted cycle cannot loop forever.
    pub fn nodes(&self, chain: ChainId) -> Vec<NodeId> {
        let Some(c) = self.chains.get(&chain) else {
            return Vec::new();
        };
        let mut out = Vec::new();
        let mut cursor = Some(c.head);
        while let Some(id) = cursor {
            if out.len() > self.arena.len() || (!out.is_empty() && id == c.head) {
                break;
            }
            if !self.arena.contains(id) {
                break;
            }
            out.push(id);
            cursor = self.next(id);
        }
        out
    }

    /// Interior nodes of every chain, chains in discovery order.
    pub fn interior_nodes(&self) -> Vec<NodeId> {
        self.chains
            .keys()
            .flat_map(|&c| self.nodes(c))
            .filter(|&id| !self.is_boundary(id))
            .collect()
    }

    /// Drop every chain and clear the grid's enrolment links.
    pub fn clear(&mut self, grid: &mut Grid) {
        self.arena.clear();
        self.chains.clear();
        grid.clear_nodes();
    }

    /// Store a new unlinked node, enrolling interior nodes on the grid.
    pub(crate) fn alloc(&mut self, grid: &mut Grid, node: Node) -> Result<NodeId, TopologyError> {
        let pos = node.pos();
        let id = self.arena.insert(node)?;
        if let Some(pos) = pos {
            grid.set_node(pos, Some(id));
        }
        Ok(id)
    }

    /// Free a node's slot and its grid enrolment. Links are left to the caller.
    pub(crate) fn free(&mut self, grid: &mut Grid, id: NodeId) -> Option<Node> {
        let node = self.arena.remove(id)?;
        if let Some(pos) = node.pos() {
            if grid.node_at(pos) == Some(id) {
                grid.set_node(pos, None);
            }
        }
        Some(node)
    }

    /// Link `a → b`.
    pub(crate) fn link(&mut self, a: NodeId, b: NodeId) -> Result<(), TopologyError> {
        self.node_mut(a)?.next = Some(b);
        self.node_mut(b)?.prev = Some(a);
        Ok(())
    }

    /// Register a chain with `head`.
    pub(crate) fn add_chain(&mut self, head: NodeId, closed: bool) -> Result<ChainId, TopologyError> {
        self.chains
            .try_reserve(1)
            .map_err(|_| TopologyError::Allocation {
                requested: self.chains.len() + 1,
            })?;
        let id = ChainId(self.next_chain);
        self.next_chain += 1;
        self.chains.insert(id, Chain { head, closed });
        Ok(id)
    }

    /// Reserve the next chain id without registering it yet.
    pub(crate) fn peek_chain_id(&self) -> ChainId {
        ChainId(self.next_chain)
    }

    /// Build a chain from cells in link order, with sentinels on the given
    /// `(start, end)` edges for an open chain or none for a closed one.
    pub(crate) fn build_chain(
        &mut self,
        grid: &mut Grid,
        cells: impl IntoIterator<Item = CellPos>,
        ends: Option<(GridEdge, GridEdge)>,
    ) -> Result<ChainId, TopologyError> {
        let chain = self.peek_chain_id();
        let mut ids = Vec::new();
        if let Some((start, _)) = ends {
            ids.push(self.alloc(grid, Node::boundary(start, chain))?);
        }
        for pos in cells {
            ids.push(self.alloc(grid, Node::interior(pos, chain))?);
        }
        if let Some((_, end)) = ends {
            ids.push(self.alloc(grid, Node::boundary(end, chain))?);
        }
        for pair in ids.windows(2) {
            self.link(pair[0], pair[1])?;
        }
        let (Some(&head), Some(&tail)) = (ids.first(), ids.last()) else {
            return Err(TopologyError::InvalidGrid {
                start: CellPos::new(0, 0),
                reason: "closed chain with no cells".into(),
            });
        };
        if ends.is_none() {
            self.link(tail, head)?;
        }
        self.add_chain(head, ends.is_none())
    }

    /// Splice `id` out of its chain, joining its neighbours, and free it.
    ///
    /// Keeps the chain head valid; removes the chain when its last node
    /// goes.
    pub fn unlink(&mut self, grid: &mut Grid, id: NodeId) -> Result<(), TopologyError> {
        let node = self.node(id)?;
        let (prev, next, chain) = (node.prev, node.next, node.chain);
        match (prev, next) {
            (Some(p), Some(n)) if p != id => self.link(p, n)?,
            _ => {}
        }
        self.free(grid, id);
        let successor = next.filter(|&n| n != id && self.arena.contains(n));
        if let Some(c) = self.chains.get_mut(&chain) {
            if c.head == id {
                match successor {
                    Some(n) => c.head = n,
                    None => {
                        self.chains.shift_remove(&chain);
                    }
                }
            }
        }
        Ok(())
    }

    /// Free every node of `chain` from `first` up to, not including, `stop`.
    pub(crate) fn free_run(
        &mut self,
        grid: &mut Grid,
        first: NodeId,
        stop: NodeId,
    ) -> Result<(), TopologyError> {
        let mut cursor = first;
        let mut guard = self.arena.len();
        while cursor != stop {
            let next = self.node(cursor)?.next.ok_or(TopologyError::Inconsistent {
                node: cursor,
                reason: "run ends before reaching its stop node".into(),
            })?;
            self.free(grid, cursor);
            cursor = next;
            guard = guard.checked_sub(1).ok_or(TopologyError::Inconsistent {
                node: first,
                reason: "run does not reach its stop node".into(),
            })?;
        }
        Ok(())
    }

    /// Walk forward from `id` to the chain's end sentinel.
    pub(crate) fn end_sentinel(&self, id: NodeId) -> Option<NodeId> {
        let mut cursor = id;
        for _ in 0..=self.arena.len() {
            let node = self.arena.get(cursor)?;
            if node.is_boundary() && node.next.is_none() {
                return Some(cursor);
            }
            cursor = node.next?;
        }
        None
    }

    /// Number of nodes in `chain`.
    pub fn chain_len(&self, chain: ChainId) -> usize {
        self.nodes(chain).len()
    }

    /// Check every chain's invariants against the grid.
    ///
    /// # Errors
    ///
    /// [`TopologyError::Inconsistent`] naming the first offending node.
    pub fn validate(&self, grid: &Grid) -> Result<(), TopologyError> {
        let fail = |node: NodeId, reason: &str| TopologyError::Inconsistent {
            node,
            reason: reason.to_string(),
        };
        let mut seen = 0;
        for (&chain_id, chain) in &self.chains {
            let head = self.node(chain.head)?;
            let ids = self.nodes(chain_id);
            seen += ids.len();
            let mut sentinels = 0;
            for &id in &ids {
                let node = self.node(id)?;
                if node.chain != chain_id {
                    return Err(fail(id, "node is filed under another chain"));
                }
                if let Some(n) = node.next {
                    if self.prev(n) != Some(id) {
                        return Err(fail(id, "successor does not link back"));
                    }
                }
                match node.kind {
                    NodeKind::Interior { pos } => {
                        if node.prev.is_none() || node.next.is_none() {
                            return Err(fail(id, "interior node with a missing link"));
                        }
                        if !grid.is_land(pos) {
                            return Err(fail(id, "enrolled cell holds no land"));
                        }
                        if grid.node_at(pos) != Some(id) {
                            return Err(fail(id, "cell is not enrolled to this node"));
                        }
                    }
                    NodeKind::Boundary { .. } => sentinels += 1,
                }
            }
            if chain.closed {
                if sentinels != 0 {
                    return Err(fail(chain.head, "closed chain holds a sentinel"));
                }
                let last = ids[ids.len() - 1];
                if self.next(last) != Some(chain.head) {
                    return Err(fail(last, "closed chain does not return to its head"));
                }
            } else {
                let last = self.node(ids[ids.len() - 1])?;
                if sentinels != 2 || !head.is_boundary() || !last.is_boundary() {
                    return Err(fail(chain.head, "open chain must end in two sentinels"));
                }
            }
        }
        if seen != self.arena.len() {
            let orphan = self
                .arena
                .ids()
                .find(|&id| {
                    self.get(id)
                        .is_none_or(|n| !self.nodes(n.chain).contains(&id))
                })
                .unwrap_or(NodeId::new(0, 0));
            return Err(fail(orphan, "live node reachable from no chain"));
        }
        Ok(())
    }
}
