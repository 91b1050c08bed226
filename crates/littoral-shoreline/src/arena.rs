//! Generational slab holding every shoreline node.
//!
//! [`NodeArena`] owns nodes by value; chain links are [`NodeId`] handles
//! into it. Freed slots go on a free list and have their generation
//! bumped, so a handle to a removed node never resolves again even after
//! the slot is reused.

use littoral_core::{NodeId, TopologyError};

use crate::node::Node;

#[derive(Clone, Debug)]
struct Slot {
    generation: u32,
    node: Option<Node>,
}

/// Slab allocator for shoreline nodes.
#[derive(Clone, Debug, Default)]
pub struct NodeArena {
    slots: Vec<Slot>,
    /// Indices of empty slots available for reuse.
    free_list: Vec<u32>,
    live: usize,
}

impl NodeArena {
    /// Create an empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `node`, reusing a free slot when one exists.
    ///
    /// # Errors
    ///
    /// [`TopologyError::Allocation`] if the slot vector cannot grow.
    pub fn insert(&mut self, node: Node) -> Result<NodeId, TopologyError> {
        let id = if let Some(index) = self.free_list.pop() {
            let slot = &mut self.slots[index as usize];
            slot.node = Some(node);
            NodeId::new(index, slot.generation)
        } else {
            let index = u32::try_from(self.slots.len()).map_err(|_| TopologyError::Allocation {
                requested: self.slots.len() + 1,
            })?;
            self.slots
                .try_reserve(1)
                .map_err(|_| TopologyError::Allocation {
                    requested: self.slots.len() + 1,
                })?;
            self.slots.push(Slot {
                generation: 0,
                node: Some(node),
            });
            NodeId::new(index, 0)
        };
        self.live += 1;
        Ok(id)
    }

    /// The node behind `id`, or `None` if the handle is stale.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.slots
            .get(id.index as usize)
            .filter(|s| s.generation == id.generation)
            .and_then(|s| s.node.as_ref())
    }

    /// Mutable access to the node behind `id`.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|s| s.generation == id.generation)
            .and_then(|s| s.node.as_mut())
    }

    /// Whether `id` resolves to a live node.
    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    /// Free the slot behind `id` and return its node.
    pub fn remove(&mut self, id: NodeId) -> Option<Node> {
        let slot = self
            .slots
            .get_mut(id.index as usize)
            .filter(|s| s.generation == id.generation)?;
        let node = slot.node.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free_list.push(id.index);
        self.live -= 1;
        Some(node)
    }

    /// Free every live slot.
    pub fn clear(&mut self) {
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if slot.node.take().is_some() {
                slot.generation = slot.generation.wrapping_add(1);
                self.free_list.push(index as u32);
            }
        }
        self.live = 0;
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.live
    }

    /// Whether no node is live.
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Handles of all live nodes, in slot order.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.slots.iter().enumerate().filter_map(|(i, s)| {
            s.node
                .as_ref()
                .map(|_| NodeId::new(i as u32, s.generation))
        })
    }
}
