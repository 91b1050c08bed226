//! Shoreline nodes.

use littoral_core::{CellPos, ChainId, FlowDirection, NodeId, Timestep, TransportDir};
use littoral_grid::GridEdge;

/// A value cached for the timestep it was computed in.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Cached<T> {
    value: T,
    at: Option<Timestep>,
}

impl<T: Copy> Cached<T> {
    /// The cached value, if it was stored during `now`.
    pub fn get(&self, now: Timestep) -> Option<T> {
        (self.at == Some(now)).then_some(self.value)
    }

    /// Store `value` for timestep `now`.
    pub fn set(&mut self, now: Timestep, value: T) {
        self.value = value;
        self.at = Some(now);
    }
}

/// What a node stands for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeKind {
    /// A real grid cell bordering open water.
    Interior {
        /// Grid position of the cell.
        pos: CellPos,
    },
    /// Synthetic end of an open chain where it leaves the grid.
    ///
    /// Only the edge is stored; the coordinate along the edge is derived
    /// from the sole real neighbour, see
    /// [`node_position`](crate::geometry::node_position).
    Boundary {
        /// Edge the chain leaves through.
        edge: GridEdge,
    },
}

/// Per-node transport state and timestep-tagged geometry caches.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct NodeProps {
    /// Volume the node's wave conditions can move across its downstream
    /// boundary this step (m³), before and then after supply clipping.
    pub transport_potential: f64,
    /// Volume in minus volume out this step (m³).
    pub net_volume_change: f64,
    /// Depth of closure used to convert volume to occupancy (m).
    pub closure_depth: f64,
    /// Direction of the flux across the downstream boundary.
    pub transport_dir: TransportDir,
    /// Net flow classification from the predecessor's and own direction.
    pub flow_direction: FlowDirection,
    /// Cached angle from the predecessor.
    pub prev_angle: Cached<f64>,
    /// Cached angle to the successor.
    pub next_angle: Cached<f64>,
    /// Cached mean of the two.
    pub surrounding_angle: Cached<f64>,
    /// Cached shadow flag.
    pub shadow: Cached<bool>,
}

impl NodeProps {
    /// Zero the per-step transport fields, keeping the caches.
    pub fn reset_transport(&mut self) {
        self.transport_potential = 0.0;
        self.net_volume_change = 0.0;
        self.transport_dir = TransportDir::None;
        self.flow_direction = FlowDirection::None;
    }

    /// Drop every cached geometry value.
    pub fn clear_geometry(&mut self) {
        self.prev_angle = Cached::default();
        self.next_angle = Cached::default();
        self.surrounding_angle = Cached::default();
        self.shadow = Cached::default();
    }
}

/// One entry of a shoreline chain.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    /// Interior cell or boundary sentinel.
    pub kind: NodeKind,
    /// Upstream neighbour. `None` only on a start sentinel.
    pub prev: Option<NodeId>,
    /// Downstream neighbour. `None` only on an end sentinel.
    pub next: Option<NodeId>,
    /// Chain this node belongs to.
    pub chain: ChainId,
    /// Transport state and caches.
    pub props: NodeProps,
}

impl Node {
    /// An unlinked interior node at `pos`.
    pub fn interior(pos: CellPos, chain: ChainId) -> Self {
        Self::with_kind(NodeKind::Interior { pos }, chain)
    }

    /// An unlinked boundary sentinel on `edge`.
    pub fn boundary(edge: GridEdge, chain: ChainId) -> Self {
        Self::with_kind(NodeKind::Boundary { edge }, chain)
    }

    fn with_kind(kind: NodeKind, chain: ChainId) -> Self {
        Self {
            kind,
            prev: None,
            next: None,
            chain,
            props: NodeProps::default(),
        }
    }

    /// Grid position of an interior node.
    pub fn pos(&self) -> Option<CellPos> {
        match self.kind {
            NodeKind::Interior { pos } => Some(pos),
            NodeKind::Boundary { .. } => None,
        }
    }

    /// Whether this is a boundary sentinel.
    pub fn is_boundary(&self) -> bool {
        matches!(self.kind, NodeKind::Boundary { .. })
    }
}
