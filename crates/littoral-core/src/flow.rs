//! Longshore transport directions.

/// Direction of the sediment flux across the boundary between a node and
/// its successor, as decided by the differencing scheme.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TransportDir {
    /// Flux runs from the node toward its successor.
    Right,
    /// Flux runs from the successor toward the node.
    Left,
    /// No transport was computed for this node.
    #[default]
    None,
}

impl TransportDir {
    /// Whether the flux runs toward the successor.
    pub fn is_right(self) -> bool {
        self == Self::Right
    }
}

/// Net flow classification of a node from its predecessor's and its own
/// transport direction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FlowDirection {
    /// Sediment enters from the predecessor and leaves toward the successor.
    Right,
    /// Sediment enters from the successor and leaves toward the predecessor.
    Left,
    /// Sediment enters from both sides.
    Convergent,
    /// Sediment leaves toward both sides.
    Divergent,
    /// Neither boundary carries transport.
    #[default]
    None,
}

impl FlowDirection {
    /// Classify a node given the transport direction across its upstream
    /// boundary (`prev`) and its downstream boundary (`own`).
    ///
    /// A missing direction on one side counts as `Left`; the flux across
    /// that side is zero, so the in/out bookkeeping stays consistent with
    /// the neighbour's view of the same boundary.
    pub fn classify(prev: TransportDir, own: TransportDir) -> Self {
        if prev == TransportDir::None && own == TransportDir::None {
            return Self::None;
        }
        match (prev.is_right(), own.is_right()) {
            (true, true) => Self::Right,
            (true, false) => Self::Convergent,
            (false, true) => Self::Divergent,
            (false, false) => Self::Left,
        }
    }
}
