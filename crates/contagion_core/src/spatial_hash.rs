use contagion_data::{Agent, Position};

#[derive(Clone, Default, Debug)]
/// Groups agent indices by the exact grid cell they occupy.
///
/// Rebuilt once per tick after movement. Because the grid is unbounded the
/// index cannot be a dense array of cells; instead agent indices are sorted
/// by `(cell, index)` and every agent records the run of the sorted list that
/// holds its cell.
///
/// # Performance Characteristics
/// - Construction: O(n log n)
/// - Cell-mates of an agent: O(1) lookup, O(cell population) iteration
///
/// # Implementation Notes
/// - Uses the "offset array" pattern (like compressed sparse rows)
/// - `entity_indices[runs[i].0..runs[i].1]` are the agents sharing agent
///   `i`'s cell, including `i` itself, in ascending index order
/// - Buffers are reused between builds
///
/// # Examples
/// ```
/// use contagion_core::spatial_hash::CellIndex;
/// use contagion_data::Agent;
///
/// let agents = vec![Agent::newborn(3, 3), Agent::newborn(8, 1), Agent::newborn(3, 3)];
/// let mut index = CellIndex::new();
/// index.build(&agents);
///
/// assert_eq!(index.cell_mates(0), &[0, 2]);
/// assert_eq!(index.occupied_cells(), 2);
/// ```
pub struct CellIndex {
    pub entity_indices: Vec<usize>,
    pub runs: Vec<(usize, usize)>,
    sorted: Vec<(Position, usize)>,
    occupied: usize,
}

impl CellIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Indexes the current positions of `agents`.
    pub fn build(&mut self, agents: &[Agent]) {
        self.sorted.clear();
        self.sorted
            .extend(agents.iter().enumerate().map(|(i, a)| (a.position, i)));
        // Keys are unique because of the index, so an unstable sort is
        // still deterministic.
        self.sorted.sort_unstable();

        self.entity_indices.clear();
        self.entity_indices
            .extend(self.sorted.iter().map(|&(_, idx)| idx));

        self.runs.clear();
        self.runs.resize(agents.len(), (0, 0));
        self.occupied = 0;

        let mut start = 0;
        while start < self.sorted.len() {
            let cell = self.sorted[start].0;
            let mut end = start + 1;
            while end < self.sorted.len() && self.sorted[end].0 == cell {
                end += 1;
            }
            for &(_, idx) in &self.sorted[start..end] {
                self.runs[idx] = (start, end);
            }
            self.occupied += 1;
            start = end;
        }
    }

    /// Agents in the same cell as `agent_idx`, itself included, in ascending
    /// index order.
    #[inline]
    pub fn cell_mates(&self, agent_idx: usize) -> &[usize] {
        match self.runs.get(agent_idx) {
            Some(&(start, end)) => &self.entity_indices[start..end],
            None => &[],
        }
    }

    /// Number of distinct cells holding at least one agent.
    pub fn occupied_cells(&self) -> usize {
        self.occupied
    }

    pub fn len(&self) -> usize {
        self.entity_indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entity_indices.is_empty()
    }
}
