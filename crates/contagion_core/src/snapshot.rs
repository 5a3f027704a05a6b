use contagion_data::{HealthState, PopulationStats};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct AgentSnapshot {
    pub x: i64,
    pub y: i64,
    pub health: HealthState,
}

/// What the presentation layer gets to see after a tick.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct PopulationSnapshot {
    pub tick: u64,
    pub stats: PopulationStats,
    pub agents: Vec<AgentSnapshot>,
}

impl PopulationSnapshot {
    /// Agents whose cell lies inside `[x0, x0 + width) × [y0, y0 + height)`.
    pub fn visible(
        &self,
        x0: i64,
        y0: i64,
        width: i64,
        height: i64,
    ) -> impl Iterator<Item = &AgentSnapshot> {
        self.agents.iter().filter(move |a| {
            a.x >= x0 && a.x < x0 + width && a.y >= y0 && a.y < y0 + height
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snap(points: &[(i64, i64)]) -> PopulationSnapshot {
        PopulationSnapshot {
            tick: 0,
            stats: PopulationStats::default(),
            agents: points
                .iter()
                .map(|&(x, y)| AgentSnapshot {
                    x,
                    y,
                    health: HealthState::Susceptible,
                })
                .collect(),
        }
    }

    #[test]
    fn test_visible_window() {
        let s = snap(&[(0, 0), (9, 9), (10, 0), (-1, 5), (5, 10)]);
        let seen: Vec<_> = s.visible(0, 0, 10, 10).map(|a| (a.x, a.y)).collect();
        assert_eq!(seen, vec![(0, 0), (9, 9)]);
    }
}
