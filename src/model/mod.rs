pub use contagion_core::{AgentLogic, RandomSource};
pub mod config {
    pub use contagion_core::config::*;
}
pub mod engine {
    pub use contagion_core::engine::*;
}
pub mod lifecycle {
    pub use contagion_core::lifecycle::*;
}
pub mod population {
    pub use contagion_core::population::*;
}
pub mod setup {
    pub use contagion_core::setup::*;
}
pub mod snapshot {
    pub use contagion_core::snapshot::*;
}
pub mod spatial_hash {
    pub use contagion_core::spatial_hash::*;
}
pub mod history {
    pub use contagion_io::history::*;
}

pub mod state {
    pub use contagion_data::*;
}

pub mod world;
