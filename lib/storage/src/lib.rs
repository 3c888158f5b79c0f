pub mod codec;
pub mod persistence;
pub mod seed;
pub mod manager;

pub use codec::{decode, encode, DecodeStats, EDGE_SENTINEL};
pub use persistence::GraphFile;
pub use seed::seed_default_topology;
pub use manager::{GraphManager, ManagerConfig, DEFAULT_DATA_FILE};
