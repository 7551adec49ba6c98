// Library exports for the contour-snake decision engine
// The server binary, the replay tool, and the integration tests all share these modules

pub mod bot;
pub mod config;
pub mod debug_logger;
pub mod distance;
pub mod grid;
pub mod path_search;
pub mod replay;
pub mod selector;
pub mod space;
pub mod types;
pub mod weights;
