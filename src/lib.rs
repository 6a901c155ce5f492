pub mod advisory;
pub mod cli;
pub mod config;
pub mod coord;
pub mod fetch;
pub mod launch;
pub mod locate;
pub mod map;
pub mod pipeline;
