pub mod bikes;
pub mod config;
pub mod fetch;
pub mod output;
pub mod snapshot;
pub mod transport;
pub mod weather;
