pub mod board;
pub mod filter;
pub mod model;
pub mod present;
pub mod remote;
pub mod store;
pub mod sync;
pub mod watch;
