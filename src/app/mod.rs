//! Process lifecycle helpers used by the server and the monitor.

pub mod shutdown;

pub use shutdown::wait_for_shutdown_signal;
