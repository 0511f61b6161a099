mod monitor;
mod registry;

pub use monitor::start_monitor_job;
pub use registry::MonitorRegistry;
