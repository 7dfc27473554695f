//! System module

mod system_info;

pub use system_info::SystemInfoClient;
