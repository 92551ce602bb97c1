pub mod command;
pub mod device;
pub mod device_state;
