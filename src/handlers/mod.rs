pub mod amateur_handler;
pub mod backend_health_handler;
pub mod prode_handler;
