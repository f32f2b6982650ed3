pub mod config;
pub mod frontend;
pub mod proxy;
mod server;
mod utils;

pub use config::Config;
pub use server::start_server;
