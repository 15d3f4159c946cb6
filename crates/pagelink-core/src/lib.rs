pub mod config;
pub mod logging;

pub mod address;
pub mod render;
pub mod resolver;
pub mod token;
pub mod transport;
pub mod url_builder;
