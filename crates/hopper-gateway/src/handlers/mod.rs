mod health;
mod url;

pub use health::health_handler;
pub use url::{home_handler, redirect_handler, shorten_handler};
