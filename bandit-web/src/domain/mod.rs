mod error;
pub mod ports;
mod session;
pub mod services;
mod timer;
mod views;

pub use error::*;
pub use session::*;
pub use timer::*;
pub use views::*;
