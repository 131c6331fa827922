mod daily;
mod duration;
mod event;
mod ids;
mod summary;
mod task;
mod user;

pub use daily::*;
pub use duration::*;
pub use event::*;
pub use ids::*;
pub use summary::*;
pub use task::*;
pub use user::*;
