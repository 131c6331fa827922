mod bandit_backend;
#[cfg(test)]
mod mock;

pub use bandit_backend::*;
#[cfg(test)]
pub use mock::*;
