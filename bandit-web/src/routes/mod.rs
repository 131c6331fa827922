pub(crate) mod dashboard;
pub(crate) mod error;
pub(crate) mod tasks;
pub(crate) mod timer;
mod view;

pub(crate) use error::PageError;
