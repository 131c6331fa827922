mod tracking;

pub use tracking::*;
