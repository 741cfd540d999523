pub mod dispatch;
pub mod float;
pub mod golden;
pub mod hash;

pub use dispatch::dispatch;
