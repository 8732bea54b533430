pub mod bus;
pub mod types;

pub use bus::LeadBus;
pub use types::LeadSignal;
