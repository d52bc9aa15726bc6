pub mod simulator;

pub use simulator::DispatchSimulator;
