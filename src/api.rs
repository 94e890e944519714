pub mod client;
pub mod octopus;
