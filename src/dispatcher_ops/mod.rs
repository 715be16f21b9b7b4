mod types;

mod nondet;

pub use nondet::*;
pub use types::*;
