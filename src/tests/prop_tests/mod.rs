mod generator;
use generator::*;

use proptest::prelude::*;

use crate::{dispatcher_ops::DispatchResult, types::input::Input};

pub mod state_evolution;

pub mod strategies;

const CASES: u32 = 256;
