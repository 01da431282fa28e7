//! Module tables of the standard bank, one file per body system.
//!
//! Each module lists its base questions in asking order followed by the
//! follow-ups that patterns pull in.

pub mod assimilation;
pub mod biotransformation;
pub mod communication;
pub mod defense_repair;
pub mod energy;
pub mod screening;
pub mod structural;
pub mod transport;

use crate::catalog::ModuleDefinition;

/// All modules in their default priority order.
pub fn all_modules() -> Vec<ModuleDefinition> {
    vec![
        screening::module(),
        assimilation::module(),
        defense_repair::module(),
        energy::module(),
        biotransformation::module(),
        transport::module(),
        communication::module(),
        structural::module(),
    ]
}
