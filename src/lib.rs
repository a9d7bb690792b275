//! Calculates working hours from attendance exports.
//! Reads the "First In And Last Out" sheet, works out how long everyone stayed, sorts each day
//! into a work mode and writes a table and a chart with the results.
//!

pub mod attendance;
pub mod cli;
pub mod sheet;
pub mod utils;
