//! Tooling around the pmse storage engine for MongoDB.
//!
//! Two independent tools share this crate:
//!
//! - [`driver`] - runs the JavaScript test suite through `resmoke.py`, one
//!   test at a time with a timeout, and summarizes the outcomes
//! - [`suite`] - compiles a declarative YCSB suite definition into a results
//!   report and an executable `testplan.sh`

pub mod constants;
pub mod driver;
pub mod suite;
pub mod ui;
pub mod utils;
