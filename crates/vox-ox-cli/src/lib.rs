//! Terminal front end for the vox-ox text/audio bridge.

pub mod cli;
pub mod logging;
pub mod output;
pub mod repl;
