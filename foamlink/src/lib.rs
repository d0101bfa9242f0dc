//! Library half of the `foamlink` binary, split out so the build pipeline can
//! be driven from integration tests.
pub mod cli;
pub mod utils;
