//! Turns terraform instance addresses into per-node raft configs and a
//! script that ships them to the hosts.

pub mod base;
pub mod core;
