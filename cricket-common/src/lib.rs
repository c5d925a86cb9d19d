pub mod bundles;

pub mod config;

pub mod match_snapshot;

pub mod side;
