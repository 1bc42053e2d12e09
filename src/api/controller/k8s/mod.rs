pub mod cluster;
pub mod deployment;
pub mod pod;
