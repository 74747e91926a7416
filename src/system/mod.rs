pub mod assembler;
pub mod collector;
pub mod cpu;
pub mod disk;
pub mod fake;
pub mod gpu;
pub mod memory;
pub mod network;
pub mod os;
pub mod platform;
pub mod snapshot;
pub mod source;
