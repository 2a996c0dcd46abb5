pub mod controller;
pub mod input;
pub mod result;
pub mod round;
pub mod timer;
