/// Memory controller thread.
pub mod controller;


/// Cache-fronted memory without a controller.
pub mod memory;
