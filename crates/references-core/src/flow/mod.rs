pub mod controller;
pub mod hints;
