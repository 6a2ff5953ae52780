// Countdown Ring Library
// Countdown engine and circular progress ring renderer

pub mod models;
pub mod services;
