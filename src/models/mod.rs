// Module exports for models

pub mod countdown;
