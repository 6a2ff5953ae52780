// Service module exports

pub mod countdown;
pub mod progress_ring; // Pure renderer plus egui painter adapter
