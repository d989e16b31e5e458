pub mod challenge;
pub mod gate;
pub mod health;
