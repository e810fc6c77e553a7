pub mod aggregate;
pub mod dashboard;
pub mod entities;
pub mod graph;
pub mod health;
