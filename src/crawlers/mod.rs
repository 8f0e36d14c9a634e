pub mod frontier;
pub mod web;
