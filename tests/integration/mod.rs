//! Integration tests for the viewlet manager

mod definitions;
mod region_rendering;
mod single_lookup;
