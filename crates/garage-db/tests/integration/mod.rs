mod common;
mod vehicle_tests;
