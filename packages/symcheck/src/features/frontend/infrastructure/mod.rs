//! Fixture Front-end - Infrastructure

pub mod c_fixture;

pub use c_fixture::CFixtureParser;
