//! Shared test infrastructure for service integration tests.


pub(crate) use context::TestContext;
