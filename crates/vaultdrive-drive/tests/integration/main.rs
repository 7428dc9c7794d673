//! Integration tests for the Google Drive adapter
//!
//! All tests run against a wiremock-based mock of the Drive v3 API;
//! no real network access is required.

mod common;
mod test_store;
