//! End-to-end tests that drive the HTTP router in-process.

mod helpers;

mod document_test;
mod graphql_test;
