//! Integration test suite

mod integration {
    mod api_tests;
}
