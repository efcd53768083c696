//! Unit tests that exercise several core modules together.

mod controller_tests;
