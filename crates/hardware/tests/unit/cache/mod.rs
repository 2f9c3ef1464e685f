//! Cache model tests.
