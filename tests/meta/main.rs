//! Repository layout checks for the test tree
