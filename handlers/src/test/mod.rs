//! Unit test module
//!
//! Conversation state and logging handler tests live here, separate from source files.

mod conversation_test;
