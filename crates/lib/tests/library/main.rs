mod common;
mod journal_tests;
mod session_tests;
