mod common;
mod pages_tests;
mod replay_tests;
