//! End-to-end tests for the scanner client against an in-process mock scanner.
#![cfg(test)]

mod client;
mod support;
