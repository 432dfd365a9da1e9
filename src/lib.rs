//! SRS Assistant - guided requirements elicitation.
//!
//! Runs a scripted interview that collects software requirements stage by
//! stage, flags subjective wording and conflicting statements as they are
//! typed, and renders the result as an IEEE 830 style SRS document.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
