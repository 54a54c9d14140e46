//! Issue Graph - discover and render the dependency graph of Jira issues.
//!
//! This crate provides both a CLI application and a library. The library
//! walks sub-tasks, epic children and typed issue links from one or more
//! root issues and produces a Graphviz description of what it finds.

#![forbid(unsafe_code)]

// Public modules for library usage
pub mod config;
pub mod domain;
pub mod error;
pub mod fetcher;
pub mod graph;
pub mod output;

// Public CLI module (needed by binary)
pub mod cli;
