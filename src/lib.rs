//! psl-gen - Public suffix list to C++ rule table generator.
//!
//! This crate compiles the [public suffix list](https://publicsuffix.org/list/)
//! into a static array of rule records inside a header template, for the eTLD
//! matcher that consumes it at build time.
//!
//! # Rule Lines
//!
//! - `com`, `co.uk`: plain rules
//! - `*.ck`: wildcard rule; the `*` stays as the first label
//! - `!www.ck`: exception rule; the `!` is stripped
//! - Blank lines and lines starting with `//` are skipped
//! - Text after the first space is ignored
//!
//! # Quick Start
//!
//! ```
//! use psl_gen::compile;
//!
//! let header = compile("com\n*.ck\n!www.ck", "rules = {contents};").unwrap();
//! assert!(header.starts_with("rules = {{false, false, {\"com\"}},\n"));
//! ```
//!
//! To read and write files, use [`Generator`] with a [`GenConfig`]:
//!
//! ```ignore
//! use psl_gen::{GenConfig, Generator};
//!
//! let report = Generator::new(GenConfig::in_dir("data")).run()?;
//! println!("{} rules -> {:?}", report.rules, report.output);
//! ```

mod error;

pub mod codegen;
pub mod config;
pub mod generator;
pub mod list;
pub mod rule;

// Re-export core types
pub use codegen::{
    compile, render_rules, serialize_rule, Compiler, MarkerPolicy, CONTENTS_MARKER,
};
pub use config::GenConfig;
pub use error::{Error, Result};
pub use generator::{write_atomic, CheckStatus, GenerateReport, Generator};
pub use list::{ParseSummary, RuleList};
pub use rule::{parse_line, SuffixRule};
