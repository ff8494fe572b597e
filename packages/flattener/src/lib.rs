//! XML Flatten - Turn arbitrary XML into flat, path-keyed fields.
//!
//! Every attribute and leaf text node of an XML document becomes one
//! key/value pair. Keys join ancestor element names with `-`, number
//! repeated tags from their second occurrence, and name attributes with `@`.
//!
//! # Example
//!
//! ```
//! use xml_flatten::flatten::{flatten_str, Flattener};
//!
//! let xml = r#"<event time="t" uid="u">v</event>"#;
//! let pairs = flatten_str(xml, &Flattener::default()).unwrap();
//! assert!(pairs.contains(&("event@time".to_string(), "t".to_string())));
//! assert!(pairs.contains(&("event".to_string(), "v".to_string())));
//! ```
//!
//! # Architecture
//!
//! - [`config`]: Processor configuration and validation
//! - [`error`]: Error types and Result alias
//! - [`xml`]: Node model and the `roxmltree` adapter
//! - [`flatten`]: Key building, occurrence counting, exclusion and the tree walk
//! - [`document`]: Field sinks, including a JSON-backed ingest document
//! - [`processor`]: Ingest processor tying configuration, parsing and flattening together
//! - [`cli`]: Command-line interface

pub mod cli;
pub mod config;
pub mod document;
pub mod error;
pub mod flatten;
pub mod processor;
pub mod xml;

// Re-export commonly used items
pub use config::ProcessorConfig;
pub use document::{FieldSink, IngestDocument, OrderedFields};
pub use error::{FlattenError, Result};
pub use flatten::{flatten_str, ExclusionFilter, Flattener, KeyStyle};
pub use processor::XmlProcessor;
