//! Parse ROS message definitions and render their canonical text.
//!
//! Three dialects are supported: ROS 1 `.msg`, ROS 2 `.msg` and ROS 2 IDL.
//! Every dialect produces the same flat list of [`Definition`]s, root first,
//! which [`stringify`] renders as the canonical text used for type checksums.
//!
//! ```
//! use rosmsg::{ParseOptions, parse, stringify};
//!
//! let text = "Point[] points\n============\nMSG: geometry_msgs/Point\nfloat64 x\n";
//! let defs = parse(text, ParseOptions::new().with_dialect(rosmsg::Dialect::Ros2Msg)).unwrap();
//! assert_eq!(defs[0].fields[0].ty, "geometry_msgs/Point");
//! assert!(stringify(&defs).starts_with("geometry_msgs/Point[] points\n"));
//! ```

mod error;
mod loader;
mod options;
mod parse;

pub use error::LoaderError;
pub use loader::{DefinitionProvider, bundle_definitions};
pub use options::ParseOptions;
pub use parse::parse;
pub use rosmsg_core as core;
pub use rosmsg_core::{Definition, Dialect, Field, ParseError, Value, stringify};
#[cfg(feature = "idl")]
pub use rosmsg_idl as idl;
#[cfg(feature = "msg")]
pub use rosmsg_msg as msg;
