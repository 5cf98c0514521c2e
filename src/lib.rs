//! Convert hand-entered athletics results into canonical measurements and
//! score them with combined-event (decathlon, heptathlon) points formulas.
//!
//! ```
//! use multi_event_points::{convert, score, EventKind, EventParameters, NegativeBasePolicy};
//!
//! let parsed = convert("10,83").unwrap();
//! let sprint = EventParameters {
//!     event: "100m".to_string(),
//!     a: 25.4347,
//!     b: 18.0,
//!     c: 1.81,
//!     kind: Some(EventKind::Track),
//! };
//! let m = parsed.measurement().unwrap();
//! assert_eq!(score(EventKind::Track, m.value, &sprint, NegativeBasePolicy::Reject), Ok(899));
//! ```

pub mod config;
pub mod error;
pub mod output;
pub mod result;
pub mod roster;
pub mod scoring;
pub mod telemetry;

pub use error::{EntryError, ParseError, ScoreError, TableError};
pub use result::{convert, Measurement, ParsedResult, Precision};
pub use scoring::{score, EventKind, EventParameters, NegativeBasePolicy, ParameterTable};
