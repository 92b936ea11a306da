//! FRA Atlas - interactive map engine for Forest Rights Act monitoring
//!
//! The engine keeps a registry of togglable map overlays grouped by
//! category, colour-codes village features by saturation and similar
//! metrics, tracks a single selected feature for its detail popup and drives
//! a map surface through a small adapter trait.
//!
//! Everything runs on the caller's thread: messages are applied
//! synchronously and observers are told about effective changes over
//! channels returned by [`AtlasSession::subscribe`].

pub mod canvas;
pub mod catalogue;
pub mod color_utils;
pub mod config;
pub mod constants;
pub mod error;
pub mod events;
pub mod grouping;
pub mod message;
pub mod model;
pub mod panel;
pub mod registry;
pub mod selection;
pub mod session;
pub mod snapshot;
pub mod styler;

pub use canvas::{MapCanvas, MapSurface, RecordingSurface, RegionFilter, SvgSurface};
pub use config::AtlasConfig;
pub use error::{AtlasError, AtlasResult, SurfaceError};
pub use events::AtlasEvent;
pub use message::Message;
pub use model::{BaseMap, Feature, FeatureId, GeoPoint, Layer, LayerCategory, LayerId, Viewport};
pub use registry::LayerRegistry;
pub use session::AtlasSession;
pub use styler::{MetricKind, StyleRules, ThresholdBands, style_for};
