//! Core types and utilities for shape detection.
//!
//! This crate holds the data model shared by the whole pipeline: the owned
//! [`Frame`], the closed [`ShapeLabel`]/[`ColorLabel`] enumerations, the
//! per-frame [`CandidateRegion`] with its geometric descriptors, and the
//! plain polygon geometry those descriptors are computed from. It does
//! *not* depend on any concrete segmentation or classification strategy.

mod frame;
mod geometry;
mod labels;
mod logger;
mod region;

pub use frame::Frame;
pub use geometry::{min_enclosing_circle, perimeter, polygon_area, polygon_centroid, EnclosingCircle};
pub use labels::{ColorLabel, ShapeLabel};
pub use logger::init_with_level;
pub use region::CandidateRegion;
