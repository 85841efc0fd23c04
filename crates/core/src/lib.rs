//! Domain logic for the room analysis service.
//!
//! Everything here is pure: the normalizer turns model text into a validated
//! [`analysis::RoomAnalysis`], and the catalog/recommendation modules map
//! inferred categories onto the bundled product list.

pub mod analysis;
pub mod catalog;
pub mod error;
pub mod normalizer;
pub mod recommend;
