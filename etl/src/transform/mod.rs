//! Transformation module.
//!
//! Reshapes the wide source tables into tidy records:
//! - Frame: labelled category series over a period index
//! - Industry: GDP by industry (two workbooks, one per price basis)
//! - Regional: GDP by state (one CSV per region)
//! - Pipeline: build and write both datasets

pub mod frame;
pub mod industry;
pub mod pipeline;
pub mod regional;

pub use frame::Frame;
pub use industry::{
    build_industries, finalize_industries, frame_from_sheet, load_industry_source, reshape_industries,
};
pub use pipeline::*;
pub use regional::{
    build_regional, finalize_regional, frames_from_csv, load_region, reshape_region, RegionFrames,
};
