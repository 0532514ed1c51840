//! Trellis Core Types and Rendering Primitives
//!
//! This crate provides the foundational pieces of the Trellis diagram
//! renderer. It includes:
//!
//! - **Colors**: CSS color parsing and the named [`color::Palette`]
//! - **Geometry**: Basic geometric types ([`geometry`] module)
//! - **Draw**: The raster [`draw::Canvas`], label layout, and the shape and
//!   connector renderers ([`draw`] module)

pub mod color;
pub mod draw;
pub mod geometry;
