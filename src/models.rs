//! Public HVAC models.
//!
//! Models are the primary public interface of this crate.
//!
//! # Organization
//!
//! - [`thermal`]: heat exchanger coils and building envelope assemblies.
//! - [`vapor_compression`]: compressor, fan, and refrigeration cycle models.
//!
//! # Model structure
//!
//! Each non-trivial model lives in its own module and contains an internal
//! `core` submodule where the computation lives. The `core` module is an
//! implementation detail; its public items are re-exported by the model module.
//!
//! The [`twine_core::Model`] implementation is a thin adapter that delegates
//! to the model's core API. Operating conditions are always passed in as
//! values, so a single model instance can be reused for any number of solves.

pub mod thermal;
pub mod vapor_compression;
