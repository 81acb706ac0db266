//! Umbrella crate that re-exports the `snake-*` building blocks.
//!
//! Most users only need [`world`]: build a [`world::World`] (by hand or from a
//! [`world::WorldConfig`]), attach agents and call `simulate` once per tick.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

#[cfg(feature = "core")]
#[cfg_attr(docsrs, doc(cfg(feature = "core")))]
pub use snake_core as core;

#[cfg(feature = "grid")]
#[cfg_attr(docsrs, doc(cfg(feature = "grid")))]
pub use snake_grid as grid;

#[cfg(feature = "agent")]
#[cfg_attr(docsrs, doc(cfg(feature = "agent")))]
pub use snake_agent as agent;

#[cfg(feature = "tools")]
#[cfg_attr(docsrs, doc(cfg(feature = "tools")))]
pub use snake_tools as tools;

#[cfg(feature = "world")]
#[cfg_attr(docsrs, doc(cfg(feature = "world")))]
pub use snake_world as world;
