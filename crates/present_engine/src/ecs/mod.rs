//! Entity-Component-System implementation
//!
//! The world owns entities, their transforms and components. Systems mutate it
//! once per frame in the order fixed by the [`FrameScheduler`].

pub mod component;
pub mod components;
pub mod entity;
pub mod scheduler;
pub mod systems;
pub mod world;

pub use component::Component;
pub use entity::Entity;
pub use scheduler::{FramePhase, FrameReport, FrameScheduler};
pub use systems::System;
pub use world::World;
