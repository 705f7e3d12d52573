//! Mass-spring cloth simulation with Verlet integration.
//!
//! `drape` simulates a rectangular cloth as a grid of point masses joined by
//! structural, shear, and bending springs. Each step accumulates gravity,
//! drag, wind, and spring forces, advances particles with position Verlet,
//! then relaxes spring lengths back into a band around their rest length.
//! Sphere and self collisions are separate passes the host schedules.
//!
//! # Features
//!
//! - **Position Verlet**: velocity is recovered from position history, never integrated
//! - **Length-band solver**: iterative clamping keeps stiff cloth from exploding
//! - **Pinning**: anchored particles are never moved by the simulation
//! - **Collisions**: static sphere projection and an O(n²) marble self-collision pass
//! - **Observable**: Monitor physics steps via the `StepObserver` trait
//! - **`no_std` compatible**: Works in embedded and WASM environments
//!
//! Diagnostics are emitted through the `log` facade.

#![no_std]

extern crate alloc;

pub mod float;
pub mod vec;
pub mod particle;
pub mod spring;
pub mod grid;
pub mod forces;
pub mod integrator;
pub mod solver;
pub mod collision;
pub mod cloth;
pub mod observer;
pub mod config;
pub mod error;

// Re-export primary API
pub use float::Float;
pub use vec::Vec3;
pub use particle::Particle;
pub use spring::{Spring, SpringKind};
pub use grid::GridLayout;
pub use collision::Sphere;
pub use cloth::Cloth;
pub use config::{ClothConfig, Wind};
pub use observer::{StepObserver, NoOpStepObserver};
pub use error::ClothError;
