// ============================================================================
// COSMIC ENGINE - Procedural ambient background for the portfolio site
// ============================================================================
//
// Layers, back to front:
//   nebula         radial clouds on a canvas, repainted on resize
//   celestial      slow-spinning gradient discs      (tween + parallax)
//   stars          blinking points                   (tween + parallax)
//   dust           drifting coloured motes           (tween)
//   shooting stars periodic streaks                  (tween)
//   glow           central pulsating disc            (tween)
//   constellation  drifting points linked by proximity, own frame loop
//
// Everything here is platform independent except `web`, which binds it to
// the DOM when built for wasm32.

pub mod card;
pub mod config;
pub mod contact;
pub mod error;
pub mod field;
pub mod lifecycle;
pub mod parallax;
pub mod render;
pub mod scene;
pub mod sim;
pub mod timeline;
pub mod tween;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use config::{EngineConfig, Span};
pub use error::{ConfigError, EngineError, Result};
