//! Client for the Brayns rendering service.
//!
//! The service renders scenes remotely and is driven through JSON-RPC 2.0 over a WebSocket. This
//! crate provides:
//!
//! - a [`Connector`] opening an [`Instance`] (async) or a [`BlockingInstance`] (sync facade)
//! - raw requests ([`Instance::request`]) and trackable tasks ([`Instance::task`]) with progress
//! - typed wrappers over the service API: [`camera`], [`light`], [`material`], [`geometry`],
//!   [`model`], [`render`], [`simulation`], [`application`], [`version`], [`entrypoint`]
//! - a [`Service`] launcher for the native executable
//!
//! ```no_run
//! # async fn run() -> brayns::BraynsResult<()> {
//! let instance = brayns::Connector::new("localhost:5000").connect().await?;
//! let version = brayns::check_version(&instance).await?;
//! let scene = brayns::model::get_scene(&instance).await?;
//! println!("service {} with {} models", version.tag(), scene.models.len());
//! instance.disconnect().await
//! # }
//! ```
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// Application parameters and shutdown.
pub mod application;
/// Camera view and projections.
pub mod camera;
/// Method introspection.
pub mod entrypoint;
/// Primitive geometries and clipping.
pub mod geometry;
/// Scene lights.
pub mod light;
/// Model materials.
pub mod material;
/// Models, scene, color ramps and loaders.
pub mod model;
pub mod network;
/// Renderers, snapshots, images and frame export.
pub mod render;
pub(crate) mod service;
/// Simulation timeline.
pub mod simulation;
/// Service version.
pub mod version;

#[cfg(test)]
#[path = "../tests/unit/mock.rs"]
pub(crate) mod mock;

pub use crate::foundation::color::{Color3, Color4};
pub use crate::foundation::core::{Axis, Bounds, ImageFormat, Resolution, Vector3};
pub use crate::foundation::error::{BraynsError, BraynsResult};
pub use crate::foundation::rotation::Rotation;
pub use crate::foundation::transform::Transform;

pub use crate::network::blocking::BlockingInstance;
pub use crate::network::connector::Connector;
pub use crate::network::future::JsonRpcFuture;
pub use crate::network::instance::Instance;
pub use crate::network::message::{
    JsonRpcError, JsonRpcId, JsonRpcMessage, JsonRpcProgress, JsonRpcReply, JsonRpcRequest,
};

pub use crate::camera::{Camera, View};
pub use crate::model::{Model, Scene};
pub use crate::render::{FrameExporter, Image, ImageInfo, KeyFrame, Snapshot};
pub use crate::service::{LogLevel, Manager, Plugin, Process, Service, SslServerContext, start};
pub use crate::version::{Version, check_version, get_version};
