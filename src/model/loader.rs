use crate::foundation::core::Vector3;
use crate::foundation::error::{BraynsError, BraynsResult};
use crate::model::Model;
use crate::network::instance::Instance;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::path::Path;

/// Loader registered in the service.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LoaderInfo {
    /// Loader name.
    pub name: String,
    /// Supported file extensions.
    #[serde(default)]
    pub extensions: Vec<String>,
    /// JSON schema of the loader properties.
    #[serde(default)]
    pub input_parameters_schema: Value,
}

/// Every loader registered in the service.
pub async fn get_loaders(instance: &Instance) -> BraynsResult<Vec<LoaderInfo>> {
    instance.request_as("get-loaders", &Value::Null).await
}

/// Loader selection and properties for [`load`] and [`upload`].
pub trait Loader {
    /// Loader name in the service.
    fn name(&self) -> &str;

    /// Loader-specific properties.
    fn properties(&self) -> Value;
}

/// Load `path` (a path on the service host) with `loader`.
#[tracing::instrument(skip(instance, loader), fields(loader = loader.name()))]
pub async fn load(
    instance: &Instance,
    path: impl AsRef<Path> + std::fmt::Debug,
    loader: &dyn Loader,
) -> BraynsResult<Vec<Model>> {
    let path = path.as_ref();
    let params = json!({
        "path": path.to_string_lossy(),
        "loader_name": loader.name(),
        "loader_properties": loader.properties(),
    });
    instance.request_as("add-model", &params).await
}

/// Send file content to the service and load it with `loader`.
///
/// `format` is the file extension the data would have on disk (`obj`, `mhd`, ...).
#[tracing::instrument(skip(instance, data, loader), fields(loader = loader.name(), bytes = data.len()))]
pub async fn upload(
    instance: &Instance,
    format: &str,
    data: Vec<u8>,
    loader: &dyn Loader,
) -> BraynsResult<Vec<Model>> {
    if data.is_empty() {
        return Err(BraynsError::validation("no data to upload"));
    }
    let params = json!({
        "type": format.trim_start_matches('.'),
        "loader_name": loader.name(),
        "loader_properties": loader.properties(),
    });
    let result = instance
        .request_with_binary("upload-model", params, data)
        .await?;
    serde_json::from_value(result)
        .map_err(|e| BraynsError::serde(format!("decode result of upload-model: {e}")))
}

/// Triangle meshes (OBJ, PLY, STL, OFF, ...).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MeshLoader;

impl MeshLoader {
    /// Common extensions handled by the mesh loader.
    pub const EXTENSIONS: [&'static str; 4] = ["obj", "ply", "stl", "off"];
}

impl Loader for MeshLoader {
    fn name(&self) -> &str {
        "mesh"
    }

    fn properties(&self) -> Value {
        json!({})
    }
}

/// MetaImage volumes (`.mhd` header with its raw data).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MhdVolumeLoader;

impl Loader for MhdVolumeLoader {
    fn name(&self) -> &str {
        "mhd-volume"
    }

    fn properties(&self) -> Value {
        json!({})
    }
}

/// Voxel type of a raw volume.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VolumeDataType {
    /// 8-bit unsigned.
    #[default]
    UnsignedChar,
    /// 16-bit signed.
    Short,
    /// 16-bit unsigned.
    UnsignedShort,
    /// 16-bit float.
    HalfFloat,
    /// 32-bit float.
    Float,
    /// 64-bit float.
    Double,
}

impl VolumeDataType {
    /// Bytes per voxel.
    pub fn size(self) -> usize {
        match self {
            Self::UnsignedChar => 1,
            Self::Short | Self::UnsignedShort | Self::HalfFloat => 2,
            Self::Float => 4,
            Self::Double => 8,
        }
    }
}

/// Headerless voxel grid.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct RawVolumeLoader {
    /// Voxel count along each axis.
    pub dimensions: [u32; 3],
    /// Voxel size.
    pub spacing: Vector3,
    /// Voxel type.
    pub data_type: VolumeDataType,
}

impl Default for RawVolumeLoader {
    fn default() -> Self {
        Self {
            dimensions: [1, 1, 1],
            spacing: Vector3::ONE,
            data_type: VolumeDataType::default(),
        }
    }
}

impl RawVolumeLoader {
    /// Expected size in bytes of the volume data.
    pub fn data_size(&self) -> usize {
        self.dimensions.iter().map(|&d| d as usize).product::<usize>() * self.data_type.size()
    }
}

impl Loader for RawVolumeLoader {
    fn name(&self) -> &str {
        "raw-volume"
    }

    fn properties(&self) -> Value {
        json!({
            "dimensions": self.dimensions,
            "spacing": self.spacing,
            "data_type": self.data_type,
        })
    }
}

/// Any loader, by name, with raw properties.
#[derive(Clone, Debug, PartialEq)]
pub struct GenericLoader {
    /// Loader name.
    pub name: String,
    /// Loader properties.
    pub properties: Value,
}

impl GenericLoader {
    /// Loader `name` with empty properties.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            properties: json!({}),
        }
    }
}

impl Loader for GenericLoader {
    fn name(&self) -> &str {
        &self.name
    }

    fn properties(&self) -> Value {
        self.properties.clone()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/loader.rs"]
mod tests;
