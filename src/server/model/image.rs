use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::server::collaborator::storage::UploadedAsset;

/// Location and size of an uploaded image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub path: String,
    pub width: i32,
    pub height: i32,
}

impl Image {
    /// Rebuilds an image from its nullable columns; `None` unless the path is set.
    pub fn from_columns(path: Option<String>, width: Option<i32>, height: Option<i32>) -> Option<Self> {
        path.map(|path| Self {
            path,
            width: width.unwrap_or_default(),
            height: height.unwrap_or_default(),
        })
    }

    /// Splits an optional image back into `(path, width, height)` columns.
    pub fn into_columns(image: Option<Image>) -> (Option<String>, Option<i32>, Option<i32>) {
        match image {
            Some(image) => (Some(image.path), Some(image.width), Some(image.height)),
            None => (None, None, None),
        }
    }
}

impl From<UploadedAsset> for Image {
    fn from(asset: UploadedAsset) -> Self {
        Self {
            path: asset.url,
            width: asset.width,
            height: asset.height,
        }
    }
}

impl From<Image> for Value {
    fn from(image: Image) -> Self {
        json!({
            "path": image.path,
            "width": image.width,
            "height": image.height,
        })
    }
}
