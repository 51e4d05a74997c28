//! File system helpers and storage object path handling

use crate::error::StorageError;
use std::fs;
use std::path::Path;

/// Lowercased extension of a file name, if any
pub fn file_extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
}

/// Content type for the image formats the buckets accept
pub fn content_type_for_extension(ext: &str) -> &'static str {
    match ext {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "webp" => "image/webp",
        "gif" => "image/gif",
        _ => "application/octet-stream",
    }
}

pub fn read_file_bytes(path: &Path) -> Result<Vec<u8>, StorageError> {
    fs::read(path).map_err(|source| StorageError::FileIo {
        path: path.to_string_lossy().to_string(),
        source,
    })
}

pub fn file_size(path: &Path) -> Result<u64, StorageError> {
    fs::metadata(path)
        .map(|m| m.len())
        .map_err(|source| StorageError::FileIo {
            path: path.to_string_lossy().to_string(),
            source,
        })
}

/// Object path for a listing image: `{user_id}/{listing_id}_{millis}.{ext}`
pub fn listing_image_object_path(
    user_id: &str,
    listing_id: &str,
    millis: i64,
    ext: &str,
) -> String {
    format!("{}/{}_{}.{}", user_id, listing_id, millis, ext)
}

/// Object path for an avatar: `{user_id}/avatar_{millis}.{ext}`.
/// The timestamp suffix keeps re-uploads from colliding.
pub fn avatar_object_path(user_id: &str, millis: i64, ext: &str) -> String {
    format!("{}/avatar_{}.{}", user_id, millis, ext)
}

/// Recover the storage object path from a public URL. Objects are always
/// stored under the owner's user id, so the path is `{user_id}/{file name}`.
pub fn object_path_from_public_url(url: &str, user_id: &str) -> Option<String> {
    let file_name = url.rsplit('/').next()?;
    if file_name.is_empty() {
        return None;
    }
    Some(format!("{}/{}", user_id, file_name))
}
