//! Filename-extension to content-type resolution.
//!
//! The table is compiled in and covers the registry types CI artifacts
//! commonly carry; anything else resolves to the generic binary type.

use std::path::Path;

/// Fallback for missing or unrecognised extensions.
pub const APPLICATION_OCTET_STREAM: &str = "application/octet-stream";

/// Resolves a content type for `filename` from its extension.
///
/// Total function: never fails, has no side effects. Lookup is
/// case-insensitive on the extension.
pub fn resolve(filename: &str) -> &'static str {
    let ext = match Path::new(filename).extension().and_then(|e| e.to_str()) {
        Some(ext) => ext.to_ascii_lowercase(),
        None => return APPLICATION_OCTET_STREAM,
    };

    match ext.as_str() {
        "txt" | "text" | "log" => "text/plain",
        "html" | "htm" => "text/html",
        "css" => "text/css",
        "csv" => "text/csv",
        "md" | "markdown" => "text/markdown",
        "yaml" | "yml" => "text/yaml",
        "xml" => "application/xml",
        "js" | "mjs" => "application/javascript",
        "json" => "application/json",
        "pdf" => "application/pdf",
        "zip" => "application/zip",
        "gz" => "application/gzip",
        "tar" => "application/x-tar",
        "wasm" => "application/wasm",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "ico" => "image/vnd.microsoft.icon",
        "woff" => "font/woff",
        "woff2" => "font/woff2",
        "ttf" => "font/ttf",
        "otf" => "font/otf",
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "mp4" => "video/mp4",
        "webm" => "video/webm",
        _ => APPLICATION_OCTET_STREAM,
    }
}
