use std::path::Path;

use crate::http::response::Mime;

/// Guesses the content type from a file extension (without the dot).
pub fn from_extension(ext: &str) -> Mime {
    match ext {
        "html" => Mime::Html,
        "js" => Mime::JavaScript,
        "json" => Mime::Json,
        "png" => Mime::Png,
        "wasm" => Mime::Wasm,
        _ => Mime::OctetStream,
    }
}

/// Content type of the file at `path`.
///
/// Dotfiles and files without an extension are served as octet streams.
pub fn from_path(path: &Path) -> Mime {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(from_extension)
        .unwrap_or(Mime::OctetStream)
}
