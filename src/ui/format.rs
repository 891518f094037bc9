/// Display filters for file metadata
///
/// Small pure helpers the views use to render server metadata: byte counts
/// as human-readable sizes, and file names as mimetype icon assets.

const KB: u64 = 1024;
const MB: u64 = 1024 * 1024;

/// Render a byte count the way the store's listings display it
pub fn file_size(value: u64) -> String {
    if value > MB {
        format!("{:.1} MB", value as f64 / MB as f64)
    } else if value > KB {
        format!("{:.1} kB", value as f64 / KB as f64)
    } else {
        format!("{} B", value)
    }
}

/// Pick the mimetype icon asset for a file name
///
/// Returns the icon's file name under the server's static
/// `img/mimetypes/` directory.
pub fn file_icon(name: &str) -> &'static str {
    let extension = match name.rsplit_once('.') {
        Some((_, ext)) => ext.to_lowercase(),
        None => return "unknown.png",
    };
    match extension.as_str() {
        "gif" | "jpg" | "jpeg" | "png" => "image-jpeg.png",
        "py" => "text-x-python.png",
        _ => "unknown.png",
    }
}

/// Render image dimensions, e.g. "1024 x 683"
pub fn dimensions(size: [u32; 2]) -> String {
    format!("{} x {}", size[0], size[1])
}
