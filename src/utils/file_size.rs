pub struct FileSizeUtils;

impl FileSizeUtils {
    /// Size in mebibytes with two decimals, e.g. `12.50 MB`.
    pub fn format_megabytes(size: u64) -> String {
        format!("{:.2} MB", size as f64 / (1024.0 * 1024.0))
    }
}
