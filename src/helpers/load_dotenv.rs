use std::path::PathBuf;

/// Load a `.env` file from the working directory or one of its parents
///
/// Runs before logging is set up, so the loaded path is returned for the
/// caller to report.
pub fn load_dotenv() -> Option<PathBuf> {
    dotenv::dotenv().ok()
}
