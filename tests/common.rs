use std::path::{Path, PathBuf};
use std::sync::Once;

static START: Once = Once::new();

/// Initialise logging once for the whole test binary
pub fn setup() {
    START.call_once(|| {
        let _ = loggerv::Logger::new()
            .verbosity(1)
            .module_path(true)
            .line_numbers(true)
            .init();
    });
}

/// Path to a file or directory under tests/fixtures
pub fn fixture(rel: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures").join(rel)
}
