use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

pub fn fixture_path(relative: impl AsRef<Path>) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(relative)
}

pub fn read_fixture(relative: impl AsRef<Path>) -> String {
    fs::read_to_string(fixture_path(relative)).expect("fixture file should be readable")
}

#[allow(dead_code)]
pub fn client_config(api: impl Into<String>, timeout: Duration) -> chkit::ChConfig {
    chkit::ChConfig::new(
        "chkit-tests",
        timeout,
        Some(chkit::ChUrls { api: api.into() }),
    )
}

#[allow(dead_code)]
pub fn client(api: impl Into<String>) -> chkit::CompaniesHouse {
    chkit::CompaniesHouse::with_config("abc", client_config(api, Duration::from_secs(5))).unwrap()
}

#[allow(dead_code)]
pub fn run_config(dir: &Path, location: &str, sic_codes: &str) -> chkit::RunConfig {
    chkit::RunConfig::new(
        Some("abc".to_string()),
        Some(location.to_string()),
        Some(sic_codes.to_string()),
    )
    .unwrap()
    .with_output_dir(dir)
}
