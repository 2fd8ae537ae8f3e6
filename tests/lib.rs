//! Shared fixtures for the behavior suites.

use std::io::Write;
use std::sync::Arc;

use tempfile::NamedTempFile;
use wbseller_core::{Environment, RequestDispatcher, ScriptedHttpClient, SellerApi};

pub const TEST_TOKEN: &str = "wb-token";

/// Production dispatcher over `client`, already holding [`TEST_TOKEN`].
pub fn authorized_dispatcher(client: &Arc<ScriptedHttpClient>) -> RequestDispatcher {
    RequestDispatcher::new(Environment::Production, client.clone()).with_token(TEST_TOKEN)
}

pub fn authorized_api(client: &Arc<ScriptedHttpClient>) -> SellerApi {
    SellerApi::new(authorized_dispatcher(client))
}

/// Writes `contents` to a temporary TOML file that lives as long as the handle.
pub fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(contents.as_bytes()).expect("write config");
    file
}
