//! Integration test for configuration loaded from the real process environment.
//!
//! Mutating the environment is only sound while no other thread reads it, so
//! this binary holds a single test that walks every startup case in turn.

use std::env;
use std::fs;

use taglog::{CONFIG_PATH_ENV, CONFIGURATION_FILE, DEFAULT_TAG, Level, LoggerConfig};
use tempfile::TempDir;

const LEVEL_VAR: &str = "TAGLOG_DEFAULT_LOG_LEVEL";
const TAG_VAR: &str = "TAGLOG_LOG_TAG";

/// Verifies `LoggerConfig::load` reads the override path, the environment and
/// the working-directory file, and tolerates non-UTF-8 variables.
#[test]
fn load_reads_process_environment_and_files() {
    let dir = TempDir::new().expect("tempdir");
    let override_path = dir.path().join("override.properties");
    fs::write(
        &override_path,
        "taglog.defaultLogLevel=debug\ntaglog.logTag=FromOverride\n",
    )
    .expect("write override");

    // SAFETY: this is the only test in the binary, so no other thread reads
    // the environment while it changes.
    unsafe {
        env::remove_var(LEVEL_VAR);
        env::remove_var(TAG_VAR);
        env::set_var(CONFIG_PATH_ENV, &override_path);
    }

    let config = LoggerConfig::load();
    assert_eq!(config.threshold(), Level::Debug);
    assert_eq!(config.tag().as_str(), "FromOverride");

    #[cfg(unix)]
    {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        // SAFETY: as above.
        unsafe {
            env::set_var("TAGLOG_TEST_NON_UTF8", OsStr::from_bytes(b"\xff\xfe"));
            env::set_var(TAG_VAR, OsStr::from_bytes(b"\xff"));
        }

        let config = LoggerConfig::load();
        assert_eq!(config.threshold(), Level::Debug);
        assert_eq!(config.tag().as_str(), "FromOverride");

        // SAFETY: as above.
        unsafe {
            env::remove_var("TAGLOG_TEST_NON_UTF8");
        }
    }

    // SAFETY: as above.
    unsafe {
        env::set_var(TAG_VAR, "FromEnv");
        env::set_var(LEVEL_VAR, "error");
    }

    let config = LoggerConfig::load();
    assert_eq!(config.threshold(), Level::Error);
    assert_eq!(config.tag().as_str(), "FromEnv");

    // SAFETY: as above.
    unsafe {
        env::remove_var(CONFIG_PATH_ENV);
        env::remove_var(TAG_VAR);
        env::remove_var(LEVEL_VAR);
    }

    let cwd = TempDir::new().expect("tempdir");
    fs::write(
        cwd.path().join(CONFIGURATION_FILE),
        "taglog.defaultLogLevel=warn\ntaglog.logTag=FromCwd\n",
    )
    .expect("write working-directory file");
    let previous = env::current_dir().expect("current dir");
    env::set_current_dir(cwd.path()).expect("enter tempdir");

    let from_cwd = LoggerConfig::load();

    let empty = TempDir::new().expect("tempdir");
    env::set_current_dir(empty.path()).expect("enter empty tempdir");
    let defaults = LoggerConfig::load();

    env::set_current_dir(previous).expect("restore current dir");

    assert_eq!(from_cwd.threshold(), Level::Warn);
    assert_eq!(from_cwd.tag().as_str(), "FromCwd");
    assert_eq!(defaults.threshold(), Level::Info);
    assert_eq!(defaults.tag().as_str(), DEFAULT_TAG);
}
