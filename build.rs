fn main() {
    println!("cargo:rerun-if-env-changed=CORELINK_RUN_CROSS_WINDOWS_TESTS");

    // Declare the custom cfg for check-cfg lint
    println!("cargo::rustc-check-cfg=cfg(corelink_skip_cross_windows_tests)");

    // If we're cross-compiling to a Windows target on a non-Windows host, default to skipping
    // tests that create real symlinks unless explicitly enabled.
    let host = std::env::var("HOST").unwrap_or_default();
    let target = std::env::var("TARGET").unwrap_or_default();
    let enable_cross_windows_tests = std::env::var("CORELINK_RUN_CROSS_WINDOWS_TESTS").is_ok();

    if !enable_cross_windows_tests && target.contains("windows") && !host.contains("windows") {
        println!("cargo:rustc-cfg=corelink_skip_cross_windows_tests");
    }
}
