fn main() {
    // Stamp the binary with its build time, surfaced in the hydration log.
    let build_time = chrono::Utc::now().to_rfc3339();
    println!("cargo:rustc-env=BUILD_TIME={build_time}");
    println!("cargo:rerun-if-changed=build.rs");
}
