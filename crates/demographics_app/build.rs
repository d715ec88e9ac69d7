use std::env;

fn main() {
    println!("cargo:rerun-if-env-changed=DEMOGRAPHICS_VERSION");
    let version = env::var("DEMOGRAPHICS_VERSION")
        .or_else(|_| env::var("CARGO_PKG_VERSION"))
        .unwrap_or_else(|_| "0.0.0".to_string());
    println!("cargo:rustc-env=DEMOGRAPHICS_VERSION={version}");
}
