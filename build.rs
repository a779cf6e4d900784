use std::env;
use std::path::{Path, PathBuf};

fn header_path(crate_dir: &Path) -> PathBuf {
    crate_dir.join("include").join("docforge.h")
}

fn main() {
    println!("cargo:rerun-if-changed=src/ffi.rs");
    println!("cargo:rerun-if-changed=cbindgen.toml");
    println!("cargo:rerun-if-env-changed=DOCS_RS");

    // docs.rs builds on a read-only source tree.
    if env::var_os("DOCS_RS").is_some() {
        return;
    }

    let crate_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR not set"));
    let header = header_path(&crate_dir);

    std::fs::create_dir_all(header.parent().expect("header path has a parent"))
        .expect("failed to create include/ directory");

    let config = cbindgen::Config::from_file(crate_dir.join("cbindgen.toml"))
        .expect("failed to read cbindgen.toml");

    let bindings = cbindgen::Builder::new()
        .with_crate(&crate_dir)
        .with_config(config)
        .generate()
        .expect("cbindgen failed to generate docforge.h");

    // `write_to_file` reports whether the header actually changed.
    if bindings.write_to_file(&header) {
        println!("cargo:warning=regenerated {}", header.display());
    }
}
