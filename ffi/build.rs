use std::env;
use std::path::PathBuf;

/// Generate `tasklist.h` for C hosts into `OUT_DIR`. Its path is exported to
/// the crate as `TASKLIST_HEADER` when generation succeeds.
fn main() {
    println!("cargo:rerun-if-changed=src/lib.rs");
    println!("cargo:rerun-if-changed=src/types.rs");

    let (Ok(crate_dir), Ok(out_dir)) = (env::var("CARGO_MANIFEST_DIR"), env::var("OUT_DIR")) else {
        return;
    };
    let header = PathBuf::from(out_dir).join("tasklist.h");

    match cbindgen::Builder::new()
        .with_crate(&crate_dir)
        .with_language(cbindgen::Language::C)
        .with_include_guard("TASKLIST_H")
        .with_cpp_compat(true)
        .generate()
    {
        Ok(bindings) => {
            bindings.write_to_file(&header);
            println!("cargo:rustc-env=TASKLIST_HEADER={}", header.display());
        }
        Err(e) => println!("cargo:warning=C header not generated: {e}"),
    }
}
