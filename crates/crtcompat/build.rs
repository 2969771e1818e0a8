//! Resolves the compatibility path once per compilation.
//!
//! Emits exactly one of `crtcompat_forward` / `crtcompat_fallback`, plus the
//! derived switches, as `--cfg` flags for the library.

#[allow(dead_code)]
#[path = "src/feature.rs"]
mod feature;

fn main() {
    println!("cargo::rerun-if-changed=build.rs");
    println!("cargo::rerun-if-changed=src/feature.rs");
    println!("cargo::rerun-if-env-changed=CRTCOMPAT_C_DIALECT");

    let probe = feature::BuildProbe::from_env(|key| std::env::var(key).ok());
    let selection = feature::select(&probe);

    println!("cargo::rustc-cfg={}", selection.path.cfg_name());
    if selection.remap_copies {
        println!("cargo::rustc-cfg=crtcompat_remap_copies");
    }
    if selection.remap_scans {
        println!("cargo::rustc-cfg=crtcompat_remap_scans");
    }
    if selection.seconds_sleep_shim {
        println!("cargo::rustc-cfg=crtcompat_seconds_sleep_shim");
    }
    if !selection.inline_keyword {
        println!("cargo::rustc-cfg=crtcompat_inline_suppressed");
    }
}
