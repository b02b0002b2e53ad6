use std::env;

// Selects the SIMD backend for the 4-lane f32 vector type. 128-bit lanes are
// baseline on both major 64-bit architectures (NEON on aarch64, SSE on
// x86-64), so selection keys off the compilation target and works for cross
// builds; every other target gets the scalar fallback.
fn main() {
    let arch = env::var("CARGO_CFG_TARGET_ARCH").unwrap_or_default();

    let cfg_flag = match arch.as_str() {
        "aarch64" => "neon",
        "x86_64" => "sse",
        _ => "fallback",
    };

    println!("cargo:rustc-cfg={cfg_flag}");

    println!("cargo::rustc-check-cfg=cfg(neon)");
    println!("cargo::rustc-check-cfg=cfg(sse)");
    println!("cargo::rustc-check-cfg=cfg(fallback)");
}
