//! Check the quad shader at build time and ship it minified.

use std::path::Path;

use naga::{
    back::wgsl::WriterFlags,
    valid::{Capabilities, ValidationFlags, Validator},
};

/// Shader drawing every textured and colored quad.
const QUAD_SHADER: &str = "shaders/quad.wgsl";

/// Validate the quad shader and write a minified copy into the output directory.
///
/// Fails the build when the WGSL doesn't parse or uses bindings that don't validate.
fn build_quad_shader(out_dir: &Path) {
    println!("cargo::rerun-if-changed={QUAD_SHADER}");

    let source = std::fs::read_to_string(QUAD_SHADER).expect("Error reading quad shader");
    let module = naga::front::wgsl::parse_str(&source).expect("Error parsing quad shader");
    let info = Validator::new(ValidationFlags::all(), Capabilities::all())
        .validate(&module)
        .expect("Error validating quad shader");

    // Round-trip through naga so the minifier only sees normalized WGSL
    let normalized = naga::back::wgsl::write_string(&module, &info, WriterFlags::empty())
        .expect("Error writing quad shader back to WGSL");
    let minified = wgsl_minifier::minify_wgsl_source(&normalized);

    std::fs::write(out_dir.join("quad.wgsl"), minified)
        .expect("Error writing minified quad shader");
}

fn main() {
    let out_dir = std::env::var_os("OUT_DIR").expect("OUT_DIR is set by cargo");

    build_quad_shader(Path::new(&out_dir));
}
