//! Build a demo for the browser and serve it, `cargo run-wasm --example shapes_logo`.

fn main() {
    cargo_run_wasm::run_wasm_cli_with_css("body { margin: 0px; }");
}
