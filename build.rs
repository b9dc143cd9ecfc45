fn main() {
    // UniFFI scaffolding comes from the setup_scaffolding!() macro in
    // uniffi_bindings.rs, there is no UDL file

    println!("cargo:rerun-if-changed=src/uniffi_bindings.rs");
    println!("cargo:rerun-if-changed=build.rs");
}
