fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Generated code is checked in under src/generated/ so a normal build
    // needs neither protoc nor network access. Set QUARRY_PROTO_REGEN=1 to
    // regenerate after editing proto/quarry.proto.
    if std::env::var_os("QUARRY_PROTO_REGEN").is_some() {
        tonic_build::configure()
            .build_client(true)
            .build_server(true)
            .out_dir("src/generated")
            .compile_protos(&["proto/quarry.proto"], &["proto"])?;
    }

    println!("cargo:rerun-if-env-changed=QUARRY_PROTO_REGEN");
    println!("cargo:rerun-if-changed=proto/quarry.proto");
    Ok(())
}
