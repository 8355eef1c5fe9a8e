fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=proto/appraisal.proto");
    tonic_build::configure()
        .build_server(true)
        .build_client(true) // The dashboard talks to the engine through this client.
        .compile(&["proto/appraisal.proto"], &["proto"])?;
    Ok(())
}
