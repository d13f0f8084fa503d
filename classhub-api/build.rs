fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Fall back to a vendored protoc when the host doesn't provide one, so the
    // proto sources the crate already depends on can always be compiled.
    if std::env::var_os("PROTOC").is_none() {
        if let Ok(path) = protoc_bin_vendored::protoc_bin_path() {
            std::env::set_var("PROTOC", path);
        }
    }
    tonic_build::compile_protos("proto/classhub.proto")?;
    Ok(())
}
