use exemplar_lib::pipeline::augment::ContentPayload;

/// Read and parse the content object from stdin.
pub fn read_content_input(reader: &mut dyn std::io::Read) -> anyhow::Result<ContentPayload> {
    let mut buf = String::new();
    reader.read_to_string(&mut buf)?;
    let content: ContentPayload = serde_json::from_str(&buf)?;
    Ok(content)
}
