use axum::extract::Multipart;

use veracity_core::SelectedDocument;

/// Parse a multipart form upload into the selected document.
///
/// The resume arrives in the `resume` field; its filename is kept as the
/// display name. Unknown fields are drained and ignored.
pub async fn parse_multipart(mut multipart: Multipart) -> Result<SelectedDocument, String> {
    let mut document: Option<SelectedDocument> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| format!("Failed to read form field: {}", e))?
    {
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            "resume" => {
                let filename = field.file_name().unwrap_or("resume.pdf").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| format!("Failed to read file data: {}", e))?
                    .to_vec();

                if !looks_like_pdf(&filename, &data) {
                    return Err("Please upload a PDF resume".to_string());
                }

                document = Some(SelectedDocument {
                    name: filename,
                    data,
                });
            }
            _ => {
                // Ignore unknown fields
                let _ = field.bytes().await;
            }
        }
    }

    document.ok_or_else(|| "No resume uploaded".to_string())
}

/// Check extension and magic bytes. The extractor assumes a document of
/// the declared type, so the declaration is verified here.
fn looks_like_pdf(filename: &str, data: &[u8]) -> bool {
    filename.to_lowercase().ends_with(".pdf") || data.starts_with(b"%PDF")
}
