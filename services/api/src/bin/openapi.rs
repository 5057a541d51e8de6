//! services/api/src/bin/openapi.rs
//!
//! Writes the OpenAPI 3 document for the front desk REST API, so the dashboard
//! client can be generated without running the server.
//!
//! Usage: `openapi [OUTPUT]` (defaults to `openapi.json`).

use api_lib::web::rest::ApiDoc;
use utoipa::OpenApi;

fn write_document(api_doc: utoipa::openapi::OpenApi, path: &str) -> Result<usize, Box<dyn std::error::Error>> {
    let document = api_doc.to_pretty_json()?;
    std::fs::write(path, &document)?;
    Ok(document.len())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let output = std::env::args().nth(1).unwrap_or_else(|| "openapi.json".to_string());
    let api_doc = ApiDoc::openapi();
    let operations: usize = api_doc
        .paths
        .paths
        .values()
        .map(|item| {
            [&item.get, &item.post, &item.put, &item.patch, &item.delete]
                .iter()
                .filter(|operation| operation.is_some())
                .count()
        })
        .sum();

    let bytes = write_document(api_doc, &output)?;
    println!("Wrote {} operations ({} bytes) to {}", operations, bytes, output);
    Ok(())
}
