//! Certificate upload example
//!
//! Uploads an A1 certificate, registers the company that uses it and logs
//! every request through the logging middleware.
//!
//! Run with: cargo run --example certificate_upload -- empresa.pfx senha

use plugnotas_sdk::{
    api::CertificateUpload, middleware::LoggingMiddleware, types::ApiKey, PlugNotas,
};
use serde_json::json;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let path = args.next().ok_or("usage: certificate_upload <file.pfx> <password>")?;
    let password = args.next().ok_or("usage: certificate_upload <file.pfx> <password>")?;

    let plugnotas = PlugNotas::builder()
        .api_key(ApiKey::new("2da392a6-79d2-4304-a8b7-959572c7e44d")?)
        .production(false)
        .with_middleware(LoggingMiddleware::new())
        .build()?;

    let certificate = CertificateUpload::from_path(&path, password).await?;
    let uploaded = plugnotas.upload_certificate(certificate).await?;
    println!("Upload ({}): {}", uploaded.http_code, uploaded.text());

    let certificate_id = uploaded
        .body
        .as_json()
        .and_then(|body| body.pointer("/data/id"))
        .and_then(|id| id.as_str())
        .unwrap_or_default()
        .to_string();

    let company = json!({
        "cpfCnpj": "08187168000160",
        "razaoSocial": "Empresa Exemplo LTDA",
        "certificado": certificate_id,
        "nfe": {"ativo": true, "tipoContrato": 0},
        "nfce": {"ativo": false}
    });

    match plugnotas.register_company(&company).await?.error_for_status() {
        Ok(_) => println!("Company registered"),
        Err(e) => eprintln!("Failed to register: {}", e),
    }

    Ok(())
}
