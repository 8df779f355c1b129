//! NF-e issuance example
//!
//! Sends one NF-e to the sandbox, then looks it up by integration id and
//! downloads its PDF.
//!
//! Run with: PLUGNOTAS_API_KEY=... PLUGNOTAS_SANDBOX=1 cargo run --example issue_nfe

use plugnotas_sdk::{
    types::{DocumentId, IntegrationId, TaxId},
    PlugNotas,
};
use serde_json::json;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let plugnotas = PlugNotas::from_env()?;
    println!("Environment: {} ({})", plugnotas.environment(), plugnotas.base_url());

    let nfe = json!({
        "idIntegracao": "PEDIDO-1001",
        "natureza": "VENDA",
        "emitente": {"cpfCnpj": "08187168000160"},
        "destinatario": {
            "cpfCnpj": "08114280956",
            "razaoSocial": "Cliente Exemplo",
            "email": "cliente@example.com"
        },
        "itens": [{
            "codigo": "1",
            "descricao": "Produto de teste",
            "ncm": "06029090",
            "cfop": "5101",
            "valorUnitario": {"comercial": 10.0, "tributavel": 10.0},
            "valor": 10.0
        }],
        "pagamentos": [{"aVista": true, "meio": "01", "valor": 10.0}]
    });

    let sent = plugnotas.send_nfe(&[nfe]).await?.error_for_status()?;
    println!("Submitted: {}", sent.text());

    let summary = plugnotas
        .nfe_summary_by_integration(
            &TaxId::new("08187168000160")?,
            &IntegrationId::new("PEDIDO-1001")?,
        )
        .await?;
    println!("Summary ({}): {}", summary.http_code, summary.text());

    let id = summary
        .body
        .as_json()
        .and_then(|body| body.get(0))
        .and_then(|doc| doc.get("id"))
        .and_then(|id| id.as_str())
        .map(DocumentId::new)
        .transpose()?;

    if let Some(id) = id {
        let pdf = plugnotas.nfe_pdf(&id).await?;
        match pdf.bytes() {
            Some(bytes) => println!("PDF: {} bytes", bytes.len()),
            None => println!("PDF not ready: {}", pdf.text()),
        }
    }

    Ok(())
}
