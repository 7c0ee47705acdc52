//! Extraction request construction.
//!
//! The instruction payload sent to the inference backend is assembled from
//! versioned, independently testable components: task text, schema
//! descriptor, taxonomy listing, disambiguation rules and output-format
//! constraints. Rendering is deterministic: identical input produces an
//! identical request.

use nfx_inference::{InferenceRequest, RequestPart};

use crate::error::RequestError;
use crate::taxonomy::ExpenseCategory;

/// Version of the instruction template, bumped on wording or schema changes.
pub const TEMPLATE_VERSION: &str = "1";

/// Document content handed to the request builder.
#[derive(Debug, Clone)]
pub enum DocumentPayload {
    /// Pre-extracted document text.
    Text(String),
    /// Raw document bytes with their declared media type.
    Pdf { data: Vec<u8>, media_type: String },
}

impl DocumentPayload {
    /// Whether the payload carries no content.
    pub fn is_empty(&self) -> bool {
        match self {
            DocumentPayload::Text(text) => text.trim().is_empty(),
            DocumentPayload::Pdf { data, .. } => data.is_empty(),
        }
    }
}

/// One field of the expected output schema.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    /// Dotted path of the field in the output object.
    pub path: &'static str,
    /// JSON type the backend must produce.
    pub kind: &'static str,
    /// What the field means and where it comes from in the document.
    pub description: &'static str,
}

/// The expected output schema, in wire order.
pub fn schema_fields() -> &'static [FieldSpec] {
    const SCHEMA: [FieldSpec; 12] = [
        FieldSpec {
            path: "fornecedor.razao_social",
            kind: "string|null",
            description: "razão social do emitente da nota",
        },
        FieldSpec {
            path: "fornecedor.fantasia",
            kind: "string|null",
            description: "nome fantasia do emitente, se houver",
        },
        FieldSpec {
            path: "fornecedor.cnpj",
            kind: "string|null",
            description: "CNPJ do emitente, somente dígitos",
        },
        FieldSpec {
            path: "faturado.nome_completo",
            kind: "string|null",
            description: "nome completo do destinatário/faturado",
        },
        FieldSpec {
            path: "faturado.cpf",
            kind: "string|null",
            description: "CPF do destinatário, somente dígitos",
        },
        FieldSpec {
            path: "numero_nota_fiscal",
            kind: "string|null",
            description: "número da nota fiscal, somente dígitos",
        },
        FieldSpec {
            path: "data_emissao",
            kind: "string|null",
            description: "data de emissão no formato YYYY-MM-DD",
        },
        FieldSpec {
            path: "descricao_produtos",
            kind: "string|null",
            description: "descrição dos produtos ou serviços faturados",
        },
        FieldSpec {
            path: "quantidade_parcelas",
            kind: "integer",
            description: "quantidade de parcelas; use 1 quando não houver parcelamento",
        },
        FieldSpec {
            path: "data_vencimento",
            kind: "string|null",
            description: "data de vencimento no formato YYYY-MM-DD",
        },
        FieldSpec {
            path: "valor_total",
            kind: "number|null",
            description: "valor total em reais, com ponto decimal e sem separador de milhar",
        },
        FieldSpec {
            path: "classificacao_despesa",
            kind: "string|null",
            description: "categoria de despesa, exatamente uma das categorias listadas",
        },
    ];
    &SCHEMA
}

const TASK: &str = "Você é um extrator de dados de notas fiscais. Analise o documento \
fornecido e extraia os campos descritos abaixo.";

const DISAMBIGUATION_RULES: [&str; 5] = [
    "O número da nota fiscal aparece junto a rótulos como \"Nota Fiscal nº\", \"NF-e\" ou \
     \"Número\"; não o confunda com o CNPJ, o CPF ou a chave de acesso.",
    "O CNPJ em fornecedor.cnpj é o do emitente (seção do emitente/prestador), nunca o do \
     destinatário.",
    "O CPF em faturado.cpf pertence ao destinatário/tomador, na seção de faturamento.",
    "valor_total é o valor total da nota, não o valor de uma parcela ou de um item.",
    "Para classificacao_despesa escolha a categoria que melhor descreve os produtos ou \
     serviços; se nenhuma servir com segurança, use null.",
];

const OUTPUT_CONSTRAINTS: &str = "Responda com um único objeto JSON, sem nenhum texto antes \
ou depois, sem cercas de markdown. Use null para todo campo que não puder ser identificado \
com segurança. Não invente valores.";

/// Render the complete instruction text.
fn render_instructions() -> String {
    let mut out = String::new();

    out.push_str(TASK);
    out.push_str("\n\n");

    out.push_str("Esquema de saída (todos os campos são obrigatórios no objeto):\n");
    for field in schema_fields() {
        out.push_str(&format!(
            "- {} ({}): {}\n",
            field.path, field.kind, field.description
        ));
    }
    out.push('\n');

    out.push_str("Categorias de despesa válidas:\n");
    for (i, category) in ExpenseCategory::ALL.iter().enumerate() {
        out.push_str(&format!(
            "{}. {} (ex.: {})\n",
            i + 1,
            category.name(),
            category.examples().join(", ")
        ));
    }
    out.push('\n');

    out.push_str("Regras:\n");
    for rule in DISAMBIGUATION_RULES {
        out.push_str("- ");
        out.push_str(rule);
        out.push('\n');
    }
    out.push('\n');

    out.push_str(OUTPUT_CONSTRAINTS);

    out
}

/// Build the inference request for a document payload.
///
/// Fails only when the payload is empty; everything else about the document
/// is the backend's problem.
pub fn build_request(payload: DocumentPayload) -> Result<InferenceRequest, RequestError> {
    if payload.is_empty() {
        return Err(RequestError::EmptyDocument);
    }

    let request = InferenceRequest::new(render_instructions());

    Ok(match payload {
        DocumentPayload::Text(text) => request.with_part(RequestPart::Text(format!(
            "Documento:\n---\n{}\n---",
            text
        ))),
        DocumentPayload::Pdf { data, media_type } => {
            request.with_part(RequestPart::Blob { media_type, data })
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_text_is_rejected() {
        let result = build_request(DocumentPayload::Text("   \n".to_string()));
        assert!(matches!(result, Err(RequestError::EmptyDocument)));
    }

    #[test]
    fn test_empty_pdf_is_rejected() {
        let result = build_request(DocumentPayload::Pdf {
            data: Vec::new(),
            media_type: "application/pdf".to_string(),
        });
        assert!(matches!(result, Err(RequestError::EmptyDocument)));
    }

    #[test]
    fn test_build_is_deterministic() {
        let payload = || DocumentPayload::Text("Nota Fiscal nº 123".to_string());
        let first = build_request(payload()).unwrap();
        let second = build_request(payload()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_instructions_cover_schema_and_taxonomy() {
        let request = build_request(DocumentPayload::Text("doc".to_string())).unwrap();

        for field in schema_fields() {
            assert!(
                request.instructions.contains(field.path),
                "missing field {}",
                field.path
            );
        }
        for category in ExpenseCategory::ALL {
            assert!(request.instructions.contains(category.name()));
        }
        assert!(request.instructions.contains("único objeto JSON"));
    }

    #[test]
    fn test_text_payload_becomes_text_part() {
        let request =
            build_request(DocumentPayload::Text("Nota Fiscal nº 42".to_string())).unwrap();

        assert_eq!(request.parts.len(), 1);
        match &request.parts[0] {
            RequestPart::Text(text) => assert!(text.contains("Nota Fiscal nº 42")),
            _ => panic!("expected text part"),
        }
    }

    #[test]
    fn test_pdf_payload_becomes_blob_part() {
        let request = build_request(DocumentPayload::Pdf {
            data: b"%PDF-1.4".to_vec(),
            media_type: "application/pdf".to_string(),
        })
        .unwrap();

        match &request.parts[0] {
            RequestPart::Blob { media_type, data } => {
                assert_eq!(media_type, "application/pdf");
                assert_eq!(data, b"%PDF-1.4");
            }
            _ => panic!("expected blob part"),
        }
    }
}
