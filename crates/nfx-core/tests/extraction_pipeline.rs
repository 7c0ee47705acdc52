//! End-to-end pipeline tests over the public API with a mock backend.

use nfx_core::{
    DocumentInput, ExpenseCategory, ExtractionConfig, ExtractionEngine, Stage,
};
use nfx_inference::MockBackend;
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use std::str::FromStr;

fn input(text: &str) -> DocumentInput {
    DocumentInput {
        filename: "nota-fiscal.txt".to_string(),
        media_type: "text/plain".to_string(),
        data: text.as_bytes().to_vec(),
    }
}

#[tokio::test]
async fn extracts_complete_record_from_realistic_reply() {
    let reply = r#"```json
{
  "fornecedor": {
    "razao_social": "Distribuidora Horizonte LTDA",
    "fantasia": "Horizonte",
    "cnpj": "18.944.113/0002-91"
  },
  "faturado": {
    "nome_completo": "João Pereira",
    "cpf": "529.982.247-25"
  },
  "numero_nota_fiscal": "000.207.590",
  "data_emissao": "15/01/2024",
  "descricao_produtos": "Material de escritório",
  "quantidade_parcelas": 3,
  "data_vencimento": "2024-02-15",
  "valor_total": "3.449,00",
  "classificacao_despesa": "Serviços"
}
```"#;

    let engine = ExtractionEngine::new(MockBackend::new(reply), ExtractionConfig::default());
    let outcome = engine.extract(input("Nota Fiscal nº 000.207.590")).await.unwrap();

    let record = &outcome.record;
    assert_eq!(
        record.fornecedor.razao_social.as_deref(),
        Some("Distribuidora Horizonte LTDA")
    );
    assert_eq!(record.fornecedor.cnpj.as_deref(), Some("18944113000291"));
    assert_eq!(record.faturado.cpf.as_deref(), Some("52998224725"));
    assert_eq!(record.numero_nota_fiscal.as_deref(), Some("000207590"));
    assert_eq!(
        record.data_emissao,
        chrono::NaiveDate::from_ymd_opt(2024, 1, 15)
    );
    assert_eq!(record.quantidade_parcelas, 3);
    assert_eq!(record.valor_total, Some(Decimal::from_str("3449.00").unwrap()));
    assert_eq!(
        record.classificacao_despesa,
        Some(ExpenseCategory::Servicos)
    );

    // Valid checksums, so no warnings.
    assert!(outcome.metadata.warnings.is_empty());
    assert_eq!(outcome.metadata.byte_size, "Nota Fiscal nº 000.207.590".len());
}

#[tokio::test]
async fn record_serializes_to_wire_shape() {
    let reply = r#"{"numero_nota_fiscal": "42", "valor_total": 100.5}"#;
    let engine = ExtractionEngine::new(MockBackend::new(reply), ExtractionConfig::default());

    let outcome = engine.extract(input("doc")).await.unwrap();
    let json = serde_json::to_value(&outcome.record).unwrap();

    assert_eq!(
        json,
        serde_json::json!({
            "fornecedor": {"razao_social": null, "fantasia": null, "cnpj": null},
            "faturado": {"nome_completo": null, "cpf": null},
            "numero_nota_fiscal": "42",
            "data_emissao": null,
            "descricao_produtos": null,
            "quantidade_parcelas": 1,
            "data_vencimento": null,
            "valor_total": 100.5,
            "classificacao_despesa": null,
        })
    );
}

#[tokio::test]
async fn hallucinated_category_is_dropped_not_propagated() {
    let reply = r#"{"classificacao_despesa": "Despesas Gerais", "valor_total": 10}"#;
    let engine = ExtractionEngine::new(MockBackend::new(reply), ExtractionConfig::default());

    let outcome = engine.extract(input("doc")).await.unwrap();
    assert_eq!(outcome.record.classificacao_despesa, None);
    assert_eq!(
        outcome.record.valor_total,
        Some(Decimal::from_str("10").unwrap())
    );
}

#[tokio::test]
async fn reply_without_json_is_a_parse_stage_failure() {
    let engine = ExtractionEngine::new(
        MockBackend::new("O documento não parece ser uma nota fiscal."),
        ExtractionConfig::default(),
    );

    let failure = engine.extract(input("doc")).await.unwrap_err();
    assert_eq!(failure.stage, Stage::ParseResponse);
    assert_eq!(failure.stage.tag(), "response_parse_failed");
}
