//! Parse and validate the inference backend's reply.
//!
//! Backends sometimes wrap the JSON in markdown fences or surround it with
//! commentary despite instructions. The parser strips fences, isolates the
//! first balanced brace-delimited object and validates it field by field:
//! a field that fails normalization becomes absent, only a reply with no
//! JSON object at all (or a non-positive installment count) fails the
//! operation.

use serde_json::Value;
use tracing::warn;

use crate::error::ResponseError;
use crate::models::record::{BilledTo, InvoiceRecord, Supplier};
use crate::normalize::{normalize_amount, normalize_date, normalize_tax_id};
use crate::taxonomy::ExpenseCategory;

/// Parse a raw backend reply into a validated invoice record.
pub fn parse_reply(raw_reply: &str) -> Result<InvoiceRecord, ResponseError> {
    let stripped = strip_code_fences(raw_reply);

    // A brace inside commentary can mis-anchor the scan, so every `{` is a
    // candidate start until one yields an object that parses.
    let mut from = 0;
    let mut first_failure = None;

    while let Some(rel) = stripped[from..].find('{') {
        let start = from + rel;

        if let Some(candidate) = balanced_object(&stripped[start..]) {
            match serde_json::from_str::<Value>(candidate) {
                Ok(value) => return validate(&value),
                Err(e) => {
                    first_failure.get_or_insert_with(|| e.to_string());
                }
            }
        }

        from = start + 1;
    }

    match first_failure {
        Some(reason) => Err(ResponseError::MalformedJson {
            reason,
            raw_reply: raw_reply.to_string(),
        }),
        None => Err(ResponseError::NoJsonObject {
            raw_reply: raw_reply.to_string(),
        }),
    }
}

/// Remove markdown code-fence lines (```json ... ```) around the reply.
fn strip_code_fences(reply: &str) -> String {
    let trimmed = reply.trim();
    if !trimmed.starts_with("```") {
        return trimmed.to_string();
    }

    trimmed
        .lines()
        .filter(|line| !line.trim_start().starts_with("```"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Take the balanced `{...}` prefix of a string starting at a `{`.
///
/// The scan is string-aware: braces inside JSON string literals do not
/// affect nesting depth. Returns `None` when the braces never balance.
fn balanced_object(s: &str) -> Option<&str> {
    debug_assert!(s.starts_with('{'));

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in s.char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }

        match c {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&s[..i + c.len_utf8()]);
                }
            }
            _ => {}
        }
    }

    None
}

/// Validate a parsed reply object into the canonical record.
fn validate(value: &Value) -> Result<InvoiceRecord, ResponseError> {
    let fornecedor = value.get("fornecedor");
    let faturado = value.get("faturado");

    let record = InvoiceRecord {
        fornecedor: Supplier {
            razao_social: nested_text(fornecedor, "razao_social"),
            fantasia: nested_text(fornecedor, "fantasia"),
            cnpj: nested_text(fornecedor, "cnpj").and_then(|s| normalize_tax_id(&s)),
        },
        faturado: BilledTo {
            nome_completo: nested_text(faturado, "nome_completo"),
            cpf: nested_text(faturado, "cpf").and_then(|s| normalize_tax_id(&s)),
        },
        numero_nota_fiscal: text_or_number(value.get("numero_nota_fiscal"))
            .and_then(|s| normalize_tax_id(&s)),
        data_emissao: text_or_number(value.get("data_emissao"))
            .and_then(|s| normalize_date(&s)),
        descricao_produtos: clean_text(value.get("descricao_produtos")),
        quantidade_parcelas: installments(value.get("quantidade_parcelas"))?,
        data_vencimento: text_or_number(value.get("data_vencimento"))
            .and_then(|s| normalize_date(&s)),
        valor_total: text_or_number(value.get("valor_total")).and_then(|s| normalize_amount(&s)),
        classificacao_despesa: category(value.get("classificacao_despesa")),
    };

    Ok(record)
}

/// Non-empty trimmed string from a field of a nested object.
fn nested_text(parent: Option<&Value>, key: &str) -> Option<String> {
    clean_text(parent.and_then(|p| p.get(key)))
}

/// Non-empty trimmed string value.
fn clean_text(value: Option<&Value>) -> Option<String> {
    let text = value?.as_str()?.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

/// String from either a JSON string or a JSON number.
fn text_or_number(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Installment count: defaults to 1 when absent, fails when present but
/// non-positive, degrades to the default when uninterpretable.
///
/// Backends sometimes emit whole-number floats (`3.0`); those are accepted.
fn installments(value: Option<&Value>) -> Result<u32, ResponseError> {
    let value = match value {
        None | Some(Value::Null) => return Ok(1),
        Some(v) => v,
    };

    let count = match value {
        Value::Number(n) => integral_count(n),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };

    match count {
        Some(n) if n > 0 => match u32::try_from(n) {
            Ok(count) => Ok(count),
            Err(_) => {
                warn!("Installment count {} out of range, defaulting to 1", n);
                Ok(1)
            }
        },
        Some(n) => Err(ResponseError::InvalidInstallments(n)),
        None => {
            warn!("Uninterpretable installment count {:?}, defaulting to 1", value);
            Ok(1)
        }
    }
}

/// Integer value of a JSON number, accepting floats with no fractional part.
fn integral_count(n: &serde_json::Number) -> Option<i64> {
    n.as_i64().or_else(|| {
        n.as_f64()
            .filter(|f| f.is_finite() && f.fract() == 0.0)
            .map(|f| f as i64)
    })
}

/// Category closure: anything that is not an exact taxonomy member becomes
/// absent rather than failing or propagating an invented category.
fn category(value: Option<&Value>) -> Option<ExpenseCategory> {
    let name = value?.as_str()?.trim();
    match ExpenseCategory::from_name(name) {
        Some(category) => Some(category),
        None => {
            if !name.is_empty() {
                warn!("Discarding unknown expense category {:?}", name);
            }
            None
        }
    }
}
