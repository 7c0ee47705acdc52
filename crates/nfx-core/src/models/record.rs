//! The canonical invoice record produced by extraction.
//!
//! The JSON shape is a compatibility contract: Portuguese wire names, every
//! optional field serialized as an explicit `null`, dates as `YYYY-MM-DD`
//! strings and `valor_total` as a plain JSON number in decimal currency
//! units.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::taxonomy::ExpenseCategory;

/// A normalized invoice record. Every field is independently optional;
/// partial extraction is a valid, non-error outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceRecord {
    /// Issuing party (emitente).
    #[serde(default)]
    pub fornecedor: Supplier,

    /// Billed party (destinatário).
    #[serde(default)]
    pub faturado: BilledTo,

    /// Invoice number, digits only after normalization.
    pub numero_nota_fiscal: Option<String>,

    /// Issue date.
    pub data_emissao: Option<NaiveDate>,

    /// Free-text description of the billed products or services.
    pub descricao_produtos: Option<String>,

    /// Number of payment installments; 1 when the invoice does not say.
    #[serde(default = "default_installments")]
    pub quantidade_parcelas: u32,

    /// Payment due date.
    pub data_vencimento: Option<NaiveDate>,

    /// Total amount in decimal currency units, no separators or symbols.
    #[serde(with = "rust_decimal::serde::float_option")]
    pub valor_total: Option<Decimal>,

    /// Expense category; always a taxonomy member when present.
    pub classificacao_despesa: Option<ExpenseCategory>,
}

/// Issuing party of the invoice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Supplier {
    /// Legal name (razão social).
    pub razao_social: Option<String>,

    /// Trade name (nome fantasia).
    pub fantasia: Option<String>,

    /// Tax ID of the issuer, digits only.
    pub cnpj: Option<String>,
}

/// Party the invoice is billed to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BilledTo {
    /// Full name of the billed person or entity.
    pub nome_completo: Option<String>,

    /// Tax ID of the billed party, digits only.
    pub cpf: Option<String>,
}

fn default_installments() -> u32 {
    1
}

impl Default for InvoiceRecord {
    fn default() -> Self {
        Self {
            fornecedor: Supplier::default(),
            faturado: BilledTo::default(),
            numero_nota_fiscal: None,
            data_emissao: None,
            descricao_produtos: None,
            quantidade_parcelas: default_installments(),
            data_vencimento: None,
            valor_total: None,
            classificacao_despesa: None,
        }
    }
}

impl InvoiceRecord {
    /// Whether extraction produced no field at all.
    pub fn is_empty(&self) -> bool {
        self.fornecedor == Supplier::default()
            && self.faturado == BilledTo::default()
            && self.numero_nota_fiscal.is_none()
            && self.data_emissao.is_none()
            && self.descricao_produtos.is_none()
            && self.quantidade_parcelas == 1
            && self.data_vencimento.is_none()
            && self.valor_total.is_none()
            && self.classificacao_despesa.is_none()
    }
}
