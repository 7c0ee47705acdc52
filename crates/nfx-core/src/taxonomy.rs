//! Fixed expense-category taxonomy.
//!
//! The taxonomy is a closed set defined once at compile time. Extraction
//! never invents a category: a backend reply that does not exactly match a
//! member degrades to absent.

use serde::{Deserialize, Serialize};

/// The fixed set of expense categories an invoice can be classified into.
///
/// Wire names (and the exact strings the inference backend must produce)
/// are the accented Portuguese forms, e.g. `"Alimentação"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExpenseCategory {
    #[serde(rename = "Alimentação")]
    Alimentacao,
    #[serde(rename = "Transporte")]
    Transporte,
    #[serde(rename = "Saúde")]
    Saude,
    #[serde(rename = "Educação")]
    Educacao,
    #[serde(rename = "Moradia")]
    Moradia,
    #[serde(rename = "Vestuário")]
    Vestuario,
    #[serde(rename = "Lazer")]
    Lazer,
    #[serde(rename = "Serviços")]
    Servicos,
    #[serde(rename = "Outros")]
    Outros,
}

impl ExpenseCategory {
    /// All categories, in listing order.
    pub const ALL: [ExpenseCategory; 9] = [
        ExpenseCategory::Alimentacao,
        ExpenseCategory::Transporte,
        ExpenseCategory::Saude,
        ExpenseCategory::Educacao,
        ExpenseCategory::Moradia,
        ExpenseCategory::Vestuario,
        ExpenseCategory::Lazer,
        ExpenseCategory::Servicos,
        ExpenseCategory::Outros,
    ];

    /// Canonical (wire) name of the category.
    pub fn name(&self) -> &'static str {
        match self {
            ExpenseCategory::Alimentacao => "Alimentação",
            ExpenseCategory::Transporte => "Transporte",
            ExpenseCategory::Saude => "Saúde",
            ExpenseCategory::Educacao => "Educação",
            ExpenseCategory::Moradia => "Moradia",
            ExpenseCategory::Vestuario => "Vestuário",
            ExpenseCategory::Lazer => "Lazer",
            ExpenseCategory::Servicos => "Serviços",
            ExpenseCategory::Outros => "Outros",
        }
    }

    /// Illustrative example terms, for documentation and UI listings.
    /// These play no role in classification.
    pub fn examples(&self) -> &'static [&'static str] {
        match self {
            ExpenseCategory::Alimentacao => &["supermercado", "restaurante", "padaria"],
            ExpenseCategory::Transporte => &["combustível", "pedágio", "manutenção veicular"],
            ExpenseCategory::Saude => &["farmácia", "plano de saúde", "consulta médica"],
            ExpenseCategory::Educacao => &["mensalidade escolar", "curso", "material didático"],
            ExpenseCategory::Moradia => &["aluguel", "condomínio", "energia elétrica"],
            ExpenseCategory::Vestuario => &["roupas", "calçados", "acessórios"],
            ExpenseCategory::Lazer => &["viagem", "cinema", "assinatura de streaming"],
            ExpenseCategory::Servicos => &["honorários", "assinatura de software", "manutenção"],
            ExpenseCategory::Outros => &["taxas diversas", "despesas não classificadas"],
        }
    }

    /// Resolve a category from its exact wire name.
    ///
    /// Returns `None` for anything that is not a precise match; callers
    /// degrade the field to absent rather than guessing.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == name)
    }
}

impl std::fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One entry of the category listing interface.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryListing {
    /// 1-based index in listing order.
    pub id: usize,
    /// Canonical category name.
    pub name: &'static str,
    /// Illustrative example terms.
    pub examples: &'static [&'static str],
}

/// Ordered sequence of all categories.
pub fn list_categories() -> &'static [ExpenseCategory] {
    &ExpenseCategory::ALL
}

/// Example terms for a category. Provided as a free function so an unknown
/// name yields an empty result instead of a failure.
pub fn examples_for(name: &str) -> &'static [&'static str] {
    ExpenseCategory::from_name(name)
        .map(|c| c.examples())
        .unwrap_or(&[])
}

/// The full listing with 1-based ids, in stable order.
pub fn category_listing() -> Vec<CategoryListing> {
    ExpenseCategory::ALL
        .iter()
        .enumerate()
        .map(|(i, c)| CategoryListing {
            id: i + 1,
            name: c.name(),
            examples: c.examples(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_from_name_exact_match() {
        assert_eq!(
            ExpenseCategory::from_name("Alimentação"),
            Some(ExpenseCategory::Alimentacao)
        );
        assert_eq!(
            ExpenseCategory::from_name("Saúde"),
            Some(ExpenseCategory::Saude)
        );
    }

    #[test]
    fn test_from_name_rejects_near_misses() {
        assert_eq!(ExpenseCategory::from_name("alimentação"), None);
        assert_eq!(ExpenseCategory::from_name("Alimentacao"), None);
        assert_eq!(ExpenseCategory::from_name("Saude "), None);
        assert_eq!(ExpenseCategory::from_name(""), None);
    }

    #[test]
    fn test_listing_is_ordered_and_one_based() {
        let listing = category_listing();
        assert_eq!(listing.len(), 9);
        assert_eq!(listing[0].id, 1);
        assert_eq!(listing[0].name, "Alimentação");
        assert_eq!(listing[8].id, 9);
        assert_eq!(listing[8].name, "Outros");
    }

    #[test]
    fn test_examples_for_unknown_is_empty() {
        assert!(examples_for("Combustível").is_empty());
        assert!(!examples_for("Transporte").is_empty());
    }

    #[test]
    fn test_serde_uses_wire_names() {
        let json = serde_json::to_string(&ExpenseCategory::Saude).unwrap();
        assert_eq!(json, "\"Saúde\"");

        let parsed: ExpenseCategory = serde_json::from_str("\"Vestuário\"").unwrap();
        assert_eq!(parsed, ExpenseCategory::Vestuario);
    }
}
