//! Field normalizers.
//!
//! Pure, deterministic functions converting semi-structured extracted values
//! into their canonical representations. They never fail for malformed
//! input; an unrecognizable value degrades to absent.

pub mod amounts;
pub mod dates;
pub mod ids;
pub mod patterns;

pub use amounts::normalize_amount;
pub use dates::normalize_date;
pub use ids::{digits_only, format_cnpj, format_cpf, normalize_tax_id, validate_cnpj, validate_cpf};
