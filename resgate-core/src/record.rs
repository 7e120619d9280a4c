use serde::{Deserialize, Serialize};

use crate::cpf;
use crate::error::LookupError;

/// Placeholder rendered for any field the lookup did not return.
pub const FIELD_FALLBACK: &str = "Não informado";

/// Upstream JSON shape. Every field is optional because the API omits
/// whatever it does not know; the internal [`UserRecord`] is isolated from
/// this contract by [`ApiResponse::into_record`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ApiResponse {
    pub nome: Option<String>,
    pub nascimento: Option<String>,
    pub cpf: Option<String>,
    pub sexo: Option<String>,
    pub nome_mae: Option<String>,
}

/// The resolved person behind a CPF. Serialized field names match what the
/// chat funnel page reads back out of storage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    #[serde(rename = "nome")]
    pub name: Option<String>,
    #[serde(rename = "dataNascimento")]
    pub birth_date: Option<String>,
    #[serde(rename = "nomeMae")]
    pub mother_name: Option<String>,
    pub cpf: Option<String>,
    #[serde(rename = "sexo")]
    pub sex: Option<String>,
}

impl ApiResponse {
    /// Maps the external shape into a [`UserRecord`]. A response carrying no
    /// usable field at all is the domain-level "no data" outcome, distinct
    /// from transport failures.
    ///
    /// The stored CPF is always the raw 11-digit form; punctuation is
    /// display-only ([`UserRecord::cpf_display`]).
    pub fn into_record(self) -> Result<UserRecord, LookupError> {
        let empty = |field: &Option<String>| field.as_deref().map_or(true, str::is_empty);
        if empty(&self.nome)
            && empty(&self.nascimento)
            && empty(&self.cpf)
            && empty(&self.sexo)
            && empty(&self.nome_mae)
        {
            return Err(LookupError::NoData);
        }

        Ok(UserRecord {
            name: self.nome,
            birth_date: self.nascimento.map(|d| format_birth_date(&d)),
            mother_name: self.nome_mae,
            cpf: self.cpf.map(|c| cpf::strip(&c)),
            sex: self.sexo,
        })
    }
}

impl UserRecord {
    pub fn name_display(&self) -> String {
        display_or_fallback(&self.name)
    }

    pub fn birth_date_display(&self) -> String {
        display_or_fallback(&self.birth_date)
    }

    pub fn mother_name_display(&self) -> String {
        display_or_fallback(&self.mother_name)
    }

    pub fn sex_display(&self) -> String {
        display_or_fallback(&self.sex)
    }

    /// Punctuated CPF for the result panel.
    pub fn cpf_display(&self) -> String {
        match self.cpf.as_deref() {
            Some(raw) if !raw.is_empty() => cpf::format(raw),
            _ => FIELD_FALLBACK.to_string(),
        }
    }
}

fn display_or_fallback(field: &Option<String>) -> String {
    match field.as_deref() {
        Some(value) if !value.is_empty() => value.to_string(),
        _ => FIELD_FALLBACK.to_string(),
    }
}

/// `YYYYMMDD` becomes `DD/MM/YYYY`; anything already slashed (or any other
/// shape) passes through untouched.
pub fn format_birth_date(raw: &str) -> String {
    if raw.contains('/') {
        return raw.to_string();
    }
    if raw.len() == 8 && raw.bytes().all(|b| b.is_ascii_digit()) {
        return format!("{}/{}/{}", &raw[6..8], &raw[4..6], &raw[..4]);
    }
    raw.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_birth_date_reformat() {
        assert_eq!(format_birth_date("19900115"), "15/01/1990");
        assert_eq!(format_birth_date("15/01/1990"), "15/01/1990");
        assert_eq!(format_birth_date("1990"), "1990");
    }

    #[test]
    fn test_empty_response_is_no_data() {
        assert_eq!(
            ApiResponse::default().into_record(),
            Err(LookupError::NoData)
        );
        let blank = ApiResponse {
            nome: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(blank.into_record(), Err(LookupError::NoData));
    }

    #[test]
    fn test_mapping_normalizes_cpf_and_date() {
        let response = ApiResponse {
            nome: Some("Maria da Silva".to_string()),
            nascimento: Some("19900115".to_string()),
            cpf: Some("123.456.789-01".to_string()),
            sexo: Some("F".to_string()),
            nome_mae: None,
        };
        let record = response.into_record().unwrap();
        assert_eq!(record.birth_date.as_deref(), Some("15/01/1990"));
        assert_eq!(record.cpf.as_deref(), Some("12345678901"));
        assert_eq!(record.cpf_display(), "123.456.789-01");
        assert_eq!(record.mother_name_display(), FIELD_FALLBACK);
    }

    #[test]
    fn test_deserializes_upstream_shape() {
        let record: ApiResponse = serde_json::from_str(
            r#"{"nome":"João","nascimento":"15/01/1990","cpf":"12345678901","sexo":"M","nome_mae":"Ana"}"#,
        )
        .unwrap();
        let record = record.into_record().unwrap();
        assert_eq!(record.name.as_deref(), Some("João"));
        assert_eq!(record.birth_date.as_deref(), Some("15/01/1990"));
    }

    #[test]
    fn test_storage_shape_round_trip() {
        let record = UserRecord {
            name: Some("Maria".to_string()),
            birth_date: Some("15/01/1990".to_string()),
            mother_name: Some("Ana".to_string()),
            cpf: Some("12345678901".to_string()),
            sex: Some("F".to_string()),
        };
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"dataNascimento\""));
        assert!(json.contains("\"nomeMae\""));
        let back: UserRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
