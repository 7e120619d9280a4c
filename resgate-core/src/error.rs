use thiserror::Error;

/// Everything that can go wrong at the lookup boundary. Display strings are
/// the exact user-facing messages the result panel renders; nothing more
/// structured is propagated past this point.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// Non-2xx response, with the status embedded in the message.
    #[error("Erro na consulta: {0}")]
    Status(u16),

    /// The request never completed (DNS, connection reset, offline).
    #[error("Ocorreu um erro ao consultar seus dados.")]
    Network(String),

    /// Well-formed response with nothing usable in it.
    #[error("Não foi possível obter os dados para este CPF.")]
    NoData,

    /// Body arrived but was not the JSON shape the API documents.
    #[error("Ocorreu um erro ao consultar seus dados.")]
    Decode(String),
}

impl LookupError {
    /// Transport errors are network-level failures; everything else is a
    /// domain-level "no data" outcome.
    pub fn is_transport(&self) -> bool {
        matches!(self, LookupError::Status(_) | LookupError::Network(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_message_embeds_code() {
        assert_eq!(LookupError::Status(502).to_string(), "Erro na consulta: 502");
        assert!(LookupError::Status(502).is_transport());
    }

    #[test]
    fn test_no_data_is_domain_error() {
        assert!(!LookupError::NoData.is_transport());
        assert_eq!(
            LookupError::NoData.to_string(),
            "Não foi possível obter os dados para este CPF."
        );
    }
}
