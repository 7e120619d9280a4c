//! Keys and (de)serialization for the browser key-value store. The actual
//! `localStorage` access lives in the web crate; this module keeps the
//! contract testable off-browser.

use crate::record::UserRecord;

/// JSON-serialized [`UserRecord`], read back by the chat funnel page.
pub const USER_RECORD_KEY: &str = "dadosUsuario";
/// Flat mirror of the record's name, for pages that only need a greeting.
pub const USER_NAME_KEY: &str = "nomeUsuario";
/// Flat mirror of the record's CPF.
pub const USER_CPF_KEY: &str = "cpfUsuario";
/// Raw 11-digit CPF as submitted (or taken from the inbound URL).
pub const RAW_CPF_KEY: &str = "cpf";

pub fn encode_record(record: &UserRecord) -> Result<String, serde_json::Error> {
    serde_json::to_string(record)
}

pub fn decode_record(json: &str) -> Result<UserRecord, serde_json::Error> {
    serde_json::from_str(json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_rejects_corrupt_json() {
        assert!(decode_record("{not json").is_err());
    }

    #[test]
    fn test_encode_decode_record() {
        let record = UserRecord {
            name: Some("Maria".to_string()),
            cpf: Some("12345678901".to_string()),
            ..Default::default()
        };
        let stored = encode_record(&record).unwrap();
        assert_eq!(decode_record(&stored).unwrap(), record);
    }
}
