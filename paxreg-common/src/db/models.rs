//! Database record types

use chrono::NaiveDateTime;

/// Fixed textual format for passenger birthdates, in storage and on the wire
pub const BIRTHDATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Parse a birthdate in the fixed `YYYY-MM-DDTHH:MM:SS` format
pub fn parse_birthdate(value: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    NaiveDateTime::parse_from_str(value, BIRTHDATE_FORMAT)
}

/// Passenger record
///
/// `cpf` is the natural business key (globally unique); `id` is the
/// system-generated surrogate used by update and contact attachment.
#[derive(Debug, Clone)]
pub struct Passenger {
    pub id: i64,
    pub name: String,
    pub cpf: String,
    pub birthdate: NaiveDateTime,
    pub flight: String,
    pub contacts: Vec<Contact>,
}

/// Contact record, owned by exactly one passenger
#[derive(Debug, Clone)]
pub struct Contact {
    pub id: i64,
    pub passenger_id: i64,
    pub phone: String,
    /// Free-form classification, e.g. "celular" / "residencial"
    pub kind: String,
}

/// Fields for a passenger insert (id is assigned by the store)
#[derive(Debug, Clone)]
pub struct NewPassenger {
    pub name: String,
    pub cpf: String,
    pub birthdate: NaiveDateTime,
    pub flight: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_birthdate() {
        let dt = parse_birthdate("1974-10-05T00:00:00").expect("Should parse");
        assert_eq!(dt.format(BIRTHDATE_FORMAT).to_string(), "1974-10-05T00:00:00");
    }

    #[test]
    fn test_parse_birthdate_rejects_date_only() {
        assert!(parse_birthdate("1974-10-05").is_err());
    }

    #[test]
    fn test_parse_birthdate_rejects_garbage() {
        assert!(parse_birthdate("05/10/1974").is_err());
        assert!(parse_birthdate("").is_err());
    }
}
