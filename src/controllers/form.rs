//! Editable form state for a Cliente.

use crate::error::ValidationError;
use crate::models::Cliente;

/// Text inputs backing the detail screen.
///
/// Everything is held as entered, age included, so the presentation layer
/// can bind text fields directly. The `*_has_error` predicates drive field
/// highlighting; [`ClienteForm::parse_inputs`] does the authoritative
/// validation when saving.
#[derive(Debug, Clone, Default)]
pub struct ClienteForm {
    pub name: String,
    pub last_name: String,
    pub age: String,
    pub address: String,
}

impl ClienteForm {
    /// Form pre-filled from an existing record.
    pub fn from_cliente(cliente: &Cliente) -> Self {
        Self {
            name: cliente.name.clone(),
            last_name: cliente.last_name.clone(),
            age: cliente.age.to_string(),
            address: cliente.address.clone(),
        }
    }

    pub fn name_has_error(&self) -> bool {
        self.name.trim().is_empty()
    }

    pub fn last_name_has_error(&self) -> bool {
        self.last_name.trim().is_empty()
    }

    pub fn age_has_error(&self) -> bool {
        self.parsed_age().is_none()
    }

    pub fn address_has_error(&self) -> bool {
        self.address.trim().is_empty()
    }

    /// Whether every field would pass validation.
    pub fn is_valid(&self) -> bool {
        !self.name_has_error()
            && !self.last_name_has_error()
            && !self.age_has_error()
            && !self.address_has_error()
    }

    /// Validate and convert the inputs, reporting the first violation in
    /// field order (name, last name, age, address). Text fields come back
    /// trimmed.
    pub fn parse_inputs(&self) -> Result<(String, String, i64, String), ValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }

        let last_name = self.last_name.trim();
        if last_name.is_empty() {
            return Err(ValidationError::EmptyLastName);
        }

        let age = self.parsed_age().ok_or(ValidationError::InvalidAge)?;

        let address = self.address.trim();
        if address.is_empty() {
            return Err(ValidationError::EmptyAddress);
        }

        Ok((
            name.to_string(),
            last_name.to_string(),
            age,
            address.to_string(),
        ))
    }

    /// Age as a positive integer, if the text parses as one.
    fn parsed_age(&self) -> Option<i64> {
        self.age.trim().parse::<i64>().ok().filter(|age| *age > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> ClienteForm {
        ClienteForm {
            name: "Ana".to_string(),
            last_name: "Silva".to_string(),
            age: "28".to_string(),
            address: "Rua Azul 10".to_string(),
        }
    }

    #[test]
    fn empty_form_flags_every_field() {
        let form = ClienteForm::default();
        assert!(form.name_has_error());
        assert!(form.last_name_has_error());
        assert!(form.age_has_error());
        assert!(form.address_has_error());
        assert!(!form.is_valid());
    }

    #[test]
    fn filled_form_parses_and_trims() {
        let mut form = filled();
        form.name = "  Ana  ".to_string();
        form.age = " 28 ".to_string();
        assert!(form.is_valid());

        let (name, last_name, age, address) = form.parse_inputs().unwrap();
        assert_eq!(name, "Ana");
        assert_eq!(last_name, "Silva");
        assert_eq!(age, 28);
        assert_eq!(address, "Rua Azul 10");
    }

    #[test]
    fn violations_are_reported_in_field_order() {
        let mut form = ClienteForm::default();
        assert_eq!(form.parse_inputs().unwrap_err(), ValidationError::EmptyName);

        form.name = "Ana".to_string();
        assert_eq!(
            form.parse_inputs().unwrap_err(),
            ValidationError::EmptyLastName
        );

        form.last_name = "Silva".to_string();
        assert_eq!(form.parse_inputs().unwrap_err(), ValidationError::InvalidAge);

        form.age = "28".to_string();
        assert_eq!(
            form.parse_inputs().unwrap_err(),
            ValidationError::EmptyAddress
        );
    }

    #[test]
    fn whitespace_only_text_is_empty() {
        let mut form = filled();
        form.name = "   ".to_string();
        assert!(form.name_has_error());
        assert_eq!(form.parse_inputs().unwrap_err(), ValidationError::EmptyName);
    }

    #[test]
    fn age_must_be_a_positive_integer() {
        let mut form = filled();
        for bad in ["0", "-3", "abc", "2.5", ""] {
            form.age = bad.to_string();
            assert!(form.age_has_error(), "{bad:?} should be invalid");
            assert_eq!(form.parse_inputs().unwrap_err(), ValidationError::InvalidAge);
        }
    }

    #[test]
    fn from_cliente_prefills_every_field() {
        let cliente = Cliente {
            id: 7,
            name: "Ana".to_string(),
            last_name: "Silva".to_string(),
            age: 28,
            address: "Rua Azul 10".to_string(),
        };
        let form = ClienteForm::from_cliente(&cliente);
        assert_eq!(form.name, "Ana");
        assert_eq!(form.age, "28");
        assert!(form.is_valid());
    }
}
