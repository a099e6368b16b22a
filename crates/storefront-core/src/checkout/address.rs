//! Address types.

use crate::error::CommerceError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Country used when the shopper leaves it untouched.
pub const DEFAULT_COUNTRY: &str = "US";

/// A postal address as entered on the checkout form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    /// First name.
    #[serde(default)]
    pub first_name: String,
    /// Last name.
    #[serde(default)]
    pub last_name: String,
    /// Street address.
    #[serde(default)]
    pub street: String,
    /// City.
    #[serde(default)]
    pub city: String,
    /// State or province.
    #[serde(default)]
    pub state: String,
    /// ZIP or postal code.
    #[serde(default)]
    pub zip_code: String,
    /// Country code.
    #[serde(default)]
    pub country: String,
}

impl Default for Address {
    fn default() -> Self {
        Self {
            first_name: String::new(),
            last_name: String::new(),
            street: String::new(),
            city: String::new(),
            state: String::new(),
            zip_code: String::new(),
            country: DEFAULT_COUNTRY.to_string(),
        }
    }
}

impl Address {
    /// Get full name.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    /// Format as single line.
    pub fn one_line(&self) -> String {
        [
            self.street.as_str(),
            self.city.as_str(),
            self.state.as_str(),
            self.zip_code.as_str(),
            self.country.as_str(),
        ]
        .iter()
        .filter(|s| !s.trim().is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(", ")
    }

    /// Read a field.
    pub fn field(&self, field: AddressField) -> &str {
        match field {
            AddressField::FirstName => &self.first_name,
            AddressField::LastName => &self.last_name,
            AddressField::Street => &self.street,
            AddressField::City => &self.city,
            AddressField::State => &self.state,
            AddressField::ZipCode => &self.zip_code,
            AddressField::Country => &self.country,
        }
    }

    /// Overwrite a field.
    pub fn set_field(&mut self, field: AddressField, value: impl Into<String>) {
        let value = value.into();
        match field {
            AddressField::FirstName => self.first_name = value,
            AddressField::LastName => self.last_name = value,
            AddressField::Street => self.street = value,
            AddressField::City => self.city = value,
            AddressField::State => self.state = value,
            AddressField::ZipCode => self.zip_code = value,
            AddressField::Country => self.country = value,
        }
    }

    /// Required fields that are blank. Whitespace-only counts as blank.
    pub fn missing_fields(&self) -> Vec<AddressField> {
        AddressField::REQUIRED
            .iter()
            .copied()
            .filter(|f| self.field(*f).trim().is_empty())
            .collect()
    }

    /// Check that every required field is filled in.
    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }
}

/// A named field of the address form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressField {
    FirstName,
    LastName,
    Street,
    City,
    State,
    ZipCode,
    Country,
}

impl AddressField {
    /// Every field, in form order.
    pub const ALL: [AddressField; 7] = [
        AddressField::FirstName,
        AddressField::LastName,
        AddressField::Street,
        AddressField::City,
        AddressField::State,
        AddressField::ZipCode,
        AddressField::Country,
    ];

    /// Fields that must be non-empty before leaving the billing step.
    pub const REQUIRED: [AddressField; 6] = [
        AddressField::FirstName,
        AddressField::LastName,
        AddressField::Street,
        AddressField::City,
        AddressField::State,
        AddressField::ZipCode,
    ];

    /// Wire name of the field.
    pub fn as_str(&self) -> &'static str {
        match self {
            AddressField::FirstName => "firstName",
            AddressField::LastName => "lastName",
            AddressField::Street => "street",
            AddressField::City => "city",
            AddressField::State => "state",
            AddressField::ZipCode => "zipCode",
            AddressField::Country => "country",
        }
    }

    /// Form label.
    pub fn label(&self) -> &'static str {
        match self {
            AddressField::FirstName => "First name",
            AddressField::LastName => "Last name",
            AddressField::Street => "Street address",
            AddressField::City => "City",
            AddressField::State => "State",
            AddressField::ZipCode => "ZIP code",
            AddressField::Country => "Country",
        }
    }
}

impl fmt::Display for AddressField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AddressField {
    type Err = CommerceError;

    /// Accepts the wire name or its snake_case form.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_lowercase();
        AddressField::ALL
            .iter()
            .copied()
            .find(|f| f.as_str().to_lowercase() == normalized)
            .ok_or_else(|| CommerceError::Validation(format!("Unknown address field: {}", s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> Address {
        Address {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            street: "12 Analytical Way".to_string(),
            city: "London".to_string(),
            state: "LDN".to_string(),
            zip_code: "N1 9GU".to_string(),
            ..Address::default()
        }
    }

    #[test]
    fn test_default_country() {
        assert_eq!(Address::default().country, "US");
    }

    #[test]
    fn test_complete_address() {
        let address = filled();
        assert!(address.is_complete());
        assert_eq!(address.full_name(), "Ada Lovelace");
        assert_eq!(address.one_line(), "12 Analytical Way, London, LDN, N1 9GU, US");
    }

    #[test]
    fn test_whitespace_counts_as_missing() {
        let mut address = filled();
        address.set_field(AddressField::FirstName, "   ");
        assert_eq!(address.missing_fields(), vec![AddressField::FirstName]);
    }

    #[test]
    fn test_country_is_not_required() {
        let mut address = filled();
        address.country.clear();
        assert!(address.is_complete());
    }

    #[test]
    fn test_field_from_str() {
        assert_eq!("zipCode".parse::<AddressField>().unwrap(), AddressField::ZipCode);
        assert_eq!("zip_code".parse::<AddressField>().unwrap(), AddressField::ZipCode);
        assert_eq!("first-name".parse::<AddressField>().unwrap(), AddressField::FirstName);
        assert!("phone".parse::<AddressField>().is_err());
    }

    #[test]
    fn test_wire_shape() {
        let json = serde_json::to_value(filled()).unwrap();
        assert_eq!(json["zipCode"], "N1 9GU");
        assert_eq!(json["firstName"], "Ada");
    }
}
