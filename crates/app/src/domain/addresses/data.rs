//! Shipping Address Data

/// Free-text address fields as entered on the checkout or profile form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressInput {
    pub address: String,
    pub city: String,
    pub region: String,
    pub postal_code: String,
}

impl AddressInput {
    /// The same address with surrounding whitespace removed from every field.
    ///
    /// Addresses are matched by content, so inputs are trimmed before lookup.
    #[must_use]
    pub fn trimmed(&self) -> Self {
        Self {
            address: self.address.trim().to_string(),
            city: self.city.trim().to_string(),
            region: self.region.trim().to_string(),
            postal_code: self.postal_code.trim().to_string(),
        }
    }

    /// Whether a courier could deliver here: street and city must be present.
    #[must_use]
    pub fn is_deliverable(&self) -> bool {
        !self.address.trim().is_empty() && !self.city.trim().is_empty()
    }

    /// Whether every field is blank.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        [&self.address, &self.city, &self.region, &self.postal_code]
            .iter()
            .all(|field| field.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(address: &str, city: &str) -> AddressInput {
        AddressInput {
            address: address.to_string(),
            city: city.to_string(),
            region: String::new(),
            postal_code: String::new(),
        }
    }

    #[test]
    fn deliverable_requires_street_and_city() {
        assert!(input("1 Main St", "Springfield").is_deliverable());
        assert!(!input("1 Main St", "").is_deliverable());
        assert!(!input("", "Springfield").is_deliverable());
        assert!(!input("   ", "Springfield").is_deliverable());
    }

    #[test]
    fn trimmed_strips_every_field() {
        let trimmed = AddressInput {
            address: " 1 Main St ".to_string(),
            city: "\tSpringfield".to_string(),
            region: " IL ".to_string(),
            postal_code: "62701 ".to_string(),
        }
        .trimmed();

        assert_eq!(
            trimmed,
            AddressInput {
                address: "1 Main St".to_string(),
                city: "Springfield".to_string(),
                region: "IL".to_string(),
                postal_code: "62701".to_string(),
            }
        );
    }

    #[test]
    fn blank_only_when_all_fields_empty() {
        assert!(AddressInput::default().is_blank());
        assert!(input(" ", " ").is_blank());
        assert!(!input("", "Springfield").is_blank());
    }
}
