use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the five columns of an entry, in table order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Name,
    Breed,
    Owner,
    Judge,
    Award,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::Name,
        Field::Breed,
        Field::Owner,
        Field::Judge,
        Field::Award,
    ];

    pub fn from_position(position: usize) -> Option<Field> {
        Self::ALL.get(position).copied()
    }

    pub fn position(self) -> usize {
        match self {
            Field::Name => 0,
            Field::Breed => 1,
            Field::Owner => 2,
            Field::Judge => 3,
            Field::Award => 4,
        }
    }

    /// Attribute name used in the XML file and the report columns.
    pub fn name(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Breed => "breed",
            Field::Owner => "owner",
            Field::Judge => "judge",
            Field::Award => "award",
        }
    }

    /// Column header shown to the user.
    pub fn label(self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Breed => "Breed",
            Field::Owner => "Owner",
            Field::Judge => "Judge",
            Field::Award => "Award",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Field::ALL
            .into_iter()
            .find(|field| field.name() == lower)
            .ok_or_else(|| {
                format!("unknown field '{s}' (expected one of name, breed, owner, judge, award)")
            })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DogEntry {
    pub name: String,
    pub breed: String,
    pub owner: String,
    pub judge: String,
    pub award: String,
}

impl DogEntry {
    pub fn new(
        name: impl Into<String>,
        breed: impl Into<String>,
        owner: impl Into<String>,
        judge: impl Into<String>,
        award: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            breed: breed.into(),
            owner: owner.into(),
            judge: judge.into(),
            award: award.into(),
        }
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Breed => &self.breed,
            Field::Owner => &self.owner,
            Field::Judge => &self.judge,
            Field::Award => &self.award,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let slot = match field {
            Field::Name => &mut self.name,
            Field::Breed => &mut self.breed,
            Field::Owner => &mut self.owner,
            Field::Judge => &mut self.judge,
            Field::Award => &mut self.award,
        };
        *slot = value.into();
    }

    /// Values in column order, for logging and table rendering.
    pub fn values(&self) -> [&str; 5] {
        Field::ALL.map(|field| self.get(field))
    }
}

impl fmt::Display for DogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.values().join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positions_follow_column_order() {
        for (i, field) in Field::ALL.iter().enumerate() {
            assert_eq!(field.position(), i);
            assert_eq!(Field::from_position(i), Some(*field));
        }
        assert_eq!(Field::from_position(5), None);
    }

    #[test]
    fn parses_field_names_case_insensitively() {
        assert_eq!("Breed".parse::<Field>(), Ok(Field::Breed));
        assert_eq!(" award ".parse::<Field>(), Ok(Field::Award));
        assert!("colour".parse::<Field>().is_err());
    }

    #[test]
    fn get_and_set_address_the_same_slot() {
        let mut entry = DogEntry::default();
        for field in Field::ALL {
            entry.set(field, field.label());
        }
        assert_eq!(entry.values(), ["Name", "Breed", "Owner", "Judge", "Award"]);
    }
}
