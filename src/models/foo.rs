//! The single resource the service exposes.

use serde::{Deserialize, Serialize};

use crate::validation::{Constraints, Validate};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Foo {
    pub name: String,
    pub quantity: i64,
    pub owner: Owner,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    pub email: String,
}

impl Validate for Foo {
    fn constraints(&self, check: &mut Constraints) {
        check
            .not_blank("name", &self.name)
            .max_len("name", &self.name, 64)
            .range("quantity", self.quantity, 1, 1000)
            .nested("owner", &self.owner);
    }
}

impl Validate for Owner {
    fn constraints(&self, check: &mut Constraints) {
        check.email("email", &self.email);
    }
}
