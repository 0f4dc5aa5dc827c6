use breakeven_sqlite::types::ClientId;
use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};

// In order to test the correctness of our permission checks in our endpoints,
// we define a declarative permission scheme, which is encoded as plain text
// into the `Authorization: Bearer <...>` header. This allows us to easily
// construct "tokens" for any account without signing anything.
#[derive(Serialize, Deserialize)]
pub struct Permissions {
    pub client_id: ClientId,
    #[serde(default)]
    pub admin: bool,
}

impl Permissions {
    pub fn client(client_id: ClientId) -> Self {
        Self {
            client_id,
            admin: false,
        }
    }

    pub fn admin() -> Self {
        Self {
            client_id: ClientId(uuid::Uuid::new_v4()),
            admin: true,
        }
    }
}

impl Display for Permissions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", serde_html_form::to_string(self).unwrap())
    }
}

impl FromStr for Permissions {
    type Err = serde_html_form::de::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let deserializer = serde_html_form::Deserializer::new(form_urlencoded::parse(s.as_bytes()));
        Self::deserialize(deserializer)
    }
}
