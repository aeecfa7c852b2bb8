use serde::Deserialize;
use serde::Serialize;

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrivateUser {
    pub id: String,
    #[serde(rename = "display_name")]
    pub display_name: Option<String>,
    pub country: Option<String>,
    pub product: Option<String>,
}

impl PrivateUser {
    pub fn name(&self) -> &str {
        self.display_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(&self.id)
    }
}
