use serde::{Deserialize, Deserializer, Serialize};

/// An assignee as returned by `GET /user/listar`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    #[serde(default)]
    pub user_name: String,
    #[serde(default, deserialize_with = "active_flag")]
    pub is_active: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ActiveFlag {
    Flag(bool),
    Number(i64),
    Text(String),
}

// The service has answered with "true", true and 1 for the same field.
fn active_flag<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<ActiveFlag>::deserialize(deserializer)?;
    Ok(raw.map(|flag| match flag {
        ActiveFlag::Flag(value) => value.to_string(),
        ActiveFlag::Number(value) => value.to_string(),
        ActiveFlag::Text(value) => value,
    }))
}

#[cfg(test)]
mod tests {
    use super::User;

    #[test]
    fn active_flag_accepts_text_and_booleans() {
        let users: Vec<User> = serde_json::from_value(serde_json::json!([
            { "id": 1, "userName": "ana", "isActive": "S" },
            { "id": 2, "userName": "luis", "isActive": true },
            { "id": 3, "userName": "eva" }
        ]))
        .unwrap();

        assert_eq!(users[0].is_active.as_deref(), Some("S"));
        assert_eq!(users[1].is_active.as_deref(), Some("true"));
        assert_eq!(users[2].is_active, None);
        assert_eq!(users[2].user_name, "eva");
    }
}
