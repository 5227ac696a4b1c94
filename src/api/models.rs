use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Body of `PUT /fs` and `PUT /endpoint`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreateRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Map<String, Value>>,
}

/// Body of `PUT /auth` for an LDAP directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LdapSetupRequest {
    #[serde(rename = "type")]
    pub kind: String,
    pub server: String,
    #[serde(rename = "baseDN")]
    pub base_dn: String,
    pub admin_account: String,
    pub admin_account_pw: String,
}

/// One row of the `GET /fs` listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FsEntry {
    #[serde(rename = "fs-name")]
    pub fs_name: String,
    #[serde(rename = "endpoint-options", default)]
    pub endpoint_options: Option<Map<String, Value>>,
}

impl FsEntry {
    pub fn is_exported(&self) -> bool {
        self.endpoint_options.is_some()
    }

    /// `proto` of the export, if it has one and it is a string.
    pub fn protocol(&self) -> Option<&str> {
        self.endpoint_options
            .as_ref()
            .and_then(|options| options.get("proto"))
            .and_then(Value::as_str)
    }
}

/// Error payload returned together with a failing status code.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub rc: Option<i64>,
}
