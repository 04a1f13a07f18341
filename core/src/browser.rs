use serde::{Deserialize, Serialize};

/// File and image picker configuration. These are external collaborators:
/// the core never issues network calls, it only checks for their presence
/// when routing `insertImage`.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HttpMethod {
    #[default]
    #[serde(rename = "GET")]
    Get,
    #[serde(rename = "POST")]
    Post,
    #[serde(rename = "PUT")]
    Put,
    #[serde(rename = "DELETE")]
    Delete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayloadKind {
    #[default]
    Json,
    Jsonp,
    Xml,
    Html,
    Text,
}

/// Endpoint URL: fixed, or produced per request.
pub enum UrlSpec {
    Fixed(String),
    Provider(Box<dyn Fn() -> String>),
}

impl UrlSpec {
    pub fn resolve(&self) -> String {
        match self {
            UrlSpec::Fixed(url) => url.clone(),
            UrlSpec::Provider(f) => f(),
        }
    }
}

/// Builds the public URL of a stored asset from its folder path and name.
pub enum AssetUrl {
    Fixed(String),
    Builder(Box<dyn Fn(&str, &str) -> String>),
}

impl AssetUrl {
    pub fn resolve(&self, path: &str, file_name: &str) -> String {
        match self {
            AssetUrl::Fixed(url) => url.clone(),
            AssetUrl::Builder(f) => f(path, file_name),
        }
    }
}

#[derive(Default)]
pub struct TransportEndpoint {
    pub url: Option<UrlSpec>,
    pub method: HttpMethod,
    pub data_type: PayloadKind,
    pub content_type: Option<String>,
}

pub struct UploadEndpoint {
    pub url: String,
}

/// Remote listing/upload/delete/create transport for a picker.
#[derive(Default)]
pub struct BrowserTransport {
    pub read: Option<TransportEndpoint>,
    pub upload: Option<UploadEndpoint>,
    pub destroy: Option<TransportEndpoint>,
    pub create: Option<TransportEndpoint>,
    pub asset_url: Option<AssetUrl>,
    pub thumbnail_url: Option<AssetUrl>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SchemaField {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

/// Maps the listing response shape onto entry fields.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BrowserSchema {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: SchemaField,
    #[serde(default, rename = "type")]
    pub kind: SchemaField,
    #[serde(default)]
    pub size: SchemaField,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowserMessages {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upload_file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_by_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_by_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directory_not_found: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_folder: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delete_file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invalid_file_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overwrite_file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

#[derive(Default)]
pub struct FileBrowserOptions {
    /// Allowed extensions, e.g. "gif,jpg,jpeg,png".
    pub file_types: Option<String>,
    pub path: Option<String>,
    pub transport: Option<BrowserTransport>,
    pub schema: Option<BrowserSchema>,
    pub messages: Option<BrowserMessages>,
}

#[derive(Default)]
pub struct ImageBrowserOptions {
    pub file_types: Option<String>,
    pub path: Option<String>,
    pub transport: Option<BrowserTransport>,
    pub schema: Option<BrowserSchema>,
    pub messages: Option<BrowserMessages>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryKind {
    #[serde(rename = "f")]
    File,
    #[serde(rename = "d")]
    Directory,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowserEntry {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
}

/// A listing response from the read transport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrowserListing {
    pub data: Vec<BrowserEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
}

impl BrowserListing {
    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
