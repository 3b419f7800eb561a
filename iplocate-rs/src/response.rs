use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Geolocation and threat data for one address, as returned by `/lookup`.
///
/// The typed fields are a view over the received body. Serializing yields
/// that body unchanged, including fields not modelled here and explicit nulls.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(remote = "Self")]
pub struct LookupResponse {
    pub ip: String,
    pub country: Option<String>,
    /// ISO 3166-1 alpha-2
    pub country_code: Option<String>,
    pub is_eu: bool,
    pub city: Option<String>,
    pub continent: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub time_zone: Option<String>,
    pub postal_code: Option<String>,
    pub subdivision: Option<String>,
    /// ISO 4217
    pub currency_code: Option<String>,
    pub calling_code: Option<String>,
    /// CIDR range containing the address.
    pub network: Option<String>,
    pub asn: Option<Asn>,
    pub privacy: Privacy,
    pub company: Option<Company>,
    pub hosting: Option<Hosting>,
    pub abuse: Option<Abuse>,
    #[serde(skip)]
    raw: Value,
}

impl LookupResponse {
    /// The response body exactly as received.
    pub fn raw(&self) -> &Value {
        &self.raw
    }

    pub fn into_raw(self) -> Value {
        self.raw
    }
}

impl<'de> Deserialize<'de> for LookupResponse {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Value::deserialize(deserializer)?;
        let mut lookup = LookupResponse::deserialize(&raw)
            .map_err(<D::Error as de::Error>::custom)?;
        lookup.raw = raw;
        Ok(lookup)
    }
}

impl Serialize for LookupResponse {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.raw.serialize(serializer)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asn {
    /// e.g. "AS15169"
    pub asn: String,
    pub route: String,
    pub netname: String,
    pub name: String,
    pub country_code: String,
    pub domain: String,
    #[serde(rename = "type")]
    pub kind: AsnType,
    /// Regional Internet Registry
    pub rir: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AsnType {
    Isp,
    Hosting,
    Business,
    Education,
    Government,
    Inactive,
    Other(String),
}

impl AsnType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Isp => "isp",
            Self::Hosting => "hosting",
            Self::Business => "business",
            Self::Education => "education",
            Self::Government => "government",
            Self::Inactive => "inactive",
            Self::Other(other) => other,
        }
    }
}

impl From<String> for AsnType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "isp" => Self::Isp,
            "hosting" => Self::Hosting,
            "business" => Self::Business,
            "education" => Self::Education,
            "government" => Self::Government,
            "inactive" => Self::Inactive,
            _ => Self::Other(value),
        }
    }
}

impl From<AsnType> for String {
    fn from(value: AsnType) -> Self {
        match value {
            AsnType::Other(other) => other,
            known => known.as_str().to_string(),
        }
    }
}

/// Independent flags; any combination may be set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Privacy {
    /// Listed on a spam/abuse blocklist.
    pub is_abuser: bool,
    pub is_anonymous: bool,
    /// Unallocated or reserved address space.
    pub is_bogon: bool,
    pub is_hosting: bool,
    pub is_icloud_relay: bool,
    pub is_proxy: bool,
    pub is_tor: bool,
    pub is_vpn: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    pub name: String,
    pub domain: String,
    pub country_code: String,
    #[serde(rename = "type")]
    pub kind: CompanyType,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CompanyType {
    Isp,
    Hosting,
    Education,
    Government,
    Business,
    Inactive,
    Other(String),
}

impl CompanyType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Isp => "isp",
            Self::Hosting => "hosting",
            Self::Education => "education",
            Self::Government => "government",
            Self::Business => "business",
            Self::Inactive => "inactive",
            Self::Other(other) => other,
        }
    }
}

impl From<String> for CompanyType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "isp" => Self::Isp,
            "hosting" => Self::Hosting,
            "education" => Self::Education,
            "government" => Self::Government,
            "business" => Self::Business,
            "inactive" => Self::Inactive,
            _ => Self::Other(value),
        }
    }
}

impl From<CompanyType> for String {
    fn from(value: CompanyType) -> Self {
        match value {
            CompanyType::Other(other) => other,
            known => known.as_str().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Hosting {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
}

/// Abuse contact for the owning network.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Abuse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}
