//! Query-parameter bags for the catalog endpoints.
//!
//! Each parameterised operation has its own struct. Names on the wire are
//! camelCase. List filters arrive comma-separated (`countryIsos=US,GB`),
//! as repeated keys (`countryIsos=US&countryIsos=GB`) or under a singular
//! alias (`countryIso=US`), in any mix. Unknown parameters are ignored.
//!
//! Bags are validated after decoding but never normalised: the service
//! receives exactly what the caller sent.

use serde::{Deserialize, Deserializer, Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};

/// Behaviour shared by every query bag.
pub trait QueryParams: DeserializeOwned {
    /// Singular spellings accepted for list keys, as `(alias, key)`.
    const ALIASES: &'static [(&'static str, &'static str)] = &[];

    /// Reject values the provider contract cannot accept.
    fn validate(&self) -> Result<(), String> {
        Ok(())
    }

    /// Provider wire form, with list filters expanded into repeated keys.
    fn query_pairs(&self) -> Vec<(&'static str, String)>;
}

/// Decode a raw query string into `T`.
///
/// Aliases are mapped to their key first, then every occurrence of a key is
/// joined with commas, so repeated keys and comma lists decode the same way.
pub fn decode_query<T: QueryParams>(raw: &str) -> Result<T, String> {
    let mut fields = Map::new();

    for (key, value) in url::form_urlencoded::parse(raw.as_bytes()) {
        let key = T::ALIASES
            .iter()
            .find(|(alias, _)| *alias == key)
            .map_or(&*key, |(_, canonical)| *canonical);

        match fields.get_mut(key) {
            Some(Value::String(existing)) => {
                existing.push(',');
                existing.push_str(&value);
            }
            _ => {
                fields.insert(key.to_string(), Value::String(value.into_owned()));
            }
        }
    }

    serde_json::from_value(Value::Object(fields))
        .map_err(|e| format!("Failed to deserialize query string: {e}"))
}

/// Split a comma-separated value into its entries.
fn comma_separated<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(raw.split(',').map(|s| s.trim().to_string()).collect())
}

fn push_list(pairs: &mut Vec<(&'static str, String)>, key: &'static str, values: &[String]) {
    pairs.extend(values.iter().map(|v| (key, v.clone())));
}

fn push_opt(pairs: &mut Vec<(&'static str, String)>, key: &'static str, value: &Option<String>) {
    if let Some(v) = value {
        pairs.push((key, v.clone()));
    }
}

fn validate_account_number(value: &str) -> Result<(), String> {
    // A raw '+' in a query string decodes to a space
    if value.starts_with(' ') {
        return Err(
            "accountNumber starts with a space; send a leading '+' percent-encoded as %2B"
                .to_string(),
        );
    }
    let digits = value.strip_prefix('+').unwrap_or(value);
    if digits.is_empty() {
        return Err("accountNumber must not be empty".to_string());
    }
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(format!("accountNumber '{value}' must contain only digits"));
    }
    Ok(())
}

fn validate_country_isos(values: &[String]) -> Result<(), String> {
    for iso in values {
        if iso.len() != 2 || !iso.bytes().all(|b| b.is_ascii_alphabetic()) {
            return Err(format!(
                "countryIsos entry '{iso}' is not a two letter country code"
            ));
        }
    }
    Ok(())
}

fn validate_non_empty(field: &str, values: &[String]) -> Result<(), String> {
    if values.iter().any(|v| v.is_empty()) {
        return Err(format!("{field} must not contain empty entries"));
    }
    Ok(())
}

/// `GetAccountLookup` parameters.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetAccountLookupQuery {
    /// Phone number to look up, international format without separators
    pub account_number: String,
}

impl QueryParams for GetAccountLookupQuery {
    fn validate(&self) -> Result<(), String> {
        validate_account_number(&self.account_number)
    }

    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![("accountNumber", self.account_number.clone())]
    }
}

/// `GetProductDescriptions` parameters.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetProductDescriptionsQuery {
    #[serde(default, deserialize_with = "comma_separated")]
    pub language_codes: Vec<String>,

    #[serde(default, deserialize_with = "comma_separated")]
    pub sku_codes: Vec<String>,
}

impl QueryParams for GetProductDescriptionsQuery {
    const ALIASES: &'static [(&'static str, &'static str)] = &[
        ("languageCode", "languageCodes"),
        ("skuCode", "skuCodes"),
    ];

    fn validate(&self) -> Result<(), String> {
        validate_non_empty("languageCodes", &self.language_codes)?;
        validate_non_empty("skuCodes", &self.sku_codes)
    }

    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        push_list(&mut pairs, "languageCodes", &self.language_codes);
        push_list(&mut pairs, "skuCodes", &self.sku_codes);
        pairs
    }
}

/// `GetProducts` parameters.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetProductsQuery {
    #[serde(default, deserialize_with = "comma_separated")]
    pub country_isos: Vec<String>,

    #[serde(default, deserialize_with = "comma_separated")]
    pub provider_codes: Vec<String>,

    #[serde(default, deserialize_with = "comma_separated")]
    pub sku_codes: Vec<String>,

    #[serde(default, deserialize_with = "comma_separated")]
    pub benefits: Vec<String>,

    #[serde(default, deserialize_with = "comma_separated")]
    pub region_codes: Vec<String>,

    #[serde(default)]
    pub account_number: Option<String>,
}

impl QueryParams for GetProductsQuery {
    const ALIASES: &'static [(&'static str, &'static str)] = &[
        ("countryIso", "countryIsos"),
        ("providerCode", "providerCodes"),
        ("skuCode", "skuCodes"),
        ("benefit", "benefits"),
        ("regionCode", "regionCodes"),
    ];

    fn validate(&self) -> Result<(), String> {
        validate_country_isos(&self.country_isos)?;
        validate_non_empty("providerCodes", &self.provider_codes)?;
        validate_non_empty("skuCodes", &self.sku_codes)?;
        validate_non_empty("benefits", &self.benefits)?;
        validate_non_empty("regionCodes", &self.region_codes)?;
        if let Some(account_number) = &self.account_number {
            validate_account_number(account_number)?;
        }
        Ok(())
    }

    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        push_list(&mut pairs, "countryIsos", &self.country_isos);
        push_list(&mut pairs, "providerCodes", &self.provider_codes);
        push_list(&mut pairs, "skuCodes", &self.sku_codes);
        push_list(&mut pairs, "benefits", &self.benefits);
        push_list(&mut pairs, "regionCodes", &self.region_codes);
        push_opt(&mut pairs, "accountNumber", &self.account_number);
        pairs
    }
}

/// `GetPromotionDescriptions` parameters.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetPromotionDescriptionsQuery {
    #[serde(default, deserialize_with = "comma_separated")]
    pub language_codes: Vec<String>,
}

impl QueryParams for GetPromotionDescriptionsQuery {
    const ALIASES: &'static [(&'static str, &'static str)] = &[
        ("languageCode", "languageCodes"),
    ];

    fn validate(&self) -> Result<(), String> {
        validate_non_empty("languageCodes", &self.language_codes)
    }

    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        push_list(&mut pairs, "languageCodes", &self.language_codes);
        pairs
    }
}

/// `GetPromotions` parameters.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetPromotionsQuery {
    #[serde(default, deserialize_with = "comma_separated")]
    pub country_isos: Vec<String>,

    #[serde(default, deserialize_with = "comma_separated")]
    pub provider_codes: Vec<String>,
}

impl QueryParams for GetPromotionsQuery {
    const ALIASES: &'static [(&'static str, &'static str)] = &[
        ("countryIso", "countryIsos"),
        ("providerCode", "providerCodes"),
    ];

    fn validate(&self) -> Result<(), String> {
        validate_country_isos(&self.country_isos)?;
        validate_non_empty("providerCodes", &self.provider_codes)
    }

    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        push_list(&mut pairs, "countryIsos", &self.country_isos);
        push_list(&mut pairs, "providerCodes", &self.provider_codes);
        pairs
    }
}

/// `GetProviders` parameters.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetProvidersQuery {
    #[serde(default, deserialize_with = "comma_separated")]
    pub provider_codes: Vec<String>,

    #[serde(default, deserialize_with = "comma_separated")]
    pub country_isos: Vec<String>,

    #[serde(default, deserialize_with = "comma_separated")]
    pub region_codes: Vec<String>,

    #[serde(default)]
    pub account_number: Option<String>,
}

impl QueryParams for GetProvidersQuery {
    const ALIASES: &'static [(&'static str, &'static str)] = &[
        ("providerCode", "providerCodes"),
        ("countryIso", "countryIsos"),
        ("regionCode", "regionCodes"),
    ];

    fn validate(&self) -> Result<(), String> {
        validate_non_empty("providerCodes", &self.provider_codes)?;
        validate_country_isos(&self.country_isos)?;
        validate_non_empty("regionCodes", &self.region_codes)?;
        if let Some(account_number) = &self.account_number {
            validate_account_number(account_number)?;
        }
        Ok(())
    }

    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        push_list(&mut pairs, "providerCodes", &self.provider_codes);
        push_list(&mut pairs, "countryIsos", &self.country_isos);
        push_list(&mut pairs, "regionCodes", &self.region_codes);
        push_opt(&mut pairs, "accountNumber", &self.account_number);
        pairs
    }
}

/// `GetProviderStatus` parameters.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetProviderStatusQuery {
    #[serde(default, deserialize_with = "comma_separated")]
    pub provider_codes: Vec<String>,
}

impl QueryParams for GetProviderStatusQuery {
    const ALIASES: &'static [(&'static str, &'static str)] = &[
        ("providerCode", "providerCodes"),
    ];

    fn validate(&self) -> Result<(), String> {
        validate_non_empty("providerCodes", &self.provider_codes)
    }

    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        push_list(&mut pairs, "providerCodes", &self.provider_codes);
        pairs
    }
}

/// `GetRegions` parameters.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetRegionsQuery {
    #[serde(default, deserialize_with = "comma_separated")]
    pub country_isos: Vec<String>,
}

impl QueryParams for GetRegionsQuery {
    const ALIASES: &'static [(&'static str, &'static str)] = &[
        ("countryIso", "countryIsos"),
    ];

    fn validate(&self) -> Result<(), String> {
        validate_country_isos(&self.country_isos)
    }

    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        push_list(&mut pairs, "countryIsos", &self.country_isos);
        pairs
    }
}
