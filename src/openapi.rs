//! OpenAPI document for the gateway.
//!
//! The document root (info, tags, schemas, bearer scheme) is derived by
//! `utoipa`. The catalog paths are generated from [`OPERATIONS`], a static
//! table of per-operation metadata, by the [`CatalogOperations`] modifier.

use utoipa::{
    Modify, OpenApi,
    openapi::{
        ContentBuilder, Ref, Required, ResponseBuilder,
        path::{HttpMethod, Operation, OperationBuilder, ParameterBuilder, ParameterIn, PathItem},
        schema::{ObjectBuilder, Schema, Type},
        security::{Http, HttpAuthScheme, SecurityRequirement, SecurityScheme},
    },
};

use crate::{
    handlers::health::{self, HealthResponse},
    models::error_response::{ErrorDetail, ErrorResponse},
};

const BEARER_SCHEME: &str = "bearer_auth";
const API_TAG: &str = "api";

/// One documented query parameter.
#[derive(Debug, Clone, Copy)]
pub struct ParamDoc {
    pub name: &'static str,
    pub required: bool,
    pub description: &'static str,
}

/// Documentation metadata for one catalog operation.
#[derive(Debug, Clone, Copy)]
pub struct OperationDoc {
    /// Operation name, also the last path segment
    pub name: &'static str,
    pub summary: &'static str,
    pub description: &'static str,
    pub params: &'static [ParamDoc],
}

const ACCOUNT_NUMBER: ParamDoc = ParamDoc {
    name: "accountNumber",
    required: false,
    description: "Phone number in international format, digits only with an optional leading '+' sent as %2B",
};

const COUNTRY_ISOS: ParamDoc = ParamDoc {
    name: "countryIsos",
    required: false,
    description: "Two letter country codes, comma-separated or repeated; alias `countryIso`",
};

const PROVIDER_CODES: ParamDoc = ParamDoc {
    name: "providerCodes",
    required: false,
    description: "Provider codes, comma-separated or repeated; alias `providerCode`",
};

const REGION_CODES: ParamDoc = ParamDoc {
    name: "regionCodes",
    required: false,
    description: "Region codes, comma-separated or repeated; alias `regionCode`",
};

const SKU_CODES: ParamDoc = ParamDoc {
    name: "skuCodes",
    required: false,
    description: "Product SKU codes, comma-separated or repeated; alias `skuCode`",
};

const BENEFITS: ParamDoc = ParamDoc {
    name: "benefits",
    required: false,
    description: "Product benefits (e.g. Mobile, Minutes, Data), comma-separated or repeated; alias `benefit`",
};

const LANGUAGE_CODES: ParamDoc = ParamDoc {
    name: "languageCodes",
    required: false,
    description: "Language codes, comma-separated or repeated; alias `languageCode`",
};

/// Every catalog operation, in routing order.
pub const OPERATIONS: &[OperationDoc] = &[
    OperationDoc {
        name: "GetAccountLookup",
        summary: "Get providers and product information for a specific supported account number (phone number)",
        description: "Returns country, provider and region code details for the account number. This information can be then be used as input parameters to `GetProducts`",
        params: &[ParamDoc {
            required: true,
            ..ACCOUNT_NUMBER
        }],
    },
    OperationDoc {
        name: "GetCountries",
        summary: "Get a list of app supported countries",
        description: "Retrieves a list of standard two letter country codes that the system supports, along with the country name in English.",
        params: &[],
    },
    OperationDoc {
        name: "GetCurrencies",
        summary: "Get a list of app supported currencies",
        description: "Retrieves a list of standard three letter currency codes that the system supports, along with the currency name in English.",
        params: &[],
    },
    OperationDoc {
        name: "GetProductDescriptions",
        summary: "Get localized strings for app supported products descriptions",
        description: "Please see the documentation section on localization.",
        params: &[LANGUAGE_CODES, SKU_CODES],
    },
    OperationDoc {
        name: "GetProducts",
        summary: "Get a list of app supported products that can be used in SendTransfer",
        description: "This API returns a list of available products that satisfy request criteria.",
        params: &[
            COUNTRY_ISOS,
            PROVIDER_CODES,
            SKU_CODES,
            BENEFITS,
            REGION_CODES,
            ACCOUNT_NUMBER,
        ],
    },
    OperationDoc {
        name: "GetPromotionDescriptions",
        summary: "Get localized strings for promotions",
        description: "Please see the documentation section on localization.",
        params: &[LANGUAGE_CODES],
    },
    OperationDoc {
        name: "GetPromotions",
        summary: "Get a list of app supported promotions",
        description: "Returns a list promotions that may apply for the submitted criteria.",
        params: &[COUNTRY_ISOS, PROVIDER_CODES],
    },
    OperationDoc {
        name: "GetProviders",
        summary: "Get a list of app supported product providers available to the agent",
        description: "Retrieves the list of providers available to the agent.",
        params: &[PROVIDER_CODES, COUNTRY_ISOS, REGION_CODES, ACCOUNT_NUMBER],
    },
    OperationDoc {
        name: "GetProviderStatus",
        summary: "Get the current status of product providers",
        description: "Providers can be suspended or be in an error state. This API allows an agent to find out if it will be possible to send a transfer to a particular provider.",
        params: &[PROVIDER_CODES],
    },
    OperationDoc {
        name: "GetRegions",
        summary: "Get a list of app supported regions on the system",
        description: "Retrieves a list of app supported regions used in the system. Each region includes a Region Code, Region Name and CountryIso.",
        params: &[COUNTRY_ISOS],
    },
];

impl OperationDoc {
    pub fn path(&self) -> String {
        format!("/api/{}", self.name)
    }

    /// Build the OpenAPI operation: query parameters plus the 200/400/401 responses.
    pub fn to_operation(&self) -> Operation {
        let error_body = || {
            ContentBuilder::new()
                .schema(Some(Ref::from_schema_name("ErrorResponse")))
                .build()
        };

        let mut builder = OperationBuilder::new()
            .tag(API_TAG)
            .operation_id(Some(self.name))
            .summary(Some(self.summary))
            .description(Some(self.description))
            .security(SecurityRequirement::new(BEARER_SCHEME, Vec::<String>::new()))
            .response(
                "200",
                ResponseBuilder::new()
                    .description("Operation successful")
                    .content(
                        "application/json",
                        ContentBuilder::new()
                            .schema(Some(Schema::Object(ObjectBuilder::new().build())))
                            .build(),
                    )
                    .build(),
            )
            .response(
                "400",
                ResponseBuilder::new()
                    .description("Bad Request")
                    .content("application/json", error_body())
                    .build(),
            )
            .response(
                "401",
                ResponseBuilder::new()
                    .description("Session not authorized")
                    .content("application/json", error_body())
                    .build(),
            );

        for param in self.params {
            let required = if param.required {
                Required::True
            } else {
                Required::False
            };
            builder = builder.parameter(
                ParameterBuilder::new()
                    .name(param.name)
                    .parameter_in(ParameterIn::Query)
                    .required(required)
                    .description(Some(param.description))
                    .schema(Some(Schema::Object(
                        ObjectBuilder::new().schema_type(Type::String).build(),
                    )))
                    .build(),
            );
        }

        builder.build()
    }
}

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                BEARER_SCHEME,
                SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
            );
        }
    }
}

/// Inserts one GET path per entry of [`OPERATIONS`].
pub struct CatalogOperations;

impl Modify for CatalogOperations {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        for op in OPERATIONS {
            openapi
                .paths
                .paths
                .insert(op.path(), PathItem::new(HttpMethod::Get, op.to_operation()));
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon, &CatalogOperations),
    tags(
        (name = "api", description = "Read-only catalog of the top-up provider: countries, currencies, providers, products, promotions and regions."),
        (name = "Health", description = "Liveness of the gateway process.")
    ),
    info(
        title = "Top-up Gateway API",
        version = "0.1.0",
        description = "Read-only HTTP gateway in front of the Ding Connect top-up API."
    ),
    paths(health::health_check),
    components(schemas(ErrorResponse, ErrorDetail, HealthResponse))
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn operation_names_are_unique() {
        let names: HashSet<_> = OPERATIONS.iter().map(|op| op.name).collect();
        assert_eq!(names.len(), OPERATIONS.len());
        assert_eq!(OPERATIONS.len(), 10);
    }

    #[test]
    fn every_operation_is_documented_as_get() {
        let doc = ApiDoc::openapi();

        for op in OPERATIONS {
            let item = doc
                .paths
                .paths
                .get(&op.path())
                .unwrap_or_else(|| panic!("{} missing", op.path()));
            let get = item.get.as_ref().expect("GET operation");

            assert_eq!(get.summary.as_deref(), Some(op.summary));
            assert_eq!(get.operation_id.as_deref(), Some(op.name));
            for code in ["200", "400", "401"] {
                assert!(get.responses.responses.contains_key(code), "{} lacks {code}", op.name);
            }
        }
    }

    #[test]
    fn account_lookup_requires_account_number() {
        let doc = ApiDoc::openapi();
        let get = doc.paths.paths["/api/GetAccountLookup"].get.clone().unwrap();
        let params = get.parameters.unwrap();

        assert_eq!(params.len(), 1);
        assert_eq!(params[0].name, "accountNumber");
        assert!(matches!(params[0].required, Required::True));
        assert!(matches!(params[0].parameter_in, ParameterIn::Query));
    }

    #[test]
    fn parameterless_operations_declare_no_parameters() {
        let doc = ApiDoc::openapi();
        for path in ["/api/GetCountries", "/api/GetCurrencies"] {
            let get = doc.paths.paths[path].get.clone().unwrap();
            assert!(get.parameters.map_or(true, |p| p.is_empty()));
        }
    }

    #[test]
    fn list_parameters_name_their_alias() {
        let doc = ApiDoc::openapi();
        let get = doc.paths.paths["/api/GetProducts"].get.clone().unwrap();

        for param in get.parameters.unwrap() {
            let description = param.description.unwrap_or_default();
            if param.name == "accountNumber" {
                assert!(description.contains("%2B"));
                continue;
            }
            let alias = param.name.trim_end_matches('s');
            assert!(
                description.contains(&format!("alias `{alias}`")),
                "{}: {description}",
                param.name
            );
        }
    }

    #[test]
    fn bearer_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key(BEARER_SCHEME));
    }
}
