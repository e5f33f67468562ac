// Domain portfolio and DNS zone tools

use super::{render, ParamKind, ParamSpec, ToolArgs, ToolDescriptor, ToolId};
use crate::error::ToolError;
use crate::protocol::CallToolResult;
use hostmcp_core::{HostingApi, HttpMethod};
use serde_json::json;

const RECORD_TYPES: &[&str] = &["A", "AAAA", "CNAME", "MX", "TXT", "NS", "SRV", "CAA"];

const DEFAULT_TTL: u32 = 14400;

const DOMAIN: ParamSpec = ParamSpec::required("domain", ParamKind::String, "Domain name, e.g. example.com");

pub const TOOLS: &[ToolDescriptor] = &[
    ToolDescriptor {
        id: ToolId::ListDomains,
        description: "List all domains in the account portfolio",
        params: &[],
    },
    ToolDescriptor {
        id: ToolId::GetDomain,
        description: "Get registration details for a domain",
        params: &[DOMAIN],
    },
    ToolDescriptor {
        id: ToolId::CheckDomainAvailability,
        description: "Check whether a domain name is available for registration",
        params: &[
            ParamSpec::required("domain", ParamKind::String, "Domain name without TLD, e.g. example"),
            ParamSpec::optional("tld", ParamKind::String, "Top-level domain to check").with_default("com"),
        ],
    },
    ToolDescriptor {
        id: ToolId::GetDnsRecords,
        description: "Get the DNS zone records of a domain",
        params: &[DOMAIN],
    },
    ToolDescriptor {
        id: ToolId::UpdateDnsRecord,
        description: "Create or replace a DNS record in a domain's zone",
        params: &[
            DOMAIN,
            ParamSpec::required("type", ParamKind::Enum(RECORD_TYPES), "Record type"),
            ParamSpec::required("name", ParamKind::String, "Record name, '@' for the apex"),
            ParamSpec::required("value", ParamKind::String, "Record content"),
            ParamSpec::optional("ttl", ParamKind::Number, "Time to live in seconds (default 14400)"),
        ],
    },
];

pub async fn list_domains(api: &dyn HostingApi) -> Result<CallToolResult, ToolError> {
    let domains = api
        .invoke(HttpMethod::Get, "/api/domains/v1/portfolio", None)
        .await?;
    Ok(render("Domains", &domains))
}

pub async fn get_domain(api: &dyn HostingApi, args: &ToolArgs<'_>) -> Result<CallToolResult, ToolError> {
    let domain = args.required_str("domain")?;
    let details = api
        .invoke(
            HttpMethod::Get,
            &format!("/api/domains/v1/portfolio/{domain}"),
            None,
        )
        .await?;
    Ok(render("Domain details", &details))
}

pub async fn check_availability(
    api: &dyn HostingApi,
    args: &ToolArgs<'_>,
) -> Result<CallToolResult, ToolError> {
    let domain = args.required_str("domain")?;
    let tld = args.optional_str("tld").unwrap_or("com");
    let availability = api
        .invoke(
            HttpMethod::Post,
            "/api/domains/v1/availability",
            Some(json!({ "domain": domain, "tlds": [tld] })),
        )
        .await?;
    Ok(render("Domain availability", &availability))
}

pub async fn get_dns_records(
    api: &dyn HostingApi,
    args: &ToolArgs<'_>,
) -> Result<CallToolResult, ToolError> {
    let domain = args.required_str("domain")?;
    let records = api
        .invoke(HttpMethod::Get, &format!("/api/dns/v1/zones/{domain}"), None)
        .await?;
    Ok(render("DNS records", &records))
}

pub async fn update_dns_record(
    api: &dyn HostingApi,
    args: &ToolArgs<'_>,
) -> Result<CallToolResult, ToolError> {
    let domain = args.required_str("domain")?;
    let record_type = args.required_str("type")?;
    let name = args.required_str("name")?;
    let value = args.required_str("value")?;
    let ttl = args
        .optional_value("ttl")
        .cloned()
        .unwrap_or_else(|| json!(DEFAULT_TTL));

    let body = json!({
        "overwrite": false,
        "zone": [{
            "name": name,
            "type": record_type,
            "ttl": ttl,
            "records": [{ "content": value }]
        }]
    });
    let result = api
        .invoke(
            HttpMethod::Put,
            &format!("/api/dns/v1/zones/{domain}"),
            Some(body),
        )
        .await?;
    Ok(render("DNS record updated", &result))
}
