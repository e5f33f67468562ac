// SSL certificate tools

use super::{render, ParamKind, ParamSpec, ToolArgs, ToolDescriptor, ToolId};
use crate::error::ToolError;
use crate::protocol::CallToolResult;
use hostmcp_core::{HostingApi, HttpMethod};
use serde_json::json;

const CERTIFICATE_TYPES: &[&str] = &["lifetime", "letsencrypt", "custom"];

pub const TOOLS: &[ToolDescriptor] = &[
    ToolDescriptor {
        id: ToolId::ListSslCertificates,
        description: "List all SSL certificates",
        params: &[],
    },
    ToolDescriptor {
        id: ToolId::GetSslCertificate,
        description: "Get status and expiry of an SSL certificate",
        params: &[ParamSpec::required(
            "certificate_id",
            ParamKind::String,
            "SSL certificate ID",
        )],
    },
    ToolDescriptor {
        id: ToolId::InstallSslCertificate,
        description: "Install an SSL certificate on a domain",
        params: &[
            ParamSpec::required("domain", ParamKind::String, "Domain to secure"),
            ParamSpec::optional("type", ParamKind::Enum(CERTIFICATE_TYPES), "Certificate type")
                .with_default("lifetime"),
        ],
    },
];

pub async fn list_certificates(api: &dyn HostingApi) -> Result<CallToolResult, ToolError> {
    let certificates = api
        .invoke(HttpMethod::Get, "/api/ssl/v1/certificates", None)
        .await?;
    Ok(render("SSL certificates", &certificates))
}

pub async fn get_certificate(api: &dyn HostingApi, args: &ToolArgs<'_>) -> Result<CallToolResult, ToolError> {
    let certificate_id = args.required_str("certificate_id")?;
    let certificate = api
        .invoke(
            HttpMethod::Get,
            &format!("/api/ssl/v1/certificates/{certificate_id}"),
            None,
        )
        .await?;
    Ok(render("SSL certificate", &certificate))
}

pub async fn install_certificate(
    api: &dyn HostingApi,
    args: &ToolArgs<'_>,
) -> Result<CallToolResult, ToolError> {
    let domain = args.required_str("domain")?;
    let certificate_type = args.optional_str("type").unwrap_or("lifetime");
    let installed = api
        .invoke(
            HttpMethod::Post,
            "/api/ssl/v1/certificates",
            Some(json!({ "domain": domain, "type": certificate_type })),
        )
        .await?;
    Ok(render("SSL certificate installed", &installed))
}
