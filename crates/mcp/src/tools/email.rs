// Email account tools

use super::{render, ParamKind, ParamSpec, ToolArgs, ToolDescriptor, ToolId};
use crate::error::ToolError;
use crate::protocol::CallToolResult;
use hostmcp_core::{HostingApi, HttpMethod};

const DOMAIN: ParamSpec = ParamSpec::required("domain", ParamKind::String, "Mail domain, e.g. example.com");
const EMAIL: ParamSpec = ParamSpec::required("email", ParamKind::String, "Full email address");

pub const TOOLS: &[ToolDescriptor] = &[
    ToolDescriptor {
        id: ToolId::ListEmailAccounts,
        description: "List the email accounts of a domain",
        params: &[DOMAIN],
    },
    ToolDescriptor {
        id: ToolId::CreateEmailAccount,
        description: "Create an email account on a domain",
        params: &[
            DOMAIN,
            EMAIL,
            ParamSpec::required("password", ParamKind::String, "Initial mailbox password"),
            ParamSpec::optional("quota_mb", ParamKind::Number, "Mailbox quota in megabytes"),
        ],
    },
    ToolDescriptor {
        id: ToolId::DeleteEmailAccount,
        description: "Delete an email account from a domain",
        params: &[DOMAIN, EMAIL],
    },
];

pub async fn list_accounts(api: &dyn HostingApi, args: &ToolArgs<'_>) -> Result<CallToolResult, ToolError> {
    let domain = args.required_str("domain")?;
    let accounts = api
        .invoke(
            HttpMethod::Get,
            &format!("/api/email/v1/domains/{domain}/accounts"),
            None,
        )
        .await?;
    Ok(render("Email accounts", &accounts))
}

pub async fn create_account(api: &dyn HostingApi, args: &ToolArgs<'_>) -> Result<CallToolResult, ToolError> {
    let domain = args.required_str("domain")?;
    args.required_str("email")?;
    args.required_str("password")?;

    let created = api
        .invoke(
            HttpMethod::Post,
            &format!("/api/email/v1/domains/{domain}/accounts"),
            Some(args.body(&["email", "password", "quota_mb"])),
        )
        .await?;
    Ok(render("Email account created", &created))
}

pub async fn delete_account(api: &dyn HostingApi, args: &ToolArgs<'_>) -> Result<CallToolResult, ToolError> {
    let domain = args.required_str("domain")?;
    let email = args.required_str("email")?;
    let result = api
        .invoke(
            HttpMethod::Delete,
            &format!("/api/email/v1/domains/{domain}/accounts/{email}"),
            None,
        )
        .await?;
    Ok(render("Email account deleted", &result))
}
