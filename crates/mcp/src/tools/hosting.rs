// Shared hosting account tools

use super::{render, ParamKind, ParamSpec, ToolArgs, ToolDescriptor, ToolId};
use crate::error::ToolError;
use crate::protocol::CallToolResult;
use hostmcp_core::{HostingApi, HttpMethod};

const ACCOUNT_ID: ParamSpec =
    ParamSpec::required("account_id", ParamKind::String, "Hosting account ID");

const USAGE_PERIODS: &[&str] = &["24h", "7d", "30d", "90d"];

pub const TOOLS: &[ToolDescriptor] = &[
    ToolDescriptor {
        id: ToolId::ListHostingAccounts,
        description: "List all web hosting accounts",
        params: &[],
    },
    ToolDescriptor {
        id: ToolId::GetHostingAccount,
        description: "Get details of a web hosting account",
        params: &[ACCOUNT_ID],
    },
    ToolDescriptor {
        id: ToolId::GetHostingUsage,
        description: "Get resource usage (bandwidth, disk, inodes) of a web hosting account",
        params: &[
            ACCOUNT_ID,
            ParamSpec::optional("period", ParamKind::Enum(USAGE_PERIODS), "Usage window")
                .with_default("30d"),
        ],
    },
];

pub async fn list_accounts(api: &dyn HostingApi) -> Result<CallToolResult, ToolError> {
    let accounts = api
        .invoke(HttpMethod::Get, "/api/hosting/v1/accounts", None)
        .await?;
    Ok(render("Hosting accounts", &accounts))
}

pub async fn get_account(api: &dyn HostingApi, args: &ToolArgs<'_>) -> Result<CallToolResult, ToolError> {
    let account_id = args.required_str("account_id")?;
    let account = api
        .invoke(
            HttpMethod::Get,
            &format!("/api/hosting/v1/accounts/{account_id}"),
            None,
        )
        .await?;
    Ok(render("Hosting account", &account))
}

pub async fn get_usage(api: &dyn HostingApi, args: &ToolArgs<'_>) -> Result<CallToolResult, ToolError> {
    let account_id = args.required_str("account_id")?;
    let period = args.optional_str("period").unwrap_or("30d");
    let usage = api
        .invoke(
            HttpMethod::Get,
            &format!("/api/hosting/v1/accounts/{account_id}/usage?period={period}"),
            None,
        )
        .await?;
    Ok(render("Hosting usage", &usage))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::invoke;
    use crate::tools::testing::RecordingApi;
    use serde_json::json;

    #[tokio::test]
    async fn test_usage_period_defaults_to_30d() {
        let api = RecordingApi::returning(json!({"disk_mb": 512}));
        let descriptor = &TOOLS[2];
        let values = descriptor.validate(&json!({"account_id": "h-1"})).unwrap();

        let result = invoke(
            ToolId::GetHostingUsage,
            &api,
            &ToolArgs::new(&values, descriptor.params),
        )
        .await
        .unwrap();

        assert_eq!(api.last_call().path, "/api/hosting/v1/accounts/h-1/usage?period=30d");
        assert!(result.content[0].as_text().contains("\"disk_mb\": 512"));
    }
}
