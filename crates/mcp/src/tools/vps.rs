// Virtual private server tools

use super::{render, ParamKind, ParamSpec, ToolArgs, ToolDescriptor, ToolId};
use crate::error::ToolError;
use crate::protocol::CallToolResult;
use hostmcp_core::{HostingApi, HttpMethod};

const VPS_ID: ParamSpec = ParamSpec::required("vps_id", ParamKind::String, "Virtual machine ID");

const METRIC_PERIODS: &[&str] = &["1h", "24h", "7d", "30d"];

pub const TOOLS: &[ToolDescriptor] = &[
    ToolDescriptor {
        id: ToolId::ListVps,
        description: "List all virtual private servers",
        params: &[],
    },
    ToolDescriptor {
        id: ToolId::GetVps,
        description: "Get details of a virtual private server",
        params: &[VPS_ID],
    },
    ToolDescriptor {
        id: ToolId::StartVps,
        description: "Start a stopped virtual private server",
        params: &[VPS_ID],
    },
    ToolDescriptor {
        id: ToolId::StopVps,
        description: "Stop a running virtual private server",
        params: &[VPS_ID],
    },
    ToolDescriptor {
        id: ToolId::RestartVps,
        description: "Restart a virtual private server",
        params: &[VPS_ID],
    },
    ToolDescriptor {
        id: ToolId::GetVpsMetrics,
        description: "Get CPU, memory, disk and network metrics of a virtual private server",
        params: &[
            VPS_ID,
            ParamSpec::optional("period", ParamKind::Enum(METRIC_PERIODS), "Metrics window")
                .with_default("24h"),
        ],
    },
];

/// Power state transitions exposed as separate tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerAction {
    Start,
    Stop,
    Restart,
}

impl PowerAction {
    fn path_segment(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Stop => "stop",
            Self::Restart => "restart",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Start => "VPS start initiated",
            Self::Stop => "VPS stop initiated",
            Self::Restart => "VPS restart initiated",
        }
    }
}

pub async fn list_vps(api: &dyn HostingApi) -> Result<CallToolResult, ToolError> {
    let machines = api
        .invoke(HttpMethod::Get, "/api/vps/v1/virtual-machines", None)
        .await?;
    Ok(render("VPS instances", &machines))
}

pub async fn get_vps(api: &dyn HostingApi, args: &ToolArgs<'_>) -> Result<CallToolResult, ToolError> {
    let vps_id = args.required_str("vps_id")?;
    let machine = api
        .invoke(
            HttpMethod::Get,
            &format!("/api/vps/v1/virtual-machines/{vps_id}"),
            None,
        )
        .await?;
    Ok(render("VPS details", &machine))
}

pub async fn power_action(
    api: &dyn HostingApi,
    args: &ToolArgs<'_>,
    action: PowerAction,
) -> Result<CallToolResult, ToolError> {
    let vps_id = args.required_str("vps_id")?;
    let result = api
        .invoke(
            HttpMethod::Post,
            &format!(
                "/api/vps/v1/virtual-machines/{vps_id}/{}",
                action.path_segment()
            ),
            None,
        )
        .await?;
    Ok(render(action.label(), &result))
}

pub async fn get_metrics(api: &dyn HostingApi, args: &ToolArgs<'_>) -> Result<CallToolResult, ToolError> {
    let vps_id = args.required_str("vps_id")?;
    let period = args.optional_str("period").unwrap_or("24h");
    let metrics = api
        .invoke(
            HttpMethod::Get,
            &format!("/api/vps/v1/virtual-machines/{vps_id}/metrics?period={period}"),
            None,
        )
        .await?;
    Ok(render("VPS metrics", &metrics))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::invoke;
    use crate::tools::testing::RecordingApi;
    use serde_json::{json, Value};

    async fn call(api: &RecordingApi, id: ToolId, arguments: Value) -> Result<CallToolResult, ToolError> {
        let descriptor = TOOLS.iter().find(|d| d.id == id).unwrap();
        let values = descriptor.validate(&arguments)?;
        invoke(id, api, &ToolArgs::new(&values, descriptor.params)).await
    }

    #[tokio::test]
    async fn test_power_actions_post_to_action_path() {
        let cases = [
            (ToolId::StartVps, "start", "VPS start initiated: "),
            (ToolId::StopVps, "stop", "VPS stop initiated: "),
            (ToolId::RestartVps, "restart", "VPS restart initiated: "),
        ];

        for (id, segment, label) in cases {
            let api = RecordingApi::returning(json!({"state": "pending"}));
            let result = call(&api, id, json!({"vps_id": "1042"})).await.unwrap();

            let recorded = api.last_call();
            assert_eq!(recorded.method, HttpMethod::Post);
            assert_eq!(recorded.path, format!("/api/vps/v1/virtual-machines/1042/{segment}"));
            assert_eq!(recorded.body, None);
            assert!(result.content[0].as_text().starts_with(label));
        }
    }

    #[tokio::test]
    async fn test_metrics_period_defaults_to_24h() {
        let api = RecordingApi::returning(json!({"cpu": []}));
        call(&api, ToolId::GetVpsMetrics, json!({"vps_id": "7"})).await.unwrap();

        assert_eq!(
            api.last_call().path,
            "/api/vps/v1/virtual-machines/7/metrics?period=24h"
        );
    }

    #[tokio::test]
    async fn test_metrics_explicit_period() {
        let api = RecordingApi::returning(json!({"cpu": []}));
        call(&api, ToolId::GetVpsMetrics, json!({"vps_id": "7", "period": "7d"}))
            .await
            .unwrap();

        assert_eq!(
            api.last_call().path,
            "/api/vps/v1/virtual-machines/7/metrics?period=7d"
        );
    }

    #[tokio::test]
    async fn test_api_failure_propagates() {
        let api = RecordingApi::failing(409, "VPS is already running");
        let err = call(&api, ToolId::StartVps, json!({"vps_id": "1"})).await.unwrap_err();

        assert_eq!(
            err.to_string(),
            "API request failed with status 409: VPS is already running"
        );
    }
}
