// VPS backup tools

use super::{render, ParamKind, ParamSpec, ToolArgs, ToolDescriptor, ToolId};
use crate::error::ToolError;
use crate::protocol::CallToolResult;
use hostmcp_core::{HostingApi, HttpMethod};

const VPS_ID: ParamSpec = ParamSpec::required("vps_id", ParamKind::String, "Virtual machine ID");

pub const TOOLS: &[ToolDescriptor] = &[
    ToolDescriptor {
        id: ToolId::ListBackups,
        description: "List the backups of a virtual private server",
        params: &[VPS_ID],
    },
    ToolDescriptor {
        id: ToolId::CreateBackup,
        description: "Create a new backup of a virtual private server",
        params: &[VPS_ID],
    },
    ToolDescriptor {
        id: ToolId::RestoreBackup,
        description: "Restore a virtual private server from one of its backups",
        params: &[
            VPS_ID,
            ParamSpec::required("backup_id", ParamKind::String, "Backup ID to restore"),
        ],
    },
];

fn backups_path(vps_id: &str) -> String {
    format!("/api/vps/v1/virtual-machines/{vps_id}/backups")
}

pub async fn list_backups(api: &dyn HostingApi, args: &ToolArgs<'_>) -> Result<CallToolResult, ToolError> {
    let vps_id = args.required_str("vps_id")?;
    let backups = api
        .invoke(HttpMethod::Get, &backups_path(vps_id), None)
        .await?;
    Ok(render("Backups", &backups))
}

pub async fn create_backup(api: &dyn HostingApi, args: &ToolArgs<'_>) -> Result<CallToolResult, ToolError> {
    let vps_id = args.required_str("vps_id")?;
    let backup = api
        .invoke(HttpMethod::Post, &backups_path(vps_id), None)
        .await?;
    Ok(render("Backup created", &backup))
}

pub async fn restore_backup(api: &dyn HostingApi, args: &ToolArgs<'_>) -> Result<CallToolResult, ToolError> {
    let vps_id = args.required_str("vps_id")?;
    let backup_id = args.required_str("backup_id")?;
    let result = api
        .invoke(
            HttpMethod::Post,
            &format!("{}/{backup_id}/restore", backups_path(vps_id)),
            None,
        )
        .await?;
    Ok(render("Backup restore initiated", &result))
}
