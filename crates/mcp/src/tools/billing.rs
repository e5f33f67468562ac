// Billing tools

use super::{render, ParamKind, ParamSpec, ToolArgs, ToolDescriptor, ToolId};
use crate::error::ToolError;
use crate::protocol::CallToolResult;
use hostmcp_core::{HostingApi, HttpMethod};

pub const TOOLS: &[ToolDescriptor] = &[
    ToolDescriptor {
        id: ToolId::ListInvoices,
        description: "List account invoices",
        params: &[],
    },
    ToolDescriptor {
        id: ToolId::GetInvoice,
        description: "Get a single invoice",
        params: &[ParamSpec::required("invoice_id", ParamKind::String, "Invoice ID")],
    },
];

pub async fn list_invoices(api: &dyn HostingApi) -> Result<CallToolResult, ToolError> {
    let invoices = api
        .invoke(HttpMethod::Get, "/api/billing/v1/invoices", None)
        .await?;
    Ok(render("Invoices", &invoices))
}

pub async fn get_invoice(api: &dyn HostingApi, args: &ToolArgs<'_>) -> Result<CallToolResult, ToolError> {
    let invoice_id = args.required_str("invoice_id")?;
    let invoice = api
        .invoke(
            HttpMethod::Get,
            &format!("/api/billing/v1/invoices/{invoice_id}"),
            None,
        )
        .await?;
    Ok(render("Invoice", &invoice))
}
