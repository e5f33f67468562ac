//! Tools exposed over MCP, one module per area of the hosting API.
//!
//! Every tool has a [`ToolId`] variant, a [`ToolDescriptor`] in its area's
//! `TOOLS` table and a handler reached through [`invoke`]. The match in
//! `invoke` is exhaustive, so adding a variant without a handler does not
//! compile; [`Catalog::new`] checks the descriptor side at startup.

pub mod backups;
pub mod billing;
pub mod domains;
pub mod email;
pub mod hosting;
mod registry;
pub mod ssl;
pub mod vps;

pub use registry::{Catalog, ParamKind, ParamSpec, ToolArgs, ToolDescriptor};

use crate::error::ToolError;
use crate::protocol::CallToolResult;
use hostmcp_core::HostingApi;
use serde_json::Value;

/// Identifier of every tool this server knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolId {
    ListDomains,
    GetDomain,
    CheckDomainAvailability,
    GetDnsRecords,
    UpdateDnsRecord,
    ListVps,
    GetVps,
    StartVps,
    StopVps,
    RestartVps,
    GetVpsMetrics,
    ListHostingAccounts,
    GetHostingAccount,
    GetHostingUsage,
    ListEmailAccounts,
    CreateEmailAccount,
    DeleteEmailAccount,
    ListSslCertificates,
    GetSslCertificate,
    InstallSslCertificate,
    ListBackups,
    CreateBackup,
    RestoreBackup,
    ListInvoices,
    GetInvoice,
}

impl ToolId {
    /// Every tool, in catalog order.
    pub const ALL: &'static [ToolId] = &[
        Self::ListDomains,
        Self::GetDomain,
        Self::CheckDomainAvailability,
        Self::GetDnsRecords,
        Self::UpdateDnsRecord,
        Self::ListVps,
        Self::GetVps,
        Self::StartVps,
        Self::StopVps,
        Self::RestartVps,
        Self::GetVpsMetrics,
        Self::ListHostingAccounts,
        Self::GetHostingAccount,
        Self::GetHostingUsage,
        Self::ListEmailAccounts,
        Self::CreateEmailAccount,
        Self::DeleteEmailAccount,
        Self::ListSslCertificates,
        Self::GetSslCertificate,
        Self::InstallSslCertificate,
        Self::ListBackups,
        Self::CreateBackup,
        Self::RestoreBackup,
        Self::ListInvoices,
        Self::GetInvoice,
    ];

    /// Wire name used in `tools/list` and `tools/call`.
    pub fn name(self) -> &'static str {
        match self {
            Self::ListDomains => "list_domains",
            Self::GetDomain => "get_domain",
            Self::CheckDomainAvailability => "check_domain_availability",
            Self::GetDnsRecords => "get_dns_records",
            Self::UpdateDnsRecord => "update_dns_record",
            Self::ListVps => "list_vps",
            Self::GetVps => "get_vps",
            Self::StartVps => "start_vps",
            Self::StopVps => "stop_vps",
            Self::RestartVps => "restart_vps",
            Self::GetVpsMetrics => "get_vps_metrics",
            Self::ListHostingAccounts => "list_hosting_accounts",
            Self::GetHostingAccount => "get_hosting_account",
            Self::GetHostingUsage => "get_hosting_usage",
            Self::ListEmailAccounts => "list_email_accounts",
            Self::CreateEmailAccount => "create_email_account",
            Self::DeleteEmailAccount => "delete_email_account",
            Self::ListSslCertificates => "list_ssl_certificates",
            Self::GetSslCertificate => "get_ssl_certificate",
            Self::InstallSslCertificate => "install_ssl_certificate",
            Self::ListBackups => "list_backups",
            Self::CreateBackup => "create_backup",
            Self::RestoreBackup => "restore_backup",
            Self::ListInvoices => "list_invoices",
            Self::GetInvoice => "get_invoice",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|id| id.name() == name)
    }
}

/// A `tools/call` target: a registered tool or whatever name the client sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedTool {
    Known(ToolId),
    Unknown(String),
}

impl ResolvedTool {
    pub fn resolve(name: &str) -> Self {
        match ToolId::from_name(name) {
            Some(id) => Self::Known(id),
            None => Self::Unknown(name.to_string()),
        }
    }
}

/// Descriptors from every area, in registration order.
pub(crate) fn registered_descriptors() -> impl Iterator<Item = &'static ToolDescriptor> {
    domains::TOOLS
        .iter()
        .chain(vps::TOOLS)
        .chain(hosting::TOOLS)
        .chain(email::TOOLS)
        .chain(ssl::TOOLS)
        .chain(backups::TOOLS)
        .chain(billing::TOOLS)
}

/// Run the handler bound to `id`.
pub async fn invoke(
    id: ToolId,
    api: &dyn HostingApi,
    args: &ToolArgs<'_>,
) -> Result<CallToolResult, ToolError> {
    match id {
        ToolId::ListDomains => domains::list_domains(api).await,
        ToolId::GetDomain => domains::get_domain(api, args).await,
        ToolId::CheckDomainAvailability => domains::check_availability(api, args).await,
        ToolId::GetDnsRecords => domains::get_dns_records(api, args).await,
        ToolId::UpdateDnsRecord => domains::update_dns_record(api, args).await,
        ToolId::ListVps => vps::list_vps(api).await,
        ToolId::GetVps => vps::get_vps(api, args).await,
        ToolId::StartVps => vps::power_action(api, args, vps::PowerAction::Start).await,
        ToolId::StopVps => vps::power_action(api, args, vps::PowerAction::Stop).await,
        ToolId::RestartVps => vps::power_action(api, args, vps::PowerAction::Restart).await,
        ToolId::GetVpsMetrics => vps::get_metrics(api, args).await,
        ToolId::ListHostingAccounts => hosting::list_accounts(api).await,
        ToolId::GetHostingAccount => hosting::get_account(api, args).await,
        ToolId::GetHostingUsage => hosting::get_usage(api, args).await,
        ToolId::ListEmailAccounts => email::list_accounts(api, args).await,
        ToolId::CreateEmailAccount => email::create_account(api, args).await,
        ToolId::DeleteEmailAccount => email::delete_account(api, args).await,
        ToolId::ListSslCertificates => ssl::list_certificates(api).await,
        ToolId::GetSslCertificate => ssl::get_certificate(api, args).await,
        ToolId::InstallSslCertificate => ssl::install_certificate(api, args).await,
        ToolId::ListBackups => backups::list_backups(api, args).await,
        ToolId::CreateBackup => backups::create_backup(api, args).await,
        ToolId::RestoreBackup => backups::restore_backup(api, args).await,
        ToolId::ListInvoices => billing::list_invoices(api).await,
        ToolId::GetInvoice => billing::get_invoice(api, args).await,
    }
}

/// Render an API payload as `"<label>: <pretty JSON>"`.
pub fn render(label: &str, payload: &Value) -> CallToolResult {
    let json = serde_json::to_string_pretty(payload).unwrap_or_else(|_| payload.to_string());
    CallToolResult::text(format!("{}: {}", label, json))
}

#[cfg(test)]
pub(crate) mod testing {
    //! Recording stand-in for the hosting API.

    use async_trait::async_trait;
    use hostmcp_core::{ApiError, ApiResult, HostingApi, HttpMethod};
    use serde_json::Value;
    use std::sync::Mutex;

    #[derive(Debug, Clone, PartialEq)]
    pub struct RecordedCall {
        pub method: HttpMethod,
        pub path: String,
        pub body: Option<Value>,
    }

    /// Answers every call with `response` (or a status error) and records it.
    pub struct RecordingApi {
        response: Result<Value, (u16, String)>,
        calls: Mutex<Vec<RecordedCall>>,
    }

    impl RecordingApi {
        pub fn returning(response: Value) -> Self {
            Self {
                response: Ok(response),
                calls: Mutex::new(Vec::new()),
            }
        }

        pub fn failing(status: u16, body: &str) -> Self {
            Self {
                response: Err((status, body.to_string())),
                calls: Mutex::new(Vec::new()),
            }
        }

        pub fn calls(&self) -> Vec<RecordedCall> {
            self.calls.lock().unwrap().clone()
        }

        pub fn last_call(&self) -> RecordedCall {
            self.calls().pop().expect("no API call was made")
        }
    }

    #[async_trait]
    impl HostingApi for RecordingApi {
        async fn invoke(&self, method: HttpMethod, path: &str, body: Option<Value>) -> ApiResult<Value> {
            self.calls.lock().unwrap().push(RecordedCall {
                method,
                path: path.to_string(),
                body,
            });
            match &self.response {
                Ok(value) => Ok(value.clone()),
                Err((status, body)) => Err(ApiError::from_response(*status, body.clone())),
            }
        }
    }
}
