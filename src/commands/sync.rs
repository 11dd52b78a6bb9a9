//! Spreadsheet Sync Command Wrappers

use serde::Serialize;
use crate::models::{MergeStrategy, SyncReport, SyncStatus};
use super::{call, call_no_args};

#[derive(Serialize)]
struct ReimportArgs {
    strategy: MergeStrategy,
}

/// Seed the local store on first launch
pub async fn ensure_initial_sync() -> Result<SyncReport, String> {
    call_no_args("ensure_initial_sync").await
}

pub async fn reimport_data(strategy: MergeStrategy) -> Result<SyncReport, String> {
    call("reimport_data", &ReimportArgs { strategy }).await
}

pub async fn get_sync_status() -> Result<SyncStatus, String> {
    call_no_args("get_sync_status").await
}
