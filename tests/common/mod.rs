//! Common test utilities and fixtures for tokenboard tests
//!
//! Not every test binary uses every helper.
#![allow(dead_code)]

use tokenboard::service::{UploadRequest, UploadService};
use tokenboard_core::{SourceTool, Visibility};
use tokenboard_store::MemoryStore;

/// A row of the Cursor export fixture: (date, kind, model, tokens, cost)
pub type CursorRow<'a> = (&'a str, &'a str, &'a str, &'a str, &'a str);

/// Build a Cursor-format CSV from rows
pub fn cursor_csv(rows: &[CursorRow]) -> String {
    let mut csv = String::from("Date,Kind,Model,Max Mode,Total Tokens,Cost\n");
    for (date, kind, model, tokens, cost) in rows {
        let kind = if kind.contains(',') {
            format!("\"{kind}\"")
        } else {
            kind.to_string()
        };
        csv.push_str(&format!("{date},{kind},{model},off,{tokens},{cost}\n"));
    }
    csv
}

/// Build a generic-format CSV from (model, tokens, cost) rows
pub fn generic_csv(rows: &[(&str, &str, &str)]) -> String {
    let mut csv = String::from("model,total_tokens,cost_usd\n");
    for (model, tokens, cost) in rows {
        csv.push_str(&format!("{model},{tokens},{cost}\n"));
    }
    csv
}

/// An upload request with sensible test defaults
pub fn upload_request(display_name: &str, content: String) -> UploadRequest {
    UploadRequest {
        client_key: format!("client-{display_name}"),
        filename: "usage.csv".to_string(),
        content,
        declared_size: None,
        display_name: display_name.to_string(),
        visibility: Visibility::PublicMinimal,
        source_tool: SourceTool::Cursor,
        x_handle: None,
    }
}

/// A fresh service over an empty in-memory store
pub fn test_service() -> UploadService<MemoryStore> {
    UploadService::new(MemoryStore::new())
}
