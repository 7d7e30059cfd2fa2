use axum::http::StatusCode;
use maud::{html, Markup};

use super::layout;
use crate::error::ErrorReport;

/// Error page; `detail` is only shown outside production
pub fn error_page(status: StatusCode, report: &ErrorReport, show_detail: bool) -> Markup {
    layout(
        report.message.as_str(),
        html! {
            h1 { (report.message) }
            h2 { (status.as_u16()) }
            @if show_detail {
                pre { (report.detail) }
            }
        },
    )
}
