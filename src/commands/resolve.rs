//! Resolve command handler

use anyhow::Result;

use ctxplan::presentation::factory::create_resolve_use_case;
use ctxplan::presentation::output::{render_resolve, resolve_json};
use ctxplan::presentation::OutputFormat;

use super::{print_json, Session};

pub fn cmd_resolve(session: &Session) -> Result<bool> {
    let use_case = create_resolve_use_case(&session.solution);
    let result = use_case.execute_with_cancellation(
        &session.solution,
        session.inventories(),
        &session.options,
        Some(session.cancel.as_ref()),
    )?;

    match session.format {
        OutputFormat::Json => print_json(&resolve_json(&result))?,
        OutputFormat::Text => print!("{}", render_resolve(&result)),
    }
    Ok(result.succeeded())
}
