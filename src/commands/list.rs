//! List command handlers
//!
//! `packs`, `dependencies`, `configs` and `components` resolve the selection
//! without writing the build index or the context set.

use anyhow::{Context, Result};

use ctxplan::application::{
    list_boards, list_components, list_configs, list_contexts, list_dependencies, list_devices,
    list_packs, list_toolchains, ResolveResult,
};
use ctxplan::domain::ports::ContextSetRepository;
use ctxplan::domain::services::{ContextSetRequest, SelectionRequest};
use ctxplan::domain::value_objects::ContextOrder;
use ctxplan::infrastructure::YamlContextSetRepository;
use ctxplan::presentation::factory::{create_layer_query_use_case, create_resolve_use_case};
use ctxplan::presentation::output::{render_layers, render_lines, render_paths, render_toolchains};
use ctxplan::presentation::{ListCommand, OutputFormat};

use super::{print_json, Session};

pub fn cmd_list(session: &Session, command: &ListCommand) -> Result<bool> {
    match command {
        ListCommand::Contexts { filter, .. } => {
            let request = selection_request(session, session.list_order)?;
            let contexts = list_contexts(&session.solution, &request, filter.as_deref())?;
            emit(session, &contexts, || render_lines(&contexts))?;
            Ok(true)
        }
        ListCommand::Packs { missing, .. } => {
            let result = dry_run(session)?;
            let packs = list_packs(&result.report, *missing);
            emit(session, &packs, || render_lines(&packs))?;
            Ok(!result.report.cancelled)
        }
        ListCommand::Dependencies { .. } => {
            let result = dry_run(session)?;
            let dependencies = list_dependencies(&result.report);
            emit(session, &dependencies, || render_lines(&dependencies))?;
            Ok(!result.report.cancelled)
        }
        ListCommand::Configs { .. } => {
            let result = dry_run(session)?;
            let configs = list_configs(&result.report);
            emit(session, &configs, || render_paths(&configs))?;
            Ok(!result.report.cancelled)
        }
        ListCommand::Layers { update_idx, .. } => {
            let request = selection_request(session, ContextOrder::Yml)?;
            let result = create_layer_query_use_case(&session.solution).query(
                &session.solution,
                &session.layers,
                &session.options.layer_search_paths,
                &request,
                *update_idx,
            )?;
            emit(session, &result, || render_layers(&result))?;
            Ok(!result.has_conflicts())
        }
        ListCommand::Components { filter, .. } => {
            let result = dry_run(session)?;
            let components = list_components(&result.report, &session.inventory, filter.as_deref());
            emit(session, &components, || render_lines(&components))?;
            Ok(!result.report.cancelled)
        }
        ListCommand::Boards { filter, .. } => {
            let boards = list_boards(&session.inventory, filter.as_deref());
            emit(session, &boards, || render_lines(&boards))?;
            Ok(true)
        }
        ListCommand::Devices { filter, .. } => {
            let devices = list_devices(&session.inventory, filter.as_deref());
            emit(session, &devices, || render_lines(&devices))?;
            Ok(true)
        }
        ListCommand::Toolchains { .. } => {
            let toolchains = list_toolchains(&session.inventory);
            emit(session, &toolchains, || render_toolchains(&toolchains))?;
            Ok(true)
        }
    }
}

fn selection_request(session: &Session, order: ContextOrder) -> Result<SelectionRequest> {
    let options = &session.options;
    let context_set = if options.use_context_set {
        let repo = YamlContextSetRepository::for_solution(
            session.solution.directory(),
            session.solution.name(),
        );
        ContextSetRequest::Requested(repo.load().context("failed to load the context set")?)
    } else {
        ContextSetRequest::NotRequested
    };
    Ok(SelectionRequest {
        patterns: options.patterns.clone(),
        context_set,
        order,
    })
}

fn dry_run(session: &Session) -> Result<ResolveResult> {
    let options = session.options.clone().dry_run();
    create_resolve_use_case(&session.solution).execute_with_cancellation(
        &session.solution,
        session.inventories(),
        &options,
        Some(session.cancel.as_ref()),
    )
}

fn emit(session: &Session, value: &impl serde::Serialize, text: impl FnOnce() -> String) -> Result<()> {
    match session.format {
        OutputFormat::Json => print_json(value),
        OutputFormat::Text => {
            print!("{}", text());
            Ok(())
        }
    }
}
